//! Headless driver: owns the task queue and the root composition and feeds
//! input between frames.

use settle_core::{Composition, TaskQueue, View};
use settle_ui::{InputError, render_text};

use crate::catalog::Catalog;
use crate::views::{App, AppState, NAME_FIELD};

pub struct Session {
    tasks: TaskQueue,
    composition: Composition,
    state: AppState,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            tasks: TaskQueue::new(),
            composition: Composition::new(),
            state: AppState::new(catalog),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn frame(&self) -> View {
        self.composition.compose(|| App(&self.state))
    }

    pub fn render(&self) -> String {
        render_text(&self.frame())
    }

    /// Submits `name` through the form, then composes so effects observe it.
    pub fn submit(&self, name: &str) -> Result<View, InputError> {
        settle_ui::submit(&self.frame(), NAME_FIELD, name)?;
        Ok(self.frame())
    }

    pub fn click(&self, label: &str) -> Result<View, InputError> {
        settle_ui::click(&self.frame(), label)?;
        Ok(self.frame())
    }

    /// Lets every in-flight fetch settle.
    pub fn settle(&mut self) {
        self.tasks.run_until_stalled();
    }

    pub fn unmount(&self) {
        self.composition.dispose();
    }

    pub fn is_mounted(&self) -> bool {
        self.composition.is_mounted()
    }
}
