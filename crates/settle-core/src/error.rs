#![allow(non_snake_case)]
//! # Error boundaries
//!
//! Views that can fail return [`RenderResult`]. An [`ErrorBoundary`] composes
//! such content in its own child composition and, on `Err`, unmounts it and
//! shows a fallback until it is reset, either explicitly through the
//! [`BoundaryReset`] handed to the fallback or automatically when its reset
//! keys change.
//!
//! Panics are programming errors and pass straight through.

use std::cell::RefCell;
use std::error::Error;
use std::fmt;
use std::rc::Rc;

use crate::{Composition, View, remember};

/// A failure surfaced by a view while composing.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{component}: {message}")]
pub struct RenderError {
    pub component: String,
    pub message: String,
    cause: Option<Rc<dyn Error>>,
}

impl RenderError {
    /// A failure described only by its message.
    pub fn new(component: impl Into<String>, message: impl fmt::Display) -> Self {
        Self {
            component: component.into(),
            message: message.to_string(),
            cause: None,
        }
    }

    /// A failure carrying the typed error value, recoverable with
    /// [`ErrorInfo::downcast_ref`].
    pub fn from_error(component: impl Into<String>, error: impl Error + 'static) -> Self {
        Self {
            component: component.into(),
            message: error.to_string(),
            cause: Some(Rc::new(error)),
        }
    }

    pub fn cause(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref()
    }
}

impl PartialEq for RenderError {
    fn eq(&self, other: &Self) -> bool {
        self.component == other.component && self.message == other.message
    }
}

pub type RenderResult = Result<View, RenderError>;

/// What a boundary's fallback gets to see of a caught failure.
#[derive(Clone, Debug)]
pub struct ErrorInfo {
    pub message: String,
    pub component: String,
    cause: Option<Rc<dyn Error>>,
}

impl ErrorInfo {
    pub fn cause(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref()
    }

    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.cause()?.downcast_ref::<E>()
    }
}

impl PartialEq for ErrorInfo {
    fn eq(&self, other: &Self) -> bool {
        self.component == other.component && self.message == other.message
    }
}

impl From<RenderError> for ErrorInfo {
    fn from(err: RenderError) -> Self {
        ErrorInfo {
            message: err.message,
            component: err.component,
            cause: err.cause,
        }
    }
}

/// Clears a boundary's error and runs its `on_reset`.
#[derive(Clone)]
pub struct BoundaryReset(Rc<dyn Fn()>);

impl BoundaryReset {
    pub fn reset(&self) {
        (self.0)()
    }
}

struct BoundaryState<K> {
    caught: RefCell<Option<(ErrorInfo, K)>>,
    child: Composition,
}

impl<K> BoundaryState<K> {
    fn clear(&self) -> bool {
        self.caught.borrow_mut().take().is_some()
    }
}

pub fn ErrorBoundary<K: PartialEq + Clone + 'static>(
    reset_keys: K,
    on_reset: impl Fn() + 'static,
    fallback: impl FnOnce(&ErrorInfo, BoundaryReset) -> View,
    content: impl FnOnce() -> RenderResult,
) -> View {
    let state = remember(|| BoundaryState::<K> {
        caught: RefCell::new(None),
        child: Composition::new(),
    });

    let reset = {
        let state = state.clone();
        BoundaryReset(Rc::new(move || {
            if state.clear() {
                log::debug!("error boundary: reset");
                on_reset();
            }
        }))
    };

    let keys_changed = matches!(
        state.caught.borrow().as_ref(),
        Some((_, keys)) if *keys != reset_keys
    );
    if keys_changed {
        log::debug!("error boundary: reset keys changed; retrying content");
        state.clear();
    }

    let caught = state.caught.borrow().as_ref().map(|(info, _)| info.clone());
    if let Some(info) = caught {
        return fallback(&info, reset);
    }

    match state.child.compose(content) {
        Ok(view) => view,
        Err(err) => {
            log::warn!("error boundary caught: {err}");
            let info = ErrorInfo::from(err);
            state.child.dispose();
            *state.caught.borrow_mut() = Some((info.clone(), reset_keys));
            fallback(&info, reset)
        }
    }
}
