use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::scope::{Scope, current_scope};

thread_local! {
    pub static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
}

/// Slot table of one composition.
#[derive(Default)]
pub struct Composer {
    pub slots: Vec<Box<dyn Any>>,
    pub cursor: usize,
    pub keyed_slots: HashMap<String, Box<dyn Any>>,
}

/// Installs a composition's slot table as the thread's current one and puts
/// the outer table back when dropped.
pub struct ComposeGuard<'a> {
    owner: &'a RefCell<Composer>,
}

impl<'a> ComposeGuard<'a> {
    pub fn begin(owner: &'a RefCell<Composer>) -> Self {
        let mut own = std::mem::take(&mut *owner.borrow_mut());
        own.cursor = 0;
        COMPOSER.with(|c| std::mem::swap(&mut *c.borrow_mut(), &mut own));
        // `own` now holds the enclosing composition's table.
        *owner.borrow_mut() = own;
        ComposeGuard { owner }
    }
}

impl Drop for ComposeGuard<'_> {
    fn drop(&mut self) {
        let mut outer = std::mem::take(&mut *self.owner.borrow_mut());
        COMPOSER.with(|c| std::mem::swap(&mut *c.borrow_mut(), &mut outer));
        *self.owner.borrow_mut() = outer;
    }
}

/// A mountable unit of UI: its own slot table plus the scope that owns its
/// effects. The first `compose` mounts it, `dispose` unmounts it.
pub struct Composition {
    composer: RefCell<Composer>,
    scope: RefCell<Option<Scope>>,
}

impl Composition {
    pub fn new() -> Self {
        Self {
            composer: RefCell::new(Composer::default()),
            scope: RefCell::new(None),
        }
    }

    pub fn compose<R>(&self, content: impl FnOnce() -> R) -> R {
        let scope = self.scope_or_mount();
        let _guard = ComposeGuard::begin(&self.composer);
        scope.run(content)
    }

    pub fn is_mounted(&self) -> bool {
        self.scope
            .borrow()
            .as_ref()
            .is_some_and(|scope| !scope.is_disposed())
    }

    /// Runs every disposer of the composition's scope and forgets its slots.
    /// Composing again mounts it from scratch.
    pub fn dispose(&self) {
        let scope = self.scope.borrow_mut().take();
        let Some(scope) = scope else {
            return;
        };
        log::debug!("composition: unmounting");
        scope.dispose();
        self.forget_slots();
    }

    fn forget_slots(&self) {
        // Dropped outside the borrow: slot values may own nested compositions.
        let old = std::mem::take(&mut *self.composer.borrow_mut());
        drop(old);
    }

    fn scope_or_mount(&self) -> Scope {
        let existing = self.scope.borrow().clone();
        match existing {
            Some(scope) if !scope.is_disposed() => return scope,
            Some(_) => {
                // Torn down along with a parent scope.
                self.forget_slots();
            }
            None => {}
        }
        log::debug!("composition: mounting");
        // Nested compositions are torn down with their parent.
        let scope = current_scope().map(|p| p.child()).unwrap_or_default();
        *self.scope.borrow_mut() = Some(scope.clone());
        scope
    }
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}

/// Slot-based remember (sequential composition only)
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    let found = COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let cursor = c.cursor;
        c.cursor += 1;
        let existing = c
            .slots
            .get(cursor)
            .map(|slot| slot.downcast_ref::<Rc<T>>().cloned());
        match existing {
            None => {
                // Reserve the slot before `init` runs.
                c.slots.push(Box::new(()));
                Err(cursor)
            }
            Some(Some(rc)) => Ok(rc),
            Some(None) => {
                log::warn!(
                    "remember: slot {} type changed; replacing. \
                     If this is due to conditional composition, prefer remember_with_key.",
                    cursor
                );
                Err(cursor)
            }
        }
    });

    match found {
        Ok(rc) => rc,
        Err(cursor) => {
            // `init` runs without the slot table borrowed so it may remember too.
            let rc: Rc<T> = Rc::new(init());
            COMPOSER.with(|c| {
                c.borrow_mut().slots[cursor] = Box::new(rc.clone());
            });
            rc
        }
    }
}

/// Key-based remember
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    let key = key.into();
    let found = COMPOSER.with(|c| {
        let c = c.borrow();
        let existing = c.keyed_slots.get(&key)?;
        let rc = existing.downcast_ref::<Rc<T>>().cloned();
        if rc.is_none() {
            log::warn!(
                "remember_with_key: key '{}' reused with a different type; replacing.",
                key
            );
        }
        rc
    });
    if let Some(rc) = found {
        return rc;
    }

    let rc: Rc<T> = Rc::new(init());
    COMPOSER.with(|c| {
        c.borrow_mut().keyed_slots.insert(key, Box::new(rc.clone()));
    });
    rc
}

pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}
