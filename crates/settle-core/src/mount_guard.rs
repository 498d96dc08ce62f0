//! # Mount guard
//!
//! Async work can finish after the view that started it is gone. Writing its
//! result into that view's state would touch state the runtime already tore
//! down, so dispatches go through a [`SafeDispatch`] that checks a
//! [`MountGuard`] first and silently drops the call once the owner unmounted.
//!
//! ```rust
//! use settle_core::*;
//! use std::rc::Rc;
//!
//! let guard = MountGuard::new();
//! let safe = SafeDispatch::new(Rc::new(|n: i32| println!("{n}")), guard.clone());
//!
//! safe.dispatch(1); // not attached yet: dropped
//! guard.attach();
//! safe.dispatch(2); // forwarded
//! guard.detach();
//! safe.dispatch(3); // dropped, for good
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::{Dispatch, disposable_effect, on_unmount, remember};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountState {
    Unattached,
    Attached,
    Detached,
}

/// Shared "is mounted" flag. Once detached it never attaches again.
#[derive(Clone)]
pub struct MountGuard(Rc<Cell<MountState>>);

impl MountGuard {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(MountState::Unattached)))
    }

    pub fn attach(&self) {
        match self.0.get() {
            MountState::Unattached => self.0.set(MountState::Attached),
            MountState::Attached => {}
            MountState::Detached => {
                log::warn!("mount guard: attach after detach ignored");
            }
        }
    }

    pub fn detach(&self) {
        self.0.set(MountState::Detached);
    }

    pub fn state(&self) -> MountState {
        self.0.get()
    }

    pub fn is_mounted(&self) -> bool {
        self.0.get() == MountState::Attached
    }

    /// Runs `f` only while attached.
    pub fn invoke_if_active<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        if self.is_mounted() { Some(f()) } else { None }
    }
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// A dispatch that forwards only while its guard is attached.
pub struct SafeDispatch<A: 'static> {
    inner: Rc<SafeInner<A>>,
}

struct SafeInner<A: 'static> {
    raw: Dispatch<A>,
    guard: MountGuard,
}

impl<A: 'static> Clone for SafeDispatch<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A: 'static> SafeDispatch<A> {
    pub fn new(raw: Dispatch<A>, guard: MountGuard) -> Self {
        Self {
            inner: Rc::new(SafeInner { raw, guard }),
        }
    }

    pub fn dispatch(&self, action: A) {
        let raw = &self.inner.raw;
        if self.inner.guard.invoke_if_active(|| raw(action)).is_none() {
            log::trace!("safe dispatch: owner not mounted; update dropped");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.guard.is_mounted()
    }

    pub fn guard(&self) -> &MountGuard {
        &self.inner.guard
    }

    /// Same handle, same wrapper.
    pub fn ptr_eq(&self, other: &SafeDispatch<A>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// The wrapper as a plain [`Dispatch`], with the raw dispatch's signature.
    pub fn as_dispatch(&self) -> Dispatch<A> {
        let this = self.clone();
        Rc::new(move |action| this.dispatch(action))
    }

    fn wraps(&self, raw: &Dispatch<A>) -> bool {
        Rc::ptr_eq(&self.inner.raw, raw)
    }
}

/// A guard attached while the current composition is mounted and detached by
/// its scope on unmount.
pub fn use_mount_guard() -> MountGuard {
    let guard = remember(MountGuard::new);
    let g = (*guard).clone();
    disposable_effect((), move || {
        g.attach();
        on_unmount(move || g.detach())
    });
    (*guard).clone()
}

/// Wraps `raw` so calls after unmount are dropped. Returns the same wrapper
/// while `raw` is the same dispatch.
pub fn use_safe_dispatch<A: 'static>(raw: Dispatch<A>) -> SafeDispatch<A> {
    let guard = use_mount_guard();
    let memo = remember(|| RefCell::new(None::<SafeDispatch<A>>));
    let mut memo = memo.borrow_mut();
    if let Some(safe) = memo.as_ref().filter(|safe| safe.wraps(&raw)) {
        return safe.clone();
    }
    let safe = SafeDispatch::new(raw, guard);
    *memo = Some(safe.clone());
    safe
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Composition;

    fn recorder() -> (Rc<RefCell<Vec<i32>>>, Dispatch<i32>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let dispatch: Dispatch<i32> = {
            let seen = seen.clone();
            Rc::new(move |n| seen.borrow_mut().push(n))
        };
        (seen, dispatch)
    }

    #[test]
    fn forwards_only_while_attached() {
        let (seen, raw) = recorder();
        let guard = MountGuard::new();
        let safe = SafeDispatch::new(raw, guard.clone());

        safe.dispatch(1);
        guard.attach();
        safe.dispatch(2);
        safe.as_dispatch()(3);
        guard.detach();
        safe.dispatch(4);

        assert_eq!(*seen.borrow(), vec![2, 3]);
    }

    #[test]
    fn detach_is_irreversible() {
        let guard = MountGuard::new();
        guard.attach();
        guard.detach();
        guard.attach();
        assert_eq!(guard.state(), MountState::Detached);
        assert_eq!(guard.invoke_if_active(|| 1), None);
    }

    #[test]
    fn composition_lifecycle_drives_the_guard() {
        let (seen, raw) = recorder();
        let composition = Composition::new();

        let safe = composition.compose(|| use_safe_dispatch(raw.clone()));
        assert!(safe.is_mounted());
        safe.dispatch(7);

        composition.dispose();
        assert!(!safe.is_mounted());
        safe.dispatch(8);

        assert_eq!(*seen.borrow(), vec![7]);
    }

    #[test]
    fn wrapper_identity_follows_raw_identity() {
        let (_, raw) = recorder();
        let (_, other) = recorder();
        let composition = Composition::new();

        let first = composition.compose(|| use_safe_dispatch(raw.clone()));
        let second = composition.compose(|| use_safe_dispatch(raw.clone()));
        assert!(first.ptr_eq(&second));

        let third = composition.compose(|| use_safe_dispatch(other.clone()));
        assert!(!first.ptr_eq(&third));
        // A new wrapper still shares the composition's guard.
        assert!(third.is_mounted());
        composition.dispose();
        assert!(!third.is_mounted());
    }
}
