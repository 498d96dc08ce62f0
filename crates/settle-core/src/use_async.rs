//! # `use_async`
//!
//! Tracks one asynchronous unit of work at a time for the current composition.
//!
//! ```rust
//! use settle_core::*;
//!
//! let mut tasks = TaskQueue::new();
//! let composition = Composition::new();
//!
//! let search = composition.compose(|| use_async::<String, String>(AsyncOptions::default()));
//! search.run(async { Ok("pikachu-data".to_string()) }).unwrap();
//! assert!(search.state().is_pending());
//!
//! tasks.run_until_stalled();
//! assert_eq!(search.state().data().map(String::as_str), Some("pikachu-data"));
//! ```
//!
//! Results are written through a [`SafeDispatch`](crate::SafeDispatch): once the
//! composition unmounts, late results are dropped. Nothing is cancelled.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use crate::{
    AsyncAction, AsyncError, AsyncReducer, AsyncState, AsyncStatus, RawAction, SafeDispatch,
    Signal, SubId, remember, spawn_local, use_reducer, use_safe_dispatch,
};

/// What to do with a result whose `run` was superseded by a newer `run`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Write every result in settle order; a late result from an older run
    /// can overwrite a newer one.
    #[default]
    Apply,
    /// Number each `run` and drop results from anything but the latest.
    DropSuperseded,
}

/// Configuration for [`use_async`]. Only read on mount.
#[derive(Clone, Debug)]
pub struct AsyncOptions<T, E> {
    pub initial: AsyncState<T, E>,
    pub stale: StalePolicy,
}

impl<T, E> Default for AsyncOptions<T, E> {
    fn default() -> Self {
        Self {
            initial: AsyncState::idle(),
            stale: StalePolicy::default(),
        }
    }
}

impl<T, E> AsyncOptions<T, E> {
    pub fn initial(mut self, initial: AsyncState<T, E>) -> Self {
        self.initial = initial;
        self
    }

    pub fn stale(mut self, stale: StalePolicy) -> Self {
        self.stale = stale;
        self
    }
}

/// Handle returned by [`use_async`]. Cloning is cheap and keeps identity.
pub struct UseAsync<T: 'static, E: 'static> {
    inner: Rc<Tracker<T, E>>,
}

struct Tracker<T: 'static, E: 'static> {
    state: Signal<AsyncState<T, E>>,
    dispatch: SafeDispatch<AsyncAction<T, E>>,
    generation: Rc<Cell<u64>>,
    stale: StalePolicy,
}

impl<T: 'static, E: 'static> Clone for UseAsync<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static, E: 'static> UseAsync<T, E> {
    /// Snapshot of the current state.
    pub fn state(&self) -> AsyncState<T, E>
    where
        T: Clone,
        E: Clone,
    {
        self.inner.state.get()
    }

    pub fn status(&self) -> AsyncStatus {
        self.inner.state.with(|s| s.status())
    }

    pub fn data(&self) -> Option<T>
    where
        T: Clone,
    {
        self.inner.state.with(|s| s.data().cloned())
    }

    pub fn error(&self) -> Option<E>
    where
        E: Clone,
    {
        self.inner.state.with(|s| s.error().cloned())
    }

    /// Calls `f` with every new state, after it is written.
    pub fn subscribe(&self, f: impl Fn(&AsyncState<T, E>) + 'static) -> SubId {
        self.inner.state.subscribe(f)
    }

    pub fn unsubscribe(&self, id: SubId) {
        self.inner.state.unsubscribe(id)
    }

    pub fn ptr_eq(&self, other: &UseAsync<T, E>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn dispatch(&self, action: AsyncAction<T, E>) {
        self.inner.dispatch.dispatch(action);
    }

    /// Dispatches a tag-addressed action. Unknown tags and missing payloads
    /// are programming errors and panic.
    pub fn dispatch_raw(&self, raw: RawAction<T, E>) {
        match AsyncAction::try_from(raw) {
            Ok(action) => self.dispatch(action),
            Err(err) => panic!("{err}"),
        }
    }

    /// Starts `work`: moves to pending now, and to resolved or rejected when
    /// `work` settles on the task queue.
    pub fn run<F>(&self, work: F) -> Result<(), AsyncError>
    where
        F: Future<Output = Result<T, E>> + 'static,
    {
        let generation = self.inner.generation.get() + 1;
        let dispatch = self.inner.dispatch.clone();
        let current = self.inner.generation.clone();
        let stale = self.inner.stale;

        spawn_local(async move {
            let outcome = work.await;
            if stale == StalePolicy::DropSuperseded && current.get() != generation {
                log::debug!(
                    "use_async: dropping result of run {generation}; run {} is current",
                    current.get()
                );
                return;
            }
            match outcome {
                Ok(data) => dispatch.dispatch(AsyncAction::Resolved(data)),
                Err(error) => dispatch.dispatch(AsyncAction::Rejected(error)),
            }
        })?;

        self.inner.generation.set(generation);
        self.inner.dispatch.dispatch(AsyncAction::Pending);
        Ok(())
    }
}

/// Async-state tracker for the current composition. The returned handle (and
/// so `run`) is the same on every recomposition.
pub fn use_async<T: 'static, E: 'static>(options: AsyncOptions<T, E>) -> UseAsync<T, E> {
    let AsyncOptions { initial, stale } = options;
    let (state, raw) = use_reducer::<AsyncReducer<T, E>>(move || initial);
    let dispatch = use_safe_dispatch(raw);

    let handle = remember(|| UseAsync {
        inner: Rc::new(Tracker {
            state,
            dispatch,
            generation: Rc::new(Cell::new(0)),
            stale,
        }),
    });
    (*handle).clone()
}
