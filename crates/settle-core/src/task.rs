//! Single-threaded task queue for async work started from composition.
//!
//! The platform (or a test) owns a [`TaskQueue`] and drives it between frames;
//! composition code only ever calls [`spawn_local`].

use std::cell::{Cell, RefCell};
use std::future::Future;

use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;

use crate::AsyncError;

thread_local! {
    static SPAWNER: RefCell<Option<(u64, LocalSpawner)>> = const { RefCell::new(None) };
    static NEXT_QUEUE: Cell<u64> = const { Cell::new(0) };
}

pub struct TaskQueue {
    id: u64,
    pool: LocalPool,
}

impl TaskQueue {
    /// Creates a queue and installs it as this thread's spawner.
    pub fn new() -> Self {
        let id = NEXT_QUEUE.with(|n| {
            let id = n.get();
            n.set(id + 1);
            id
        });
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        SPAWNER.with(|s| {
            if s.borrow_mut().replace((id, spawner)).is_some() {
                log::debug!("task queue {id}: replacing previously installed queue");
            }
        });
        Self { id, pool }
    }

    /// Polls every task until none can make progress.
    pub fn run_until_stalled(&mut self) {
        self.pool.run_until_stalled();
    }

    /// Runs the queue until `fut` completes, returning its output.
    pub fn run_until<F: Future>(&mut self, fut: F) -> F::Output {
        self.pool.run_until(fut)
    }

    /// Polls tasks until one completes or none can make progress.
    pub fn try_run_one(&mut self) -> bool {
        self.pool.try_run_one()
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TaskQueue {
    fn drop(&mut self) {
        SPAWNER.with(|s| {
            let mut s = s.borrow_mut();
            if matches!(s.as_ref(), Some((id, _)) if *id == self.id) {
                *s = None;
            }
        });
    }
}

pub fn has_task_queue() -> bool {
    SPAWNER.with(|s| s.borrow().is_some())
}

/// Queues `fut` on this thread's task queue. It first runs the next time the
/// queue is driven.
pub fn spawn_local(fut: impl Future<Output = ()> + 'static) -> Result<(), AsyncError> {
    let spawner = SPAWNER
        .with(|s| s.borrow().as_ref().map(|(_, spawner)| spawner.clone()))
        .ok_or(AsyncError::NoExecutor)?;
    spawner.spawn_local(fut)?;
    Ok(())
}
