//! # Composition, lifecycle, and async state
//!
//! Settle is a small reactive core for immediate-mode UI. Views are plain
//! functions re-run on every frame; state that must survive between frames
//! lives in `remember*` slots of the current [`Composition`].
//!
//! - `Composition`: a mountable slot table plus the [`Scope`] that owns its
//!   effects. First `compose` mounts it, `dispose` unmounts it.
//! - `Signal<T>`: observable, shared value.
//! - `disposable_effect` / `launched_effect!`: keyed side effects with cleanup.
//! - `use_reducer`: state that only changes through a reducer.
//! - `use_safe_dispatch`: a dispatch that goes quiet once its owner unmounts.
//! - `use_async`: idle/pending/resolved/rejected tracking for a future.
//! - `ErrorBoundary`: fallback UI for views that return `Err`.
//!
//! ## Remembered state
//!
//! ```rust
//! use settle_core::*;
//!
//! let composition = Composition::new();
//! let first = composition.compose(|| remember(|| signal(0)));
//! first.set(1);
//!
//! // Same slot on the next frame.
//! let again = composition.compose(|| remember(|| signal(0)));
//! assert_eq!(again.get(), 1);
//! ```
//!
//! - `remember` and `remember_state` are order‑based: the Nth call in a
//!   composition always refers to the Nth stored value.
//! - `remember_with_key` is key‑based and stays stable across conditional
//!   branches.
//!
//! ## Effects and cleanup
//!
//! ```rust
//! use settle_core::*;
//!
//! fn Example() {
//!     disposable_effect((), || {
//!         log::info!("Mounted Example");
//!         on_unmount(|| log::info!("Unmounted Example"))
//!     });
//! }
//!
//! let composition = Composition::new();
//! composition.compose(Example);
//! composition.dispose(); // logs "Unmounted Example"
//! ```
//!
//! ## Async work
//!
//! Async work runs on a single-threaded [`TaskQueue`] owned by whoever drives
//! frames. `use_async(..).run(future)` moves to pending immediately and writes
//! the outcome when the queue polls the future to completion, unless the
//! composition has unmounted by then.

pub mod async_state;
pub mod effects;
pub mod effects_ext;
pub mod error;
pub mod mount_guard;
pub mod prelude;
pub mod reducer;
pub mod runtime;
pub mod scope;
pub mod semantics;
pub mod signal;
pub mod task;
pub mod use_async;
pub mod view;

pub use async_state::*;
pub use effects::*;
pub use effects_ext::*;
pub use error::*;
pub use mount_guard::*;
pub use prelude::*;
pub use reducer::*;
pub use runtime::*;
pub use scope::*;
pub use semantics::*;
pub use signal::*;
pub use task::*;
pub use use_async::*;
pub use view::*;
