pub use crate::async_state::{AsyncAction, AsyncError, AsyncState, AsyncStatus, RawAction};
pub use crate::effects::{Dispose, effect, on_unmount};
pub use crate::effects_ext::disposable_effect;
pub use crate::error::{BoundaryReset, ErrorBoundary, ErrorInfo, RenderError, RenderResult};
pub use crate::launched_effect;
pub use crate::mount_guard::{MountGuard, SafeDispatch, use_safe_dispatch};
pub use crate::reducer::{Dispatch, StateHolder, use_reducer};
pub use crate::runtime::{
    Composition, remember, remember_state, remember_with_key,
};
pub use crate::scope::{Scope, current_scope, scoped_effect};
pub use crate::semantics::{Role, Semantics};
pub use crate::signal::{Signal, signal};
pub use crate::task::{TaskQueue, spawn_local};
pub use crate::use_async::{AsyncOptions, StalePolicy, UseAsync, use_async};
pub use crate::view::{View, ViewKind};
