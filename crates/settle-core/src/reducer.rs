use std::rc::Rc;

use crate::{Signal, remember, signal};

/// Callback that feeds one event into a reducer.
pub type Dispatch<A> = Rc<dyn Fn(A)>;

/// State holder pattern: state only changes by reducing events.
pub trait StateHolder: 'static {
    type State: 'static;
    type Event: 'static;

    fn reduce(state: &Self::State, event: Self::Event) -> Self::State;
}

/// Reducer-backed state. The signal and the dispatch are remembered, so both
/// keep their identity across recompositions. `init` only runs on mount.
pub fn use_reducer<R: StateHolder>(
    init: impl FnOnce() -> R::State,
) -> (Signal<R::State>, Dispatch<R::Event>) {
    let slot = remember(|| {
        let state = signal(init());
        let dispatch: Dispatch<R::Event> = {
            let state = state.clone();
            Rc::new(move |event| state.replace_with(|s| R::reduce(s, event)))
        };
        (state, dispatch)
    });
    (slot.0.clone(), slot.1.clone())
}
