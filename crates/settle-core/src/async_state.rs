//! # Async state
//!
//! `AsyncState<T, E>` is the lifecycle of one asynchronous unit of work:
//!
//! ```text
//! idle ──run──▶ pending ──ok──▶ resolved
//!                  │  ▲              │
//!                  │  └────run───────┤
//!                  └──err──▶ rejected┘
//! ```
//!
//! The phase is a sum type, so `data` is only ever present when resolved and
//! `error` only when rejected. State only moves through [`AsyncAction`]s fed to
//! [`AsyncReducer`].

use std::fmt;
use std::marker::PhantomData;

use crate::reducer::StateHolder;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum AsyncStatus {
    #[default]
    Idle,
    Pending,
    Resolved,
    Rejected,
}

impl AsyncStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AsyncStatus::Idle => "idle",
            AsyncStatus::Pending => "pending",
            AsyncStatus::Resolved => "resolved",
            AsyncStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for AsyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AsyncError {
    #[error("Unhandled action type: {0}")]
    UnhandledAction(String),
    #[error("action `{0}` dispatched without its payload")]
    MissingPayload(&'static str),
    #[error("inconsistent async state: status {status} with data={has_data}, error={has_error}")]
    InconsistentState {
        status: AsyncStatus,
        has_data: bool,
        has_error: bool,
    },
    #[error("no task queue installed on this thread")]
    NoExecutor,
    #[error("failed to spawn task: {0}")]
    Spawn(String),
}

impl From<futures::task::SpawnError> for AsyncError {
    fn from(err: futures::task::SpawnError) -> Self {
        AsyncError::Spawn(err.to_string())
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Phase<T, E> {
    Idle,
    Pending,
    Resolved(T),
    Rejected(E),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AsyncState<T, E> {
    phase: Phase<T, E>,
}

impl<T, E> Default for AsyncState<T, E> {
    fn default() -> Self {
        Self { phase: Phase::Idle }
    }
}

impl<T, E> AsyncState<T, E> {
    pub fn idle() -> Self {
        Self { phase: Phase::Idle }
    }

    pub fn pending() -> Self {
        Self {
            phase: Phase::Pending,
        }
    }

    pub fn resolved(data: T) -> Self {
        Self {
            phase: Phase::Resolved(data),
        }
    }

    pub fn rejected(error: E) -> Self {
        Self {
            phase: Phase::Rejected(error),
        }
    }

    /// Overrides that only carry a status. `Resolved`/`Rejected` need their
    /// payload, so they go through [`AsyncState::from_parts`].
    pub fn from_status(status: AsyncStatus) -> Result<Self, AsyncError> {
        Self::from_parts(status, None, None)
    }

    /// Merges caller overrides onto the idle default, rejecting combinations
    /// where `data`/`error` disagree with `status`.
    pub fn from_parts(
        status: AsyncStatus,
        data: Option<T>,
        error: Option<E>,
    ) -> Result<Self, AsyncError> {
        let inconsistent = |data: &Option<T>, error: &Option<E>| AsyncError::InconsistentState {
            status,
            has_data: data.is_some(),
            has_error: error.is_some(),
        };
        let phase = match (status, data, error) {
            (AsyncStatus::Idle, None, None) => Phase::Idle,
            (AsyncStatus::Pending, None, None) => Phase::Pending,
            (AsyncStatus::Resolved, Some(data), None) => Phase::Resolved(data),
            (AsyncStatus::Rejected, None, Some(error)) => Phase::Rejected(error),
            (_, data, error) => return Err(inconsistent(&data, &error)),
        };
        Ok(Self { phase })
    }

    pub fn status(&self) -> AsyncStatus {
        match self.phase {
            Phase::Idle => AsyncStatus::Idle,
            Phase::Pending => AsyncStatus::Pending,
            Phase::Resolved(_) => AsyncStatus::Resolved,
            Phase::Rejected(_) => AsyncStatus::Rejected,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match &self.phase {
            Phase::Resolved(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match &self.phase {
            Phase::Rejected(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, Phase::Resolved(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self.phase, Phase::Rejected(_))
    }

    /// Splits into `(status, data, error)`.
    pub fn into_parts(self) -> (AsyncStatus, Option<T>, Option<E>) {
        match self.phase {
            Phase::Idle => (AsyncStatus::Idle, None, None),
            Phase::Pending => (AsyncStatus::Pending, None, None),
            Phase::Resolved(data) => (AsyncStatus::Resolved, Some(data), None),
            Phase::Rejected(error) => (AsyncStatus::Rejected, None, Some(error)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AsyncAction<T, E> {
    Pending,
    Resolved(T),
    Rejected(E),
}

impl<T, E> AsyncAction<T, E> {
    pub fn tag(&self) -> &'static str {
        match self {
            AsyncAction::Pending => "pending",
            AsyncAction::Resolved(_) => "resolved",
            AsyncAction::Rejected(_) => "rejected",
        }
    }
}

/// Action addressed by a string tag, as it arrives from untyped callers.
#[derive(Clone, Debug)]
pub struct RawAction<T, E> {
    pub tag: String,
    pub data: Option<T>,
    pub error: Option<E>,
}

impl<T, E> RawAction<T, E> {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            data: None,
            error: None,
        }
    }

    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_error(mut self, error: E) -> Self {
        self.error = Some(error);
        self
    }
}

impl<T, E> TryFrom<RawAction<T, E>> for AsyncAction<T, E> {
    type Error = AsyncError;

    fn try_from(raw: RawAction<T, E>) -> Result<Self, Self::Error> {
        match raw.tag.as_str() {
            "pending" => Ok(AsyncAction::Pending),
            "resolved" => raw
                .data
                .map(AsyncAction::Resolved)
                .ok_or(AsyncError::MissingPayload("resolved")),
            "rejected" => raw
                .error
                .map(AsyncAction::Rejected)
                .ok_or(AsyncError::MissingPayload("rejected")),
            other => Err(AsyncError::UnhandledAction(other.to_string())),
        }
    }
}

/// Reducer for [`AsyncState`]. Every action replaces the whole state.
pub struct AsyncReducer<T, E>(PhantomData<fn() -> (T, E)>);

impl<T: 'static, E: 'static> StateHolder for AsyncReducer<T, E> {
    type State = AsyncState<T, E>;
    type Event = AsyncAction<T, E>;

    fn reduce(state: &Self::State, event: Self::Event) -> Self::State {
        let next = match event {
            AsyncAction::Pending => AsyncState::pending(),
            AsyncAction::Resolved(data) => AsyncState::resolved(data),
            AsyncAction::Rejected(error) => AsyncState::rejected(error),
        };
        log::debug!("async state: {} -> {}", state.status(), next.status());
        next
    }
}

/// Reduces a tag-addressed action. An unknown tag is a programming error and
/// panics instead of being folded into state.
pub fn reduce_raw<T: 'static, E: 'static>(
    state: &AsyncState<T, E>,
    raw: RawAction<T, E>,
) -> AsyncState<T, E> {
    match AsyncAction::try_from(raw) {
        Ok(action) => AsyncReducer::<T, E>::reduce(state, action),
        Err(err) => panic!("{err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    type State = AsyncState<String, String>;
    type Action = AsyncAction<String, String>;
    type Reducer = AsyncReducer<String, String>;

    fn arb_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(AsyncAction::Pending),
            "[a-z]{1,8}".prop_map(AsyncAction::Resolved),
            "[a-z]{1,8}".prop_map(AsyncAction::Rejected),
        ]
    }

    fn assert_consistent(state: &State) {
        match state.status() {
            AsyncStatus::Idle | AsyncStatus::Pending => {
                assert!(state.data().is_none());
                assert!(state.error().is_none());
            }
            AsyncStatus::Resolved => {
                assert!(state.data().is_some());
                assert!(state.error().is_none());
            }
            AsyncStatus::Rejected => {
                assert!(state.data().is_none());
                assert!(state.error().is_some());
            }
        }
    }

    proptest! {
        #[test]
        fn data_and_error_never_coexist(actions in prop::collection::vec(arb_action(), 0..32)) {
            let mut state = State::default();
            assert_consistent(&state);
            for action in actions {
                let expected = action.tag();
                state = Reducer::reduce(&state, action);
                prop_assert_eq!(state.status().as_str(), expected);
                assert_consistent(&state);
            }
        }
    }

    #[test]
    fn pending_clears_previous_result() {
        let resolved = State::resolved("pikachu-data".into());
        let next = Reducer::reduce(&resolved, AsyncAction::Pending);
        assert_eq!(next, State::pending());

        let rejected = State::rejected("not-found".into());
        let next = Reducer::reduce(&rejected, AsyncAction::Pending);
        assert_eq!(next.status(), AsyncStatus::Pending);
        assert!(next.error().is_none());
    }

    #[test]
    fn resolved_and_rejected_carry_payloads() {
        let state = Reducer::reduce(&State::pending(), AsyncAction::Resolved("ok".into()));
        assert_eq!(state.data().map(String::as_str), Some("ok"));
        assert_eq!(state.error(), None);

        let state = Reducer::reduce(&state, AsyncAction::Rejected("boom".into()));
        assert_eq!(state.data(), None);
        assert_eq!(state.error().map(String::as_str), Some("boom"));
    }

    #[test]
    fn overrides_merge_onto_idle_default() {
        assert_eq!(State::from_status(AsyncStatus::Idle), Ok(State::idle()));
        assert_eq!(State::from_status(AsyncStatus::Pending), Ok(State::pending()));
        assert_eq!(
            State::from_parts(AsyncStatus::Resolved, Some("x".into()), None),
            Ok(State::resolved("x".into()))
        );
        assert_eq!(
            State::from_status(AsyncStatus::Resolved),
            Err(AsyncError::InconsistentState {
                status: AsyncStatus::Resolved,
                has_data: false,
                has_error: false,
            })
        );
        assert!(State::from_parts(AsyncStatus::Idle, Some("x".into()), None).is_err());
        assert!(
            State::from_parts(AsyncStatus::Rejected, Some("x".into()), Some("y".into())).is_err()
        );
    }

    #[test]
    fn raw_actions_decode_known_tags() {
        let action = Action::try_from(RawAction::new("resolved").with_data("d".into()));
        assert_eq!(action, Ok(AsyncAction::Resolved("d".into())));

        let action = Action::try_from(RawAction::new("rejected"));
        assert_eq!(action, Err(AsyncError::MissingPayload("rejected")));

        let action = Action::try_from(RawAction::new("cancelled"));
        assert_eq!(
            action.map_err(|e| e.to_string()),
            Err("Unhandled action type: cancelled".to_string())
        );
    }

    #[test]
    #[should_panic(expected = "Unhandled action type: reset")]
    fn unknown_tag_is_fatal() {
        let _ = reduce_raw(&State::idle(), RawAction::new("reset"));
    }

    #[test]
    fn into_parts_matches_accessors() {
        let (status, data, error) = State::rejected("not-found".into()).into_parts();
        assert_eq!(status, AsyncStatus::Rejected);
        assert_eq!(data, None);
        assert_eq!(error.as_deref(), Some("not-found"));
    }
}
