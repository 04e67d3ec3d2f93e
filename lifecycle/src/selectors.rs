//! Read-side helpers for presenting tracker state.

use crate::error::TransportError;
use crate::types::{Entity, LifecycleState, OperationKind, RequestState};

/// What a presentation layer renders for one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleView<E> {
    /// State of the kind that changed most recently, `Idle` before any dispatch
    pub state: RequestState,
    /// Formatted failure of the most recent failed completion
    pub error: Option<String>,
    /// Message of the most recent successful mutation
    pub success_message: Option<String>,
    /// Entities in server order
    pub collection: Vec<E>,
}

impl<E: Entity> LifecycleView<E> {
    /// Project `state` into a view.
    #[must_use]
    pub fn of(state: &LifecycleState<E>) -> Self {
        Self {
            state: current_state(state),
            error: state.error.as_ref().map(format_error),
            success_message: state.success_message.clone(),
            collection: state.collection.clone(),
        }
    }
}

/// State of the kind that changed most recently.
#[must_use]
pub fn current_state<E: Entity>(state: &LifecycleState<E>) -> RequestState {
    state
        .last_operation
        .map_or(RequestState::Idle, |kind| state.status(kind))
}

/// Status of one operation kind.
#[must_use]
pub const fn status_of<E: Entity>(state: &LifecycleState<E>, kind: OperationKind) -> RequestState {
    state.status(kind)
}

/// Whether any kind has a request in flight.
#[must_use]
pub fn is_loading<E: Entity>(state: &LifecycleState<E>) -> bool {
    OperationKind::ALL
        .into_iter()
        .any(|kind| state.status(kind) == RequestState::Loading)
}

/// Entity with `id`, if present.
#[must_use]
pub fn find<'a, E: Entity>(state: &'a LifecycleState<E>, id: &E::Id) -> Option<&'a E> {
    state.get(id)
}

/// One-line, human-readable rendering of a failure.
#[must_use]
pub fn format_error(error: &TransportError) -> String {
    match error {
        TransportError::Validation(messages) if messages.is_empty() => {
            "Validation failed".to_string()
        },
        TransportError::Validation(messages) => messages.join("; "),
        TransportError::NotFound(message) | TransportError::Transport(message) => message.clone(),
    }
}
