//! Reducer for request lifecycle tracking.

use crate::actions::LifecycleAction;
use crate::environment::LifecycleEnvironment;
use crate::error::TransportError;
use crate::types::{Entity, LifecycleState, OperationKind, RequestId, RequestState};
use composable_crud_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::marker::PhantomData;

/// Reducer tracking the lifecycle of CRUD requests against one collection.
///
/// Dispatches mark their kind `Loading` and return one transport effect.
/// Completions settle the kind and apply the result to the collection.
/// Overlapping requests of one kind are not serialized: the last completion
/// to arrive decides the final state.
pub struct LifecycleReducer<E> {
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> LifecycleReducer<E> {
    /// Create a new lifecycle reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Default for LifecycleReducer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for LifecycleReducer<E> {
    fn clone(&self) -> Self {
        Self {
            _entity: PhantomData,
        }
    }
}

/// Mark `kind` as loading for `request`, clearing any previous message.
fn begin<E: Entity>(state: &mut LifecycleState<E>, kind: OperationKind, request: RequestId) {
    let status = state.operations.get_mut(kind);
    if status.state == RequestState::Loading {
        tracing::debug!(operation = kind.as_str(), %request, "Overlapping request dispatched");
    }
    status.state = RequestState::Loading;
    status.latest_request = Some(request);
    state.last_operation = Some(kind);
    state.error = None;
    state.success_message = None;
}

/// Settle `kind` with the outcome of `request`.
///
/// The error and success message always describe the latest completion.
fn settle<E: Entity>(
    state: &mut LifecycleState<E>,
    kind: OperationKind,
    request: RequestId,
    outcome: Result<(), TransportError>,
    env: &LifecycleEnvironment<E>,
) {
    let status = state.operations.get_mut(kind);
    if status.latest_request != Some(request) {
        tracing::debug!(
            operation = kind.as_str(),
            %request,
            "Completion of an earlier request; last completion wins"
        );
    }
    status.settled_at = Some(env.clock().now());
    state.last_operation = Some(kind);

    match outcome {
        Ok(()) => {
            status.state = RequestState::Succeeded;
            state.error = None;
        },
        Err(error) => {
            tracing::debug!(operation = kind.as_str(), %request, %error, "Request failed");
            status.state = RequestState::Failed;
            state.error = Some(error);
            state.success_message = None;
        },
    }
}

fn succeeded<E: Entity>(state: &mut LifecycleState<E>, verb: &str) {
    state.success_message = Some(format!("{} {verb} successfully!", E::LABEL));
}

impl<E: Entity> Reducer for LifecycleReducer<E> {
    type State = LifecycleState<E>;
    type Action = LifecycleAction<E>;
    type Environment = LifecycleEnvironment<E>;

    #[allow(clippy::too_many_lines)] // One arm per action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════
            // Dispatches
            // ═══════════════════════════════════════════════════════════
            LifecycleAction::FetchAll { request } => {
                begin(state, OperationKind::FetchAll, request);
                let call = env.transport().list();
                smallvec![Effect::future(async move {
                    Some(LifecycleAction::Fetched {
                        request,
                        result: call.await,
                    })
                })]
            },

            LifecycleAction::Create { request, draft } => {
                begin(state, OperationKind::Create, request);
                let call = env.transport().create(draft);
                smallvec![Effect::future(async move {
                    Some(LifecycleAction::Created {
                        request,
                        result: call.await,
                    })
                })]
            },

            LifecycleAction::Update { request, id, patch } => {
                begin(state, OperationKind::Update, request);
                let call = env.transport().update(id.clone(), patch);
                smallvec![Effect::future(async move {
                    Some(LifecycleAction::Updated {
                        request,
                        id,
                        result: call.await,
                    })
                })]
            },

            LifecycleAction::Delete { request, id } => {
                begin(state, OperationKind::Delete, request);
                let call = env.transport().delete(id.clone());
                smallvec![Effect::future(async move {
                    Some(LifecycleAction::Deleted {
                        request,
                        id,
                        result: call.await,
                    })
                })]
            },

            LifecycleAction::ClearMessages => {
                state.error = None;
                state.success_message = None;
                for kind in OperationKind::ALL {
                    let status = state.operations.get_mut(kind);
                    // In-flight requests keep loading; their completion still applies.
                    if status.state.is_terminal() {
                        status.state = RequestState::Idle;
                    }
                }
                SmallVec::new()
            },

            // ═══════════════════════════════════════════════════════════
            // Completions
            // ═══════════════════════════════════════════════════════════
            LifecycleAction::Fetched { request, result } => {
                let outcome = result.map(|collection| {
                    state.collection = collection;
                    state.loaded = true;
                });
                settle(state, OperationKind::FetchAll, request, outcome, env);
                SmallVec::new()
            },

            LifecycleAction::Created { request, result } => {
                let outcome = result.map(|entity| {
                    match state.position(entity.id()) {
                        Some(index) => {
                            tracing::warn!(
                                id = %entity.id(),
                                "Created record already present; replacing"
                            );
                            state.collection[index] = entity;
                        },
                        None => state.collection.push(entity),
                    }
                });
                let ok = outcome.is_ok();
                settle(state, OperationKind::Create, request, outcome, env);
                if ok {
                    succeeded(state, "created");
                }
                SmallVec::new()
            },

            LifecycleAction::Updated { request, id, result } => {
                let outcome = result.map(|entity| match state.position(entity.id()) {
                    Some(index) => state.collection[index] = entity,
                    None => {
                        tracing::warn!(%id, "Updated record not in collection; ignoring");
                    },
                });
                let ok = outcome.is_ok();
                settle(state, OperationKind::Update, request, outcome, env);
                if ok {
                    succeeded(state, "updated");
                }
                SmallVec::new()
            },

            LifecycleAction::Deleted { request, id, result } => {
                let outcome = result.map(|()| state.collection.retain(|e| e.id() != &id));
                let ok = outcome.is_ok();
                settle(state, OperationKind::Delete, request, outcome, env);
                if ok {
                    succeeded(state, "deleted");
                }
                SmallVec::new()
            },
        }
    }
}
