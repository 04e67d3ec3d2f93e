//! Awaitable facade over the lifecycle store.

use crate::actions::LifecycleAction;
use crate::environment::LifecycleEnvironment;
use crate::reducer::LifecycleReducer;
use crate::selectors::LifecycleView;
use crate::types::{Entity, LifecycleState, OperationKind, RequestId, RequestState};
use composable_crud_runtime::{EffectHandle, Store, StoreError};
use std::time::Duration;
use tokio::sync::broadcast;

/// Store specialized to lifecycle tracking of `E`.
pub type LifecycleStore<E> =
    Store<LifecycleState<E>, LifecycleAction<E>, LifecycleEnvironment<E>, LifecycleReducer<E>>;

/// Default time to wait for a completion.
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(10);

/// Tracks CRUD requests against one collection.
///
/// Each operation dispatches through the store, waits for the completion
/// carrying its own [`RequestId`], and returns the resulting view. Calls may
/// overlap freely; the last completion to arrive decides the final state.
///
/// ```ignore
/// let tracker = Tracker::new(LifecycleEnvironment::new(transport, clock));
/// let view = tracker.fetch_all().await?;
/// assert_eq!(view.state, RequestState::Succeeded);
/// ```
pub struct Tracker<E: Entity> {
    store: LifecycleStore<E>,
    response_timeout: Duration,
}

impl<E: Entity> Clone for Tracker<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            response_timeout: self.response_timeout,
        }
    }
}

impl<E: Entity> Tracker<E> {
    /// Tracker with an empty, idle state.
    #[must_use]
    pub fn new(environment: LifecycleEnvironment<E>) -> Self {
        Self::with_state(LifecycleState::new(), environment)
    }

    /// Tracker starting from `state`.
    #[must_use]
    pub fn with_state(state: LifecycleState<E>, environment: LifecycleEnvironment<E>) -> Self {
        Self {
            store: Store::new(state, LifecycleReducer::new(), environment),
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
        }
    }

    /// Set how long operations wait for their completion.
    #[must_use]
    pub const fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    /// Underlying store, for observers and custom dispatches.
    #[must_use]
    pub const fn store(&self) -> &LifecycleStore<E> {
        &self.store
    }

    /// Load the whole collection.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store is shutting down or no
    /// completion arrives within the response timeout. Transport failures
    /// are not errors here: they land in the view as `Failed`.
    pub async fn fetch_all(&self) -> Result<LifecycleView<E>, StoreError> {
        self.run(LifecycleAction::fetch_all()).await
    }

    /// Create a record from `draft`.
    ///
    /// # Errors
    ///
    /// See [`Tracker::fetch_all`].
    pub async fn create(&self, draft: E::Draft) -> Result<LifecycleView<E>, StoreError> {
        self.run(LifecycleAction::create(draft)).await
    }

    /// Partially update record `id`.
    ///
    /// # Errors
    ///
    /// See [`Tracker::fetch_all`].
    pub async fn update(
        &self,
        id: E::Id,
        patch: E::Patch,
    ) -> Result<LifecycleView<E>, StoreError> {
        self.run(LifecycleAction::update(id, patch)).await
    }

    /// Delete record `id`.
    ///
    /// # Errors
    ///
    /// See [`Tracker::fetch_all`].
    pub async fn delete(&self, id: E::Id) -> Result<LifecycleView<E>, StoreError> {
        self.run(LifecycleAction::delete(id)).await
    }

    /// Clear the error and success message.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn clear_messages(&self) -> Result<LifecycleView<E>, StoreError> {
        self.store.send(LifecycleAction::ClearMessages).await?;
        Ok(self.view().await)
    }

    /// Dispatch without waiting for the completion.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn dispatch(&self, action: LifecycleAction<E>) -> Result<EffectHandle, StoreError> {
        if let Some(kind) = action.kind().filter(|_| !action.is_completion()) {
            metrics::counter!("lifecycle.requests.total", "operation" => kind.as_str())
                .increment(1);
        }
        self.store.send(action).await
    }

    /// Current view.
    pub async fn view(&self) -> LifecycleView<E> {
        self.store.state(LifecycleView::of).await
    }

    /// Read the raw state via a closure.
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&LifecycleState<E>) -> T,
    {
        self.store.state(f).await
    }

    /// Stop accepting dispatches and wait for in-flight requests.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if requests are still running
    /// when `timeout` expires.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        self.store.shutdown(timeout).await
    }

    async fn run(&self, action: LifecycleAction<E>) -> Result<LifecycleView<E>, StoreError> {
        let request = action.request().unwrap_or_else(RequestId::new);
        let kind = action.kind();
        let operation = kind.map_or("unknown", OperationKind::as_str);

        metrics::counter!("lifecycle.requests.total", "operation" => operation).increment(1);
        tracing::debug!(operation, %request, "Dispatching request");

        // The effect handle settles only after the completion is reduced, so
        // a lagging broadcast receiver cannot turn an applied completion into
        // a timeout.
        let mut completions = self.store.subscribe_actions();
        let mut handle = self.store.send(action).await?;
        handle
            .wait_with_timeout(self.response_timeout)
            .await
            .inspect_err(|error| {
                tracing::warn!(operation, %request, %error, "No completion received");
            })?;

        let failed = match own_completion(&mut completions, request) {
            Some(completion) => completion.failure().is_some(),
            None => {
                tracing::debug!(operation, %request, "Completion not observed; reading state");
                self.state(|s| {
                    kind.is_some_and(|kind| {
                        let status = s.operations.get(kind);
                        status.latest_request == Some(request)
                            && status.state == RequestState::Failed
                    })
                })
                .await
            },
        };
        if failed {
            metrics::counter!("lifecycle.requests.failed", "operation" => operation).increment(1);
            tracing::info!(operation, %request, "Request failed");
        }

        Ok(self.view().await)
    }
}

/// Completion of `request` among the actions already broadcast, if the
/// receiver has not lagged past it.
fn own_completion<E: Entity>(
    completions: &mut broadcast::Receiver<LifecycleAction<E>>,
    request: RequestId,
) -> Option<LifecycleAction<E>> {
    loop {
        match completions.try_recv() {
            Ok(action) if action.completes(request) => return Some(action),
            Ok(_) | Err(broadcast::error::TryRecvError::Lagged(_)) => {},
            Err(_) => return None,
        }
    }
}
