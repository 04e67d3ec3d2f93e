//! Actions for request lifecycle tracking.

use crate::error::TransportError;
use crate::types::{Entity, OperationKind, RequestId};

/// Actions processed by the `LifecycleReducer`.
///
/// Dispatch actions start an operation and mark its kind `Loading`.
/// Completion actions are produced by the transport effect and echo the
/// [`RequestId`] of the dispatch they answer.
#[derive(Debug, Clone)]
pub enum LifecycleAction<E: Entity> {
    /// Load the whole collection.
    FetchAll {
        /// Correlates this dispatch with its completion
        request: RequestId,
    },

    /// Create a record from a draft; the server assigns the id.
    Create {
        /// Correlates this dispatch with its completion
        request: RequestId,
        /// Fields of the new record
        draft: E::Draft,
    },

    /// Apply a partial update to one record.
    Update {
        /// Correlates this dispatch with its completion
        request: RequestId,
        /// Record to update
        id: E::Id,
        /// Fields to change
        patch: E::Patch,
    },

    /// Delete one record.
    Delete {
        /// Correlates this dispatch with its completion
        request: RequestId,
        /// Record to delete
        id: E::Id,
    },

    /// Clear the error and success message and return settled kinds to `Idle`.
    ClearMessages,

    /// Completion of `FetchAll`.
    Fetched {
        /// Request being answered
        request: RequestId,
        /// Whole collection in server order, or the failure
        result: Result<Vec<E>, TransportError>,
    },

    /// Completion of `Create`.
    Created {
        /// Request being answered
        request: RequestId,
        /// Server's representation of the new record, or the failure
        result: Result<E, TransportError>,
    },

    /// Completion of `Update`.
    Updated {
        /// Request being answered
        request: RequestId,
        /// Record that was addressed
        id: E::Id,
        /// Server's representation of the updated record, or the failure
        result: Result<E, TransportError>,
    },

    /// Completion of `Delete`.
    Deleted {
        /// Request being answered
        request: RequestId,
        /// Record that was addressed
        id: E::Id,
        /// Acknowledgement, or the failure
        result: Result<(), TransportError>,
    },
}

impl<E: Entity> LifecycleAction<E> {
    /// Start a fetch with a fresh request id.
    #[must_use]
    pub fn fetch_all() -> Self {
        Self::FetchAll {
            request: RequestId::new(),
        }
    }

    /// Start a create with a fresh request id.
    #[must_use]
    pub fn create(draft: E::Draft) -> Self {
        Self::Create {
            request: RequestId::new(),
            draft,
        }
    }

    /// Start an update with a fresh request id.
    #[must_use]
    pub fn update(id: E::Id, patch: E::Patch) -> Self {
        Self::Update {
            request: RequestId::new(),
            id,
            patch,
        }
    }

    /// Start a delete with a fresh request id.
    #[must_use]
    pub fn delete(id: E::Id) -> Self {
        Self::Delete {
            request: RequestId::new(),
            id,
        }
    }

    /// Operation kind this action starts or completes.
    #[must_use]
    pub const fn kind(&self) -> Option<OperationKind> {
        match self {
            Self::FetchAll { .. } | Self::Fetched { .. } => Some(OperationKind::FetchAll),
            Self::Create { .. } | Self::Created { .. } => Some(OperationKind::Create),
            Self::Update { .. } | Self::Updated { .. } => Some(OperationKind::Update),
            Self::Delete { .. } | Self::Deleted { .. } => Some(OperationKind::Delete),
            Self::ClearMessages => None,
        }
    }

    /// Request id carried by this action.
    #[must_use]
    pub const fn request(&self) -> Option<RequestId> {
        match self {
            Self::FetchAll { request }
            | Self::Create { request, .. }
            | Self::Update { request, .. }
            | Self::Delete { request, .. }
            | Self::Fetched { request, .. }
            | Self::Created { request, .. }
            | Self::Updated { request, .. }
            | Self::Deleted { request, .. } => Some(*request),
            Self::ClearMessages => None,
        }
    }

    /// Whether this is a completion (produced by the transport effect).
    #[must_use]
    pub const fn is_completion(&self) -> bool {
        matches!(
            self,
            Self::Fetched { .. }
                | Self::Created { .. }
                | Self::Updated { .. }
                | Self::Deleted { .. }
        )
    }

    /// Whether this is the completion answering `request`.
    #[must_use]
    pub fn completes(&self, request: RequestId) -> bool {
        self.is_completion() && self.request() == Some(request)
    }

    /// Failure carried by a completion, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&TransportError> {
        match self {
            Self::Fetched { result: Err(e), .. }
            | Self::Created { result: Err(e), .. }
            | Self::Updated { result: Err(e), .. }
            | Self::Deleted { result: Err(e), .. } => Some(e),
            _ => None,
        }
    }
}
