//! Core types for request lifecycle tracking.

use crate::error::TransportError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use uuid::Uuid;

/// A record of a server-side collection.
///
/// Ids are always assigned by the server: creating goes through
/// [`Entity::Draft`], which has no id field.
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    /// Server-assigned identifier
    type Id: Clone + Debug + Display + PartialEq + Send + Sync + 'static;

    /// Payload of a create request (no id)
    type Draft: Clone + Debug + Send + Sync + 'static;

    /// Payload of a partial update request
    type Patch: Clone + Debug + Send + Sync + 'static;

    /// Path segment of the collection, e.g. `"books"`
    const COLLECTION: &'static str;

    /// Singular human label used in messages, e.g. `"Book"`
    const LABEL: &'static str;

    /// The record's id
    fn id(&self) -> &Self::Id;
}

/// Identifies one dispatch and the completion that answers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generate a new request id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of one operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestState {
    /// Nothing dispatched yet, or cleared
    #[default]
    Idle,
    /// Waiting for the transport
    Loading,
    /// Last completion succeeded
    Succeeded,
    /// Last completion failed
    Failed,
}

impl RequestState {
    /// `Succeeded` or `Failed`
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// The four operations a tracker dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// `GET /{collection}`
    FetchAll,
    /// `POST /{collection}`
    Create,
    /// `PUT /{collection}/{id}`
    Update,
    /// `DELETE /{collection}/{id}`
    Delete,
}

impl OperationKind {
    /// Every kind, in dispatch-table order
    pub const ALL: [Self; 4] = [Self::FetchAll, Self::Create, Self::Update, Self::Delete];

    /// Stable name for logs and metrics labels
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FetchAll => "fetch_all",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Verb used in fallback error messages ("Failed to fetch books")
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::FetchAll => "fetch",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Status of one operation kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationStatus {
    /// Current lifecycle state
    pub state: RequestState,
    /// Most recently dispatched request of this kind
    pub latest_request: Option<RequestId>,
    /// When the last completion of this kind was applied
    pub settled_at: Option<DateTime<Utc>>,
}

/// Per-kind statuses, never shared between kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Operations {
    /// `fetch_all` status
    pub fetch_all: OperationStatus,
    /// `create` status
    pub create: OperationStatus,
    /// `update` status
    pub update: OperationStatus,
    /// `delete` status
    pub delete: OperationStatus,
}

impl Operations {
    /// Status of `kind`
    #[must_use]
    pub const fn get(&self, kind: OperationKind) -> &OperationStatus {
        match kind {
            OperationKind::FetchAll => &self.fetch_all,
            OperationKind::Create => &self.create,
            OperationKind::Update => &self.update,
            OperationKind::Delete => &self.delete,
        }
    }

    /// Mutable status of `kind`
    pub const fn get_mut(&mut self, kind: OperationKind) -> &mut OperationStatus {
        match kind {
            OperationKind::FetchAll => &mut self.fetch_all,
            OperationKind::Create => &mut self.create,
            OperationKind::Update => &mut self.update,
            OperationKind::Delete => &mut self.delete,
        }
    }
}

/// Tracker state for one collection.
#[derive(Debug, Clone)]
pub struct LifecycleState<E: Entity> {
    /// Entities in server order, unique by id
    pub collection: Vec<E>,
    /// Whether a fetch has ever succeeded
    pub loaded: bool,
    /// Per-kind statuses
    pub operations: Operations,
    /// Kind whose status changed most recently
    pub last_operation: Option<OperationKind>,
    /// Failure of the most recent failed completion; cleared on dispatch
    pub error: Option<TransportError>,
    /// Message of the most recent successful mutation; cleared on dispatch
    pub success_message: Option<String>,
}

impl<E: Entity> Default for LifecycleState<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> LifecycleState<E> {
    /// Empty, idle state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            collection: Vec::new(),
            loaded: false,
            operations: Operations {
                fetch_all: OperationStatus::idle(),
                create: OperationStatus::idle(),
                update: OperationStatus::idle(),
                delete: OperationStatus::idle(),
            },
            last_operation: None,
            error: None,
            success_message: None,
        }
    }

    /// State already holding `collection`, as after a successful fetch
    #[must_use]
    pub fn with_collection(collection: Vec<E>) -> Self {
        Self {
            collection,
            loaded: true,
            ..Self::new()
        }
    }

    /// Status of `kind`
    #[must_use]
    pub const fn status(&self, kind: OperationKind) -> RequestState {
        self.operations.get(kind).state
    }

    /// Position of the entity with `id`, by linear scan
    #[must_use]
    pub fn position(&self, id: &E::Id) -> Option<usize> {
        self.collection.iter().position(|e| e.id() == id)
    }

    /// Entity with `id`
    #[must_use]
    pub fn get(&self, id: &E::Id) -> Option<&E> {
        self.collection.iter().find(|e| e.id() == id)
    }

    /// Number of entities
    #[must_use]
    pub fn count(&self) -> usize {
        self.collection.len()
    }
}

impl OperationStatus {
    /// Fresh idle status
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            state: RequestState::Idle,
            latest_request: None,
            settled_at: None,
        }
    }
}
