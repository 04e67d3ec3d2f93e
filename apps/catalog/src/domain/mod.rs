//! Catalog resources and their validation rules.
//!
//! Request bodies are deserialized into typed drafts and patches whose
//! fields are all optional, then validated into a record or a list of
//! field messages before any collection is touched.

pub mod book;
pub mod item;
pub mod task;

pub use book::{Book, BookDraft, BookPatch};
pub use item::{Item, ItemDraft, ItemPatch};
pub use task::{Category, Priority, Task, TaskDraft, TaskPatch, TaskStatus};

use chrono::{DateTime, Utc};
use composable_crud_web::AppError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// A record type served under `/api/{COLLECTION}`.
pub trait Resource: Clone + Serialize + Send + Sync + 'static {
    /// Body of a create request
    type Draft: DeserializeOwned + Send + 'static;

    /// Body of a partial update request
    type Patch: DeserializeOwned + Send + 'static;

    /// Path segment, e.g. `"items"`
    const COLLECTION: &'static str;

    /// Singular label used in messages, e.g. `"Item"`
    const LABEL: &'static str;

    /// Server-assigned id
    fn record_id(&self) -> u64;

    /// Validate `draft` into a record with `id`.
    ///
    /// # Errors
    ///
    /// Returns every violated field rule.
    fn from_draft(id: u64, draft: Self::Draft, now: DateTime<Utc>)
    -> Result<Self, ValidationErrors>;

    /// Apply the fields present in `patch`.
    ///
    /// Implementations validate before assigning, so `self` is unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns every violated field rule.
    fn apply(&mut self, patch: Self::Patch, now: DateTime<Utc>) -> Result<(), ValidationErrors>;

    /// Rules that depend on the rest of the collection, e.g. unique keys.
    fn conflicts(&self, _others: &[Self]) -> ValidationErrors {
        ValidationErrors::new()
    }

    /// Listing order; insertion order unless overridden.
    fn arrange(_records: &mut [Self]) {}
}

/// Field-level validation messages, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    /// No violations.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Record a violation.
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// Record `message` unless `ok`.
    pub fn check(&mut self, ok: bool, message: impl Into<String>) {
        if !ok {
            self.push(message);
        }
    }

    /// Whether no rule was violated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Violation messages.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// `Ok(value)` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns `self` if any rule was violated.
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join("; "))
    }
}

/// Trimmed, non-blank text or `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Errors returned by collection stores.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Body violated one or more field rules
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// No record with the requested id
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl From<ValidationErrors> for CatalogError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<CatalogError> for AppError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::Validation(errors) => Self::validation(errors.0),
            CatalogError::NotFound(label) => Self::not_found(label),
        }
    }
}
