//! In-memory collection stores.

use crate::domain::{CatalogError, Resource};
use composable_crud_core::environment::Clock;
use std::sync::Arc;
use tokio::sync::RwLock;

struct Records<R> {
    records: Vec<R>,
    next_id: u64,
}

/// Owned, lock-protected collection of one resource type.
///
/// Ids come from a per-collection counter and are never reused, even after
/// deletion. Every mutation validates first and touches the records only
/// on success.
pub struct CollectionStore<R: Resource> {
    inner: RwLock<Records<R>>,
    clock: Arc<dyn Clock>,
}

impl<R: Resource> CollectionStore<R> {
    /// Empty collection; the first id is 1.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_records(Vec::new(), clock)
    }

    /// Collection starting with `records`; the counter continues after the largest id.
    #[must_use]
    pub fn with_records(records: Vec<R>, clock: Arc<dyn Clock>) -> Self {
        let next_id = records.iter().map(R::record_id).max().unwrap_or(0) + 1;
        Self {
            inner: RwLock::new(Records { records, next_id }),
            clock,
        }
    }

    /// Every record in listing order.
    pub async fn list(&self) -> Vec<R> {
        let mut records = self.inner.read().await.records.clone();
        R::arrange(&mut records);
        records
    }

    /// Number of records.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    /// Whether the collection is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }

    /// Record `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no record has `id`.
    pub async fn get(&self, id: u64) -> Result<R, CatalogError> {
        self.inner
            .read()
            .await
            .records
            .iter()
            .find(|r| r.record_id() == id)
            .cloned()
            .ok_or(CatalogError::NotFound(R::LABEL))
    }

    /// Validate `draft` and append it under the next id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] listing every violated rule.
    pub async fn create(&self, draft: R::Draft) -> Result<R, CatalogError> {
        let mut inner = self.inner.write().await;

        let record = R::from_draft(inner.next_id, draft, self.clock.now())?;
        record.conflicts(&inner.records).finish(())?;

        inner.next_id += 1;
        inner.records.push(record.clone());
        tracing::debug!(collection = R::COLLECTION, id = record.record_id(), "Record created");
        Ok(record)
    }

    /// Apply `patch` to record `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no record has `id`, or
    /// [`CatalogError::Validation`] if the patch violates a rule.
    pub async fn update(&self, id: u64, patch: R::Patch) -> Result<R, CatalogError> {
        let mut inner = self.inner.write().await;

        let index = inner
            .records
            .iter()
            .position(|r| r.record_id() == id)
            .ok_or(CatalogError::NotFound(R::LABEL))?;

        let mut updated = inner.records[index].clone();
        updated.apply(patch, self.clock.now())?;

        let others: Vec<R> = inner
            .records
            .iter()
            .filter(|r| r.record_id() != id)
            .cloned()
            .collect();
        updated.conflicts(&others).finish(())?;

        inner.records[index] = updated.clone();
        tracing::debug!(collection = R::COLLECTION, id, "Record updated");
        Ok(updated)
    }

    /// Remove record `id` and return it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no record has `id`.
    pub async fn delete(&self, id: u64) -> Result<R, CatalogError> {
        let mut inner = self.inner.write().await;

        let index = inner
            .records
            .iter()
            .position(|r| r.record_id() == id)
            .ok_or(CatalogError::NotFound(R::LABEL))?;

        let removed = inner.records.remove(index);
        tracing::debug!(collection = R::COLLECTION, id, "Record deleted");
        Ok(removed)
    }
}
