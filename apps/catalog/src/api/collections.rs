//! Generic collection endpoints.

use crate::domain::Resource;
use crate::store::CollectionStore;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use composable_crud_web::{ApiResponse, AppError, WebResult};
use std::sync::Arc;

/// Collection store extracted from the application context.
type Collection<R> = State<Arc<CollectionStore<R>>>;

/// Ids that are not non-negative integers cannot exist, so they are 404s.
fn parse_id<R: Resource>(raw: &str) -> Result<u64, AppError> {
    raw.parse().map_err(|_| AppError::not_found(R::LABEL))
}

/// List every record.
///
/// ```bash
/// curl http://localhost:5000/api/books
/// ```
pub async fn list<R: Resource>(State(store): Collection<R>) -> ApiResponse<Vec<R>> {
    ApiResponse::list(store.list().await)
}

/// Get one record.
///
/// # Errors
///
/// 404 if the id is unknown or not numeric.
pub async fn get<R: Resource>(
    State(store): Collection<R>,
    Path(id): Path<String>,
) -> WebResult<ApiResponse<R>> {
    let id = parse_id::<R>(&id)?;
    Ok(ApiResponse::ok(store.get(id).await?))
}

/// Create a record from the JSON body.
///
/// ```bash
/// curl -X POST http://localhost:5000/api/books \
///   -H "Content-Type: application/json" \
///   -d '{"title": "Beloved", "author": "Toni Morrison"}'
/// ```
///
/// # Errors
///
/// 400 with every violated field, or with a single message for malformed JSON.
pub async fn create<R: Resource>(
    State(store): Collection<R>,
    body: Result<Json<R::Draft>, JsonRejection>,
) -> WebResult<ApiResponse<R>> {
    let Json(draft) = body?;
    let record = store.create(draft).await?;
    tracing::info!(collection = R::COLLECTION, id = record.record_id(), "Created");
    Ok(ApiResponse::created(record))
}

/// Apply the fields present in the JSON body.
///
/// # Errors
///
/// 404 if the id is unknown; 400 if the body is malformed or violates a rule.
pub async fn update<R: Resource>(
    State(store): Collection<R>,
    Path(id): Path<String>,
    body: Result<Json<R::Patch>, JsonRejection>,
) -> WebResult<ApiResponse<R>> {
    let id = parse_id::<R>(&id)?;
    let Json(patch) = body?;
    let record = store.update(id, patch).await?;
    tracing::info!(collection = R::COLLECTION, id, "Updated");
    Ok(ApiResponse::ok(record))
}

/// Delete a record and return it.
///
/// # Errors
///
/// 404 if the id is unknown.
pub async fn delete<R: Resource>(
    State(store): Collection<R>,
    Path(id): Path<String>,
) -> WebResult<ApiResponse<R>> {
    let id = parse_id::<R>(&id)?;
    let removed = store.delete(id).await?;
    tracing::info!(collection = R::COLLECTION, id, "Deleted");
    Ok(ApiResponse::ok(removed).with_message(format!("{} deleted successfully", R::LABEL)))
}
