//! Root endpoint.

use crate::domain::{Book, Item, Resource, Task};
use axum::Json;
use serde::Serialize;

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct Welcome {
    /// Greeting
    pub message: &'static str,
    /// Collections served under `/api`
    pub collections: [&'static str; 3],
}

/// Greeting listing the available collections.
#[allow(clippy::unused_async)]
pub async fn welcome() -> Json<Welcome> {
    Json(Welcome {
        message: "Welcome to the Catalog API",
        collections: [Item::COLLECTION, Book::COLLECTION, Task::COLLECTION],
    })
}
