//! Application context shared with handlers.

use crate::domain::{Book, Item, Task};
use crate::seed;
use crate::store::CollectionStore;
use axum::extract::FromRef;
use composable_crud_core::environment::Clock;
use std::sync::Arc;

/// Owns every collection store.
///
/// Cloned (cheaply via `Arc`) for each request; handlers extract the store
/// they need through [`FromRef`].
#[derive(Clone)]
pub struct AppContext {
    /// `/api/items`
    pub items: Arc<CollectionStore<Item>>,
    /// `/api/books`
    pub books: Arc<CollectionStore<Book>>,
    /// `/api/tasks`
    pub tasks: Arc<CollectionStore<Task>>,
}

impl AppContext {
    /// Context with empty collections.
    #[must_use]
    pub fn empty(clock: Arc<dyn Clock>) -> Self {
        Self {
            items: Arc::new(CollectionStore::new(Arc::clone(&clock))),
            books: Arc::new(CollectionStore::new(Arc::clone(&clock))),
            tasks: Arc::new(CollectionStore::new(clock)),
        }
    }

    /// Context with the sample items and books; tasks start empty.
    #[must_use]
    pub fn seeded(clock: Arc<dyn Clock>) -> Self {
        Self {
            items: Arc::new(CollectionStore::with_records(seed::items(), Arc::clone(&clock))),
            books: Arc::new(CollectionStore::with_records(seed::books(), Arc::clone(&clock))),
            tasks: Arc::new(CollectionStore::new(clock)),
        }
    }
}

impl FromRef<AppContext> for Arc<CollectionStore<Item>> {
    fn from_ref(ctx: &AppContext) -> Self {
        Arc::clone(&ctx.items)
    }
}

impl FromRef<AppContext> for Arc<CollectionStore<Book>> {
    fn from_ref(ctx: &AppContext) -> Self {
        Arc::clone(&ctx.books)
    }
}

impl FromRef<AppContext> for Arc<CollectionStore<Task>> {
    fn from_ref(ctx: &AppContext) -> Self {
        Arc::clone(&ctx.tasks)
    }
}
