//! Router configuration for the catalog service.

use crate::api;
use crate::context::AppContext;
use crate::domain::{Book, Item, Resource, Task};
use crate::store::CollectionStore;
use axum::{Router, extract::FromRef, routing::get};
use composable_crud_web::handlers::{health_check, not_found};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// CRUD routes for one collection, mounted under `/api/{R::COLLECTION}`.
fn collection_routes<R: Resource>() -> Router<AppContext>
where
    Arc<CollectionStore<R>>: FromRef<AppContext>,
{
    Router::new()
        .route("/", get(api::list::<R>).post(api::create::<R>))
        .route(
            "/:id",
            get(api::get::<R>)
                .put(api::update::<R>)
                .delete(api::delete::<R>),
        )
}

/// Build the complete Axum router.
///
/// - `GET /` welcome message
/// - `GET /health` liveness
/// - `/api/items`, `/api/books`, `/api/tasks` CRUD
/// - JSON 404 for everything else
pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(api::welcome))
        .route("/health", get(health_check))
        .nest(&format!("/api/{}", Item::COLLECTION), collection_routes::<Item>())
        .nest(&format!("/api/{}", Book::COLLECTION), collection_routes::<Book>())
        .nest(&format!("/api/{}", Task::COLLECTION), collection_routes::<Task>())
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(ctx)
}
