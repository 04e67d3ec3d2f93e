//! # Catalog
//!
//! In-memory REST API for items, books, and tasks, plus a client demo that
//! drives it through the request lifecycle tracker.
//!
//! # Architecture
//!
//! - **Domain**: typed records, drafts, and patches with field validation
//! - **Stores**: one [`CollectionStore`] per collection, owned by [`AppContext`]
//! - **API**: generic Axum handlers returning the shared JSON envelopes
//!
//! # Example
//!
//! ```ignore
//! let ctx = AppContext::seeded(Arc::new(SystemClock));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, build_router(ctx)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod context;
pub mod domain;
pub mod router;
pub mod seed;
pub mod store;

pub use config::Config;
pub use context::AppContext;
pub use domain::{CatalogError, Resource, ValidationErrors};
pub use router::build_router;
pub use store::CollectionStore;
