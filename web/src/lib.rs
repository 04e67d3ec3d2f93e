//! Axum web framework integration for Composable CRUD.
//!
//! Provides the HTTP edge shared by services: error mapping into the
//! `{"success": false, "error": ...}` envelope, success envelopes, and the
//! health and fallback handlers.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Extract** and validate the typed body
//! 3. **Call** the owned store injected through router state
//! 4. **Map** the outcome to an [`ApiResponse`] or an [`AppError`]
//!
//! # Example
//!
//! ```ignore
//! use composable_crud_web::{ApiResponse, AppError};
//!
//! async fn get_item(
//!     State(items): State<Arc<ItemStore>>,
//!     Path(id): Path<u64>,
//! ) -> Result<ApiResponse<Item>, AppError> {
//!     let item = items.get(id).await.ok_or_else(|| AppError::not_found("Item"))?;
//!     Ok(ApiResponse::ok(item))
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod handlers;
pub mod response;

pub use error::{AppError, ErrorDetail};
pub use response::{ApiResponse, Envelope};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
