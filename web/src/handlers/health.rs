//! Health check and fallback endpoints.

use crate::error::AppError;
use axum::{Json, http::StatusCode};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: &'static str,
    /// Service version
    pub version: &'static str,
}

/// Liveness endpoint.
///
/// Returns 200 OK while the process is serving requests; it does not probe
/// dependencies.
///
/// ```text
/// GET /health
/// {"status":"ok","version":"0.1.0"}
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

/// Router fallback: every unmatched path is a JSON 404.
#[allow(clippy::unused_async)]
pub async fn not_found() -> AppError {
    AppError::route_not_found()
}
