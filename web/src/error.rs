//! Error types for web handlers.
//!
//! Bridges domain errors and HTTP responses. Every failure is rendered as
//! the envelope `{"success": false, "error": ...}` where `error` is either a
//! single message or, for validation failures, the list of field messages.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

/// User-facing error detail: one message or a list of field messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// A single human-readable message
    Message(String),
    /// One message per violated field
    Fields(Vec<String>),
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(message) => f.write_str(message),
            Self::Fields(messages) => f.write_str(&messages.join("; ")),
        }
    }
}

/// Application error type for web handlers.
///
/// Implements Axum's `IntoResponse`, so handlers can return
/// `Result<_, AppError>` and use `?` on domain results that convert into it.
///
/// # Examples
///
/// ```ignore
/// async fn handler(Path(id): Path<u64>) -> Result<Json<Item>, AppError> {
///     let item = store.get(id).await.ok_or_else(|| AppError::not_found("Item"))?;
///     Ok(Json(item))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    detail: ErrorDetail,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, detail: ErrorDetail) -> Self {
        Self {
            status,
            detail,
            source: None,
        }
    }

    /// Attach an internal source error (logged, never sent to the client).
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 400 Bad Request error with a single message.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorDetail::Message(message.into()))
    }

    /// Create a 400 Bad Request error listing every violated field.
    #[must_use]
    pub const fn validation(messages: Vec<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorDetail::Fields(messages))
    }

    /// Create a 404 Not Found error for a resource label, e.g. `"Item not found"`.
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            ErrorDetail::Message(format!("{resource} not found")),
        )
    }

    /// Create a 404 for a path that matches no route.
    #[must_use]
    pub fn route_not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            ErrorDetail::Message("Route not found".to_string()),
        )
    }

    /// Create a 500 Internal Server Error with the generic client message.
    #[must_use]
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorDetail::Message("Server error".to_string()),
        )
    }

    /// HTTP status of this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Client-facing detail of this error.
    #[must_use]
    pub const fn detail(&self) -> &ErrorDetail {
        &self.detail
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.detail)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorDetail,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            match &self.source {
                Some(source) => tracing::error!(
                    status = %self.status,
                    error = %source,
                    "Internal server error"
                ),
                None => tracing::error!(status = %self.status, "Internal server error"),
            }
        } else {
            tracing::debug!(status = %self.status, detail = %self.detail, "Request rejected");
        }

        let body = ErrorResponse {
            success: false,
            error: self.detail,
        };

        (self.status, Json(body)).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal().with_source(err)
    }
}

/// Malformed or mistyped JSON bodies are client errors.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::bad_request("Invalid input");
        assert_eq!(err.to_string(), "[400] Invalid input");
    }

    #[test]
    fn test_not_found() {
        let err = AppError::not_found("Item");
        assert_eq!(err.to_string(), "[404] Item not found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_lists_fields() {
        let err = AppError::validation(vec![
            "name is required".to_string(),
            "description is required".to_string(),
        ]);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "[400] name is required; description is required"
        );
    }

    #[test]
    fn test_detail_serializes_untagged() {
        let single = serde_json::to_value(ErrorDetail::Message("x".to_string())).unwrap();
        let list = serde_json::to_value(ErrorDetail::Fields(vec!["a".to_string()])).unwrap();
        assert_eq!(single, serde_json::json!("x"));
        assert_eq!(list, serde_json::json!(["a"]));
    }

    #[test]
    fn test_anyhow_is_internal() {
        let err = AppError::from(anyhow::anyhow!("disk on fire"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.detail(), &ErrorDetail::Message("Server error".to_string()));
        assert!(std::error::Error::source(&err).is_some());
    }
}
