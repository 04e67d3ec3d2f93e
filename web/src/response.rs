//! Success envelopes.
//!
//! Successful responses share the shape
//! `{"success": true, "count"?: n, "data": ..., "message"?: "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON body of a successful response.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    /// Always `true`
    pub success: bool,
    /// Number of records, present on collection listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Payload
    pub data: T,
    /// Human-readable note, e.g. after a deletion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A success envelope paired with its status code.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    status: StatusCode,
    body: Envelope<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with a single record.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self::with_status(StatusCode::OK, data)
    }

    /// 201 with the created record.
    #[must_use]
    pub const fn created(data: T) -> Self {
        Self::with_status(StatusCode::CREATED, data)
    }

    const fn with_status(status: StatusCode, data: T) -> Self {
        Self {
            status,
            body: Envelope {
                success: true,
                count: None,
                data,
                message: None,
            },
        }
    }

    /// Attach a message to the envelope.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.body.message = Some(message.into());
        self
    }

    /// Status code this response will be sent with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// 200 with a listing and its `count`.
    #[must_use]
    pub fn list(data: Vec<T>) -> Self {
        let mut response = Self::ok(data);
        response.body.count = Some(response.body.data.len());
        response
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
