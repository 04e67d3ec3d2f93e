//! Failures reported by a transport.

use thiserror::Error;

/// Failure of one transport call.
///
/// Carried inside completion actions, so it is `Clone` and holds only
/// user-facing text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The server rejected the payload (HTTP 400), one message per field
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    /// The addressed record does not exist (HTTP 404)
    #[error("{0}")]
    NotFound(String),

    /// Network failure, timeout, or any other server error
    #[error("{0}")]
    Transport(String),
}

impl TransportError {
    /// Field messages of a validation failure, or the single message otherwise.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation(messages) => messages.clone(),
            Self::NotFound(message) | Self::Transport(message) => vec![message.clone()],
        }
    }
}
