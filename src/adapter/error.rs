//! Adapter error types

use thiserror::Error;

/// Shown when no more specific failure message is available
pub const GENERIC_FAILURE: &str = "An unexpected error occurred.";

/// Adapter call failure with classification
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct AdapterError {
    pub kind: AdapterErrorKind,
    pub message: String,
    /// HTTP status, when a response arrived
    pub status: Option<u16>,
}

impl AdapterError {
    /// Blank messages degrade to [`GENERIC_FAILURE`]
    pub fn new(kind: AdapterErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message
        };
        Self {
            kind,
            message,
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// The call never produced a response
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(AdapterErrorKind::Transport, message)
    }

    /// Non-success status carrying the service's own error text
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::new(AdapterErrorKind::Remote, message).with_status(status)
    }

    /// Non-success status with nothing usable in the body
    pub fn status(status: u16) -> Self {
        Self::new(AdapterErrorKind::Status, GENERIC_FAILURE).with_status(status)
    }

    /// Success status but the body could not be read as JSON
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(AdapterErrorKind::Malformed, message)
    }

    /// Text stored in the turn's terminal answer
    pub fn reason(&self) -> &str {
        &self.message
    }
}

/// Failure classification, surfaced distinctly to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterErrorKind {
    /// Network failure, no response
    Transport,
    /// Non-2xx with an error body
    Remote,
    /// Non-2xx without a parseable error body
    Status,
    /// Unreadable success body
    Malformed,
}
