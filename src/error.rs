//! Error taxonomy for the chat session.
//!
//! Every variant here is recovered at the session boundary: submission errors become a local
//! notice, transport and response errors become a single `error` message in the log, and
//! storage errors are logged and reported as a transient notice. None of them end the session.

use std::time::Duration;

/// Rejections raised by the submission entry guard. No message is logged and no request is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("Please enter a message")]
    EmptyInput,
    #[error("A request is already in flight")]
    Busy,
}

/// Failures of the outbound call itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Server error: {0}")]
    Status(u16),
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("network error: {0}")]
    Network(String),
    #[error("request worker exited before responding")]
    Disconnected,
}

/// A 2xx response whose body could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    #[error("invalid response body: {0}")]
    InvalidJson(String),
    #[error("invalid response body: expected a JSON object")]
    NotAnObject,
}

/// Persistence failures of the conversation slot.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write chat history: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize chat history: {0}")]
    Serialize(#[from] serde_json::Error),
}
