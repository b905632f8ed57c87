// --- File: crates/padelbook_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The single failure signal surfaced to every call site of the client.
///
/// Each variant carries a human-readable message suitable for showing next to
/// the form or list that triggered the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// A protected endpoint was called without a stored token. No request was sent.
    #[error("not authenticated")]
    Unauthenticated { endpoint: String },

    /// The backend rejected the stored token. The token has been cleared.
    #[error("Session expired. Please log in again.")]
    SessionExpired,

    /// Non-success status. The message is the backend's own text when it sent one.
    #[error("{message}")]
    BackendRejected { status: u16, message: String },

    /// No response at all (connection refused, DNS failure, timeout).
    #[error("Connection error: the server is not responding")]
    Unreachable(String),

    /// Rejected locally before any network call.
    #[error("{0}")]
    ValidationLocal(String),

    /// The backend answered with JSON we could not interpret.
    #[error("Failed to parse backend response: {0}")]
    Decode(String),

    /// The client-side session storage could not be read or written.
    #[error("Session storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// True for failures that mean "treat the user as logged out".
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthenticated { .. } | ClientError::SessionExpired
        )
    }

    /// The HTTP status behind this error, when there was a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::BackendRejected { status, .. } => Some(*status),
            ClientError::SessionExpired => Some(401),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Storage(err.to_string())
    }
}

pub fn validation_error<T: fmt::Display>(message: T) -> ClientError {
    ClientError::ValidationLocal(message.to_string())
}

pub fn backend_rejected<T: fmt::Display>(status: u16, message: T) -> ClientError {
    ClientError::BackendRejected {
        status,
        message: message.to_string(),
    }
}
