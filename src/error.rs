//! Unified error types for siftboard.
//!
//! The dashboard is a pure client: every failure it can encounter is either
//! a transport problem reaching the backend, a payload that does not match
//! the wire contract, or an ambient concern (session store, config, IO).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for siftboard operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SiftError {
    /// The backend could not be reached, or answered with a non-2xx status.
    #[error("Backend request failed: {context}")]
    Transport {
        context: String,
        #[source]
        source: TransportErrorKind,
    },

    /// The backend answered 2xx but the payload does not match the contract.
    #[error("Malformed backend response: {context}")]
    Malformed {
        context: String,
        #[source]
        source: MalformedErrorKind,
    },

    /// Session store failures (corrupt document, unwritable path).
    #[error("Session store error: {0}")]
    Session(String),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Specific transport error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransportErrorKind {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Request could not be constructed: {0}")]
    Request(String),
}

/// Specific malformed-response kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MalformedErrorKind {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Invalid field value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Convenient Result type for siftboard operations
pub type Result<T> = std::result::Result<T, SiftError>;

impl SiftError {
    /// Create a transport error with context
    pub fn transport(context: impl Into<String>, source: TransportErrorKind) -> Self {
        Self::Transport {
            context: context.into(),
            source,
        }
    }

    /// Create a transport error for a network-level failure
    pub fn network(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::transport(context, TransportErrorKind::Network(message.into()))
    }

    /// Create a transport error for a non-success status
    pub fn status(context: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::transport(
            context,
            TransportErrorKind::Status {
                status,
                body: body.into(),
            },
        )
    }

    /// Create a malformed-response error with context
    pub fn malformed(context: impl Into<String>, source: MalformedErrorKind) -> Self {
        Self::Malformed {
            context: context.into(),
            source,
        }
    }

    /// Create a malformed-response error for a missing field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        let context = context.into();
        Self::Malformed {
            context: context.clone(),
            source: MalformedErrorKind::MissingField {
                field: field.into(),
                context,
            },
        }
    }

    /// Create a session store error
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// True for transport-class failures (reachability, status).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

impl From<std::io::Error> for SiftError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for SiftError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed(
            "JSON deserialization",
            MalformedErrorKind::InvalidJson(err.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_display() {
        let err = SiftError::status("submit text", 502, "bad gateway");
        let display = err.to_string();
        assert!(display.contains("submit text"), "got: {display}");
        assert!(err.is_transport());
    }

    #[test]
    fn test_malformed_display() {
        let err = SiftError::missing_field("routing", "analyze response");
        let display = err.to_string();
        assert!(display.contains("analyze response"), "got: {display}");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_io_carries_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = SiftError::io("/tmp/batch.csv", io_err);
        assert!(err.to_string().contains("/tmp/batch.csv"));
    }

    #[test]
    fn test_serde_error_maps_to_malformed() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{nope");
        let err: SiftError = parse.unwrap_err().into();
        assert!(matches!(err, SiftError::Malformed { .. }));
    }
}
