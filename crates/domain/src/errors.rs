//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for EWiki
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum EwikiError {
    /// The request never produced a response (connect failure, reset, DNS).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The response body was not the JSON shape the operation expects.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl EwikiError {
    /// Stable label suitable for structured logging fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Http(_) => "http",
            Self::Decode(_) => "decode",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether this error is a transport/HTTP failure of a backend call.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Http(_) | Self::Decode(_))
    }
}

impl From<std::io::Error> for EwikiError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for EWiki operations
pub type Result<T> = std::result::Result<T, EwikiError>;
