//! API-specific error types
//!
//! Every variant is a transport/HTTP failure of one backend call, except
//! `Config` which is raised before any request is made.

use ewiki_domain::EwikiError;
use thiserror::Error;

/// Wiki API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response: connection refused, reset, timeout.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("{url} returned status {status}{}", format_body(.body))]
    Status { status: u16, url: String, body: String },

    /// Response body was not valid JSON of the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn format_body(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

impl ApiError {
    /// HTTP status of a `Status` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<ApiError> for EwikiError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(message) => Self::Network(message),
            ApiError::Status { .. } => Self::Http(err.to_string()),
            ApiError::Decode(message) => Self::Decode(message),
            ApiError::Config(message) => Self::Config(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_includes_body() {
        let err = ApiError::Status {
            status: 404,
            url: "http://localhost:3000/api/acme/project".into(),
            body: r#"{"detail":"Project not found"}"#.into(),
        };
        assert_eq!(
            err.to_string(),
            r#"http://localhost:3000/api/acme/project returned status 404: {"detail":"Project not found"}"#
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn converts_into_domain_error() {
        let status = ApiError::Status { status: 500, url: "u".into(), body: String::new() };
        assert_eq!(EwikiError::from(status), EwikiError::Http("u returned status 500".into()));
        assert!(matches!(
            EwikiError::from(ApiError::Network("refused".into())),
            EwikiError::Network(_)
        ));
        assert_eq!(ApiError::Decode("x".into()).status(), None);
    }
}
