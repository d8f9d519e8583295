//! Conversions from external infrastructure errors into domain errors.

use ewiki_domain::EwikiError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub EwikiError);

impl From<InfraError> for EwikiError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

trait IntoEwikiError {
    fn into_ewiki(self) -> EwikiError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → EwikiError */
/* -------------------------------------------------------------------------- */

impl IntoEwikiError for HttpError {
    fn into_ewiki(self) -> EwikiError {
        if self.is_timeout() {
            return EwikiError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return EwikiError::Network(format!("HTTP connection failure: {self}"));
        }

        if let Some(status) = self.status() {
            return EwikiError::Http(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            ));
        }

        if self.is_decode() {
            return EwikiError::Decode(self.to_string());
        }

        if self.is_builder() {
            return EwikiError::Config(format!("invalid HTTP request: {self}"));
        }

        EwikiError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_ewiki())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → EwikiError */
/* -------------------------------------------------------------------------- */

impl IntoEwikiError for JsonError {
    fn into_ewiki(self) -> EwikiError {
        EwikiError::Decode(format!("invalid JSON at line {} column {}: {self}", self.line(), self.column()))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_ewiki())
    }
}
