//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use careerdeck_domain::CareerDeckError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CareerDeckError);

impl From<InfraError> for CareerDeckError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CareerDeckError> for InfraError {
    fn from(value: CareerDeckError) -> Self {
        InfraError(value)
    }
}

trait IntoCareerDeckError {
    fn into_careerdeck(self) -> CareerDeckError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → CareerDeckError */
/* -------------------------------------------------------------------------- */

impl IntoCareerDeckError for HttpError {
    fn into_careerdeck(self) -> CareerDeckError {
        if self.is_timeout() {
            return CareerDeckError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return CareerDeckError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return CareerDeckError::Network(format!("unreadable HTTP response body: {self}"));
        }

        if let Some(status) = self.status() {
            return status_error(status, None);
        }

        CareerDeckError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_careerdeck())
    }
}

/// Classify a non-success HTTP status.
pub fn status_error(status: reqwest::StatusCode, detail: Option<&str>) -> CareerDeckError {
    let code = status.as_u16();
    let mut message = format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));
    if let Some(detail) = detail.map(str::trim).filter(|detail| !detail.is_empty()) {
        message.push_str(": ");
        message.push_str(detail);
    }

    match code {
        401 | 403 => CareerDeckError::Auth(message),
        404 => CareerDeckError::NotFound(message),
        429 => CareerDeckError::Network(message),
        400..=499 => CareerDeckError::InvalidInput(message),
        _ => CareerDeckError::Network(message),
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → CareerDeckError */
/* -------------------------------------------------------------------------- */

impl IntoCareerDeckError for IoError {
    fn into_careerdeck(self) -> CareerDeckError {
        match self.kind() {
            ErrorKind::NotFound => CareerDeckError::NotFound(format!("file not found: {self}")),
            ErrorKind::PermissionDenied => {
                CareerDeckError::Storage(format!("permission denied: {self}"))
            }
            _ => CareerDeckError::Storage(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_careerdeck())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → CareerDeckError */
/* -------------------------------------------------------------------------- */

impl IntoCareerDeckError for JsonError {
    fn into_careerdeck(self) -> CareerDeckError {
        if self.is_io() {
            return CareerDeckError::Storage(format!("JSON I/O failure: {self}"));
        }
        CareerDeckError::Storage(format!("invalid JSON at line {}: {self}", self.line()))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_careerdeck())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
