//! Common error types shared across crates.

use thiserror::Error;

use crate::protocol::{join_messages, ErrorResponse, FieldError};

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::Validation`] → 400
/// - [`ServiceError::NotFound`] → 404
/// - [`ServiceError::Storage`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request could not be decoded: empty body, malformed JSON, wrong
    /// field types, or an unparsable path parameter.
    #[error("{0}")]
    BadRequest(String),

    /// The request decoded but one or more fields failed their constraints.
    #[error("{}", join_messages(.0))]
    Validation(Vec<FieldError>),

    /// No route matches the request.
    #[error("{0}")]
    NotFound(String),

    /// The storage backend failed to persist or look up a record.
    #[error("{0}")]
    Storage(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::Validation(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::Storage(_) => 500,
        }
    }

    /// Build the JSON body sent to the caller for this error.
    pub fn to_body(&self) -> ErrorResponse {
        match self {
            ServiceError::Validation(errors) => ErrorResponse::validation(errors.clone()),
            other => ErrorResponse::general(other.to_string()),
        }
    }
}
