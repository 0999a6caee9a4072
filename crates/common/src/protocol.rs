//! Request and response bodies exchanged over the public HTTP API.
//!
//! Every body is JSON. Success bodies carry an `"OK"` marker, error bodies
//! carry `"status": "Error"` plus a message and, for validation failures, one
//! entry per offending field.

use serde::{Deserialize, Serialize};

/// Marker value used in successful response bodies.
pub const STATUS_OK: &str = "OK";

/// Marker value used in error response bodies.
pub const STATUS_ERROR: &str = "Error";

// ---------------------------------------------------------------------------
// Create endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /api/students`.
///
/// Every field is optional at the decoding stage so that a missing field is
/// reported by validation (with the field name) rather than by the decoder.
/// A field present with the wrong JSON type is still a decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
}

/// Successful response body for `POST /api/students`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudentResponse {
    /// Always [`STATUS_OK`].
    pub success: String,
    /// Identifier assigned to the new record.
    pub id: i64,
}

impl CreateStudentResponse {
    pub fn ok(id: i64) -> Self {
        Self {
            success: STATUS_OK.into(),
            id,
        }
    }
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// A single failed field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// JSON name of the offending field (e.g. `"email"`).
    pub field: String,
    /// Human-readable reason, e.g. `"email is a required field"`.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Join the messages of `errors` into one `", "`-separated line.
pub fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always [`STATUS_ERROR`].
    pub status: String,
    /// Human-readable description safe to expose to callers.
    pub error: String,
    /// Per-field violations; omitted when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] carrying a single message.
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.into(),
            error: message.into(),
            errors: Vec::new(),
        }
    }

    /// Construct an [`ErrorResponse`] listing every field violation.
    ///
    /// The top-level `error` joins the individual messages so that clients
    /// which only read `error` still see every problem.
    pub fn validation(errors: Vec<FieldError>) -> Self {
        let error = join_messages(&errors);
        Self {
            status: STATUS_ERROR.into(),
            error,
            errors,
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always [`STATUS_OK`] while the process is serving.
    pub status: String,
    /// Deployment environment the service was started in.
    pub env: String,
    /// Crate version of the running binary.
    pub version: String,
}
