//! Axum middleware layers applied to the router.
//!
//! Includes request-id assignment, request tracing, timeout enforcement, and
//! response compression.

use std::time::Duration;

use axum::http::HeaderName;

/// Default per-request timeout applied to all routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");
