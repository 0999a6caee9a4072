//! Uniform JSON response construction.
//!
//! Every handler path ends in exactly one call to a function here, which
//! builds the whole response (status, `content-type`, body) at once.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::{protocol::ErrorResponse, ServiceError};
use serde::Serialize;

use crate::validation::ValidationErrors;

/// Serialise `payload` as the JSON body of a response with `status`.
pub fn json<T: Serialize>(status: StatusCode, payload: &T) -> Response {
    (status, Json(payload)).into_response()
}

/// `{"status":"Error","error":message}` with `status`.
pub fn general_error(status: StatusCode, message: impl Into<String>) -> Response {
    json(status, &ErrorResponse::general(message))
}

/// 400 listing every failed field.
pub fn validation_error(errors: &ValidationErrors) -> Response {
    json(
        StatusCode::BAD_REQUEST,
        &ErrorResponse::validation(errors.to_field_errors()),
    )
}

/// Render a [`ServiceError`] with its mapped status code.
pub fn service_error(err: &ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match err {
        ServiceError::Validation(_) => json(status, &err.to_body()),
        _ => general_error(status, err.to_string()),
    }
}
