//! Axum request handlers for all service endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use bytes::Bytes;
use common::{
    protocol::{CreateStudentRequest, CreateStudentResponse, HealthResponse, STATUS_OK},
    ServiceError,
};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use super::{response, state::AppState};
use crate::validation::validate_new_student;

/// `POST /api/students` — create a student.
///
/// Decode → validate → persist → respond. Decoding and validation failures
/// are 400s; storage failures are 500s with the cause logged.
pub async fn create_student(State(state): State<AppState>, body: Bytes) -> Response {
    let req: CreateStudentRequest = match decode_body(&body) {
        Ok(r) => r,
        Err(e) => {
            debug!(error = %e, "rejected create request body");
            return response::service_error(&e);
        }
    };

    let student = match validate_new_student(req) {
        Ok(s) => s,
        Err(errs) => {
            debug!(violations = errs.violations().len(), "create request failed validation");
            return response::validation_error(&errs);
        }
    };

    info!("creating a student");

    match state
        .storage
        .create_student(&student.name, &student.email, student.age)
        .await
    {
        Ok(id) => {
            info!(id, "student created");
            response::json(StatusCode::CREATED, &CreateStudentResponse::ok(id))
        }
        Err(e) => {
            error!(error = %e, "failed to create student");
            response::service_error(&ServiceError::Storage(e.to_string()))
        }
    }
}

/// `GET /api/students/:id` — fetch a student by id.
///
/// A non-integer id is a 400. Every storage failure, including an unknown
/// id, is a 500.
pub async fn get_student(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    info!(id = %raw_id, "getting a student");

    let id: i64 = match raw_id.parse() {
        Ok(id) => id,
        Err(e) => {
            let err = ServiceError::BadRequest(format!("invalid student id {raw_id:?}: {e}"));
            return response::service_error(&err);
        }
    };

    match state.storage.get_student_by_id(id).await {
        Ok(student) => response::json(StatusCode::OK, &student),
        Err(e) => {
            error!(id, error = %e, "failed to get student");
            response::service_error(&ServiceError::Storage(e.to_string()))
        }
    }
}

/// `GET /health` — liveness check.
pub async fn health(State(state): State<AppState>) -> Response {
    let body = HealthResponse {
        status: STATUS_OK.into(),
        env: state.env.to_string(),
        version: env!("CARGO_PKG_VERSION").into(),
    };
    response::json(StatusCode::OK, &body)
}

/// Catch-all 404 handler.
pub async fn not_found() -> Response {
    response::service_error(&ServiceError::NotFound("not found".into()))
}

/// Decode a JSON request body, treating an empty or whitespace-only body as
/// its own error.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ServiceError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ServiceError::BadRequest("empty body".into()));
    }
    serde_json::from_slice(body).map_err(|e| ServiceError::BadRequest(e.to_string()))
}
