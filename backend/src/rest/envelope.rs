//! Response envelope helpers.
//!
//! Every endpoint speaks the same JSON envelope: `{status:true, data}`
//! on success, `{status:false, message}` for soft failures (including
//! not-found, which is deliberately HTTP 200: the request succeeded,
//! the answer is "no"), 400 with a field error list for validation
//! failures, and 500 with the raw error message for anything
//! unexpected.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;
use shared::FieldError;
use tracing::error;

use crate::domain::ServiceError;

/// 200 `{status:true, data}`.
pub fn data<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(json!({ "status": true, "data": data }))).into_response()
}

/// 200 `{status:true, message, data}`.
pub fn message_data<T: Serialize>(message: &str, data: T) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "status": true, "message": message, "data": data })),
    )
        .into_response()
}

/// 200 `{status:false, message}` — the soft not-found contract.
pub fn soft_not_found(message: &str) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "status": false, "message": message })),
    )
        .into_response()
}

/// 400 `{status:false, message:"inputs not valid", errors}`.
pub fn invalid(errors: Vec<FieldError>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "status": false,
            "message": "inputs not valid",
            "errors": errors,
        })),
    )
        .into_response()
}

/// 400 `{status:false, message}` for non-field-level rejections.
pub fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "status": false, "message": message })),
    )
        .into_response()
}

/// 500 `{message:"internal server error", error}`.
pub fn internal(err: &anyhow::Error) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "message": "internal server error",
            "error": err.to_string(),
        })),
    )
        .into_response()
}

/// Default mapping from a service failure to a response. Not-found is
/// soft here; routes that want a hard 400 for it (the password change
/// route) intercept `ServiceError::NotFound` before calling this.
pub fn failure(err: ServiceError) -> Response {
    match err {
        ServiceError::Invalid(errors) => invalid(errors),
        ServiceError::NotFound(entity) => soft_not_found(&format!("{entity} not found")),
        ServiceError::OldPasswordMismatch => bad_request("old password is incorrect"),
        ServiceError::Internal(err) => {
            error!("request failed: {err:#}");
            internal(&err)
        }
    }
}
