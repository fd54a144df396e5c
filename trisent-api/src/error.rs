//! Error types for trisent-api
//!
//! Request-level failures map to HTTP statuses with a JSON
//! `{"error": message}` body; per-classifier failures never reach this
//! type (they are folded into the classifier's own output).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("{0}")]
    BadRequest(String),

    /// Method not accepted on this route (405)
    #[error("{0}")]
    MethodNotAllowed(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::MethodNotAllowed(msg) => (StatusCode::METHOD_NOT_ALLOWED, msg),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
