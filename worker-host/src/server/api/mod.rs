//! REST API handlers grouped by domain.

pub mod notification_logs;
pub mod notifications;
pub mod oauth;
pub mod worker;

use axum::Json;
use axum::http::StatusCode;
use push_engine::WorkerError;
use serde_json::{Value, json};

pub type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

/// Standard error response.
pub fn err_json(status: u16, message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(json!({ "status": "error", "error": message })),
    )
}

/// Map a failed dispatch: bad payloads are the caller's fault, everything else is ours.
pub fn worker_err(e: &WorkerError) -> (StatusCode, Json<Value>) {
    match e {
        WorkerError::MalformedPayload(_) => err_json(400, &e.to_string()),
        _ => err_json(500, &e.to_string()),
    }
}
