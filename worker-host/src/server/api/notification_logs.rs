//! Notification delivery log API.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use notification_log::{NewLogEntry, SaveResponse};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ApiResult, err_json};
use crate::app::SharedState;

/// POST /api/notification-logs
pub async fn save_log(
    State(state): State<SharedState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<SaveResponse>) {
    let response = match serde_json::from_value::<NewLogEntry>(body) {
        Ok(entry) => SaveResponse::from_result(state.logs().save(&entry)),
        Err(e) => SaveResponse::Failed {
            success: false,
            error: e.to_string(),
        },
    };

    if response.is_success() {
        (StatusCode::OK, Json(response))
    } else {
        tracing::warn!("Failed to save notification log: {response:?}");
        (StatusCode::BAD_REQUEST, Json(response))
    }
}

#[derive(Debug, Deserialize)]
pub struct LogQuery {
    pub user_id: String,
    pub limit: Option<usize>,
}

/// GET /api/notification-logs?user_id=...&limit=...
pub async fn list_logs(
    State(state): State<SharedState>,
    Query(q): Query<LogQuery>,
) -> ApiResult {
    let limit = q.limit.unwrap_or(50);
    let entries = state
        .logs()
        .recent_for_user(&q.user_id, limit)
        .map_err(|e| err_json(500, &e.to_string()))?;
    Ok(Json(json!({ "success": true, "data": entries, "count": entries.len() })))
}
