//! Worker event API: pushes, periodic sync and status.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use push_engine::{PushMessage, WorkerEvent};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ApiResult, worker_err};
use crate::app::SharedState;

/// GET /status
pub async fn status(State(state): State<SharedState>) -> Json<Value> {
    let last_check = state
        .scheduled_check()
        .last_run()
        .await
        .map(|t| t.to_rfc3339());
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "worker": state.worker().lifecycle_state(),
        "waitingSkipped": state.registration().waiting_skipped(),
        "clients": state.clients().windows().await.len(),
        "notifications": state.notifications().list().await.len(),
        "lastScheduledCheck": last_check,
    }))
}

/// POST /api/push
///
/// The raw body is the push payload; an empty body is a push without data.
pub async fn push(State(state): State<SharedState>, body: Bytes) -> ApiResult {
    let message = PushMessage::from_body(body.to_vec());
    let outcome = state
        .worker()
        .dispatch(WorkerEvent::Push(message))
        .await
        .map_err(|e| worker_err(&e))?;
    Ok(Json(json!({ "status": "ok", "outcome": outcome })))
}

#[derive(Debug, Deserialize)]
pub struct PeriodicSyncBody {
    pub tag: String,
}

/// POST /api/periodic-sync
pub async fn periodic_sync(
    State(state): State<SharedState>,
    Json(body): Json<PeriodicSyncBody>,
) -> ApiResult {
    let outcome = state
        .worker()
        .dispatch(WorkerEvent::PeriodicSync { tag: body.tag })
        .await
        .map_err(|e| worker_err(&e))?;
    Ok(Json(json!({ "status": "ok", "outcome": outcome })))
}
