//! Displayed notifications: list, click, dismiss.

use axum::Json;
use axum::extract::State;
use push_engine::{NotificationHost, WorkerEvent};
use push_engine::types::{NotificationClickEvent, NotificationCloseEvent};
use serde::Deserialize;
use serde_json::json;

use super::{ApiResult, err_json, worker_err};
use crate::app::SharedState;

/// GET /api/notifications
pub async fn list_notifications(State(state): State<SharedState>) -> ApiResult {
    let notifications = state.notifications().list().await;
    Ok(Json(json!({
        "notifications": notifications,
        "count": notifications.len(),
    })))
}

#[derive(Debug, Deserialize)]
pub struct ClickBody {
    pub tag: String,
    #[serde(default)]
    pub action: Option<String>,
}

/// POST /api/notifications/click
pub async fn click_notification(
    State(state): State<SharedState>,
    Json(body): Json<ClickBody>,
) -> ApiResult {
    let notification = state
        .notifications()
        .get(&body.tag)
        .await
        .ok_or_else(|| err_json(404, &format!("No notification with tag '{}'", body.tag)))?;

    let event = NotificationClickEvent::new(notification, body.action);
    let outcome = state
        .worker()
        .dispatch(WorkerEvent::NotificationClick(event))
        .await
        .map_err(|e| worker_err(&e))?;
    Ok(Json(json!({ "status": "ok", "outcome": outcome })))
}

#[derive(Debug, Deserialize)]
pub struct CloseBody {
    pub tag: String,
}

/// POST /api/notifications/close
///
/// The user dismissed the notification without clicking it.
pub async fn close_notification(
    State(state): State<SharedState>,
    Json(body): Json<CloseBody>,
) -> ApiResult {
    state
        .notifications()
        .close_notification(&body.tag)
        .await
        .map_err(|e| err_json(500, &e.to_string()))?;

    let outcome = state
        .worker()
        .dispatch(WorkerEvent::NotificationClose(NotificationCloseEvent { tag: body.tag }))
        .await
        .map_err(|e| worker_err(&e))?;
    Ok(Json(json!({ "status": "ok", "outcome": outcome })))
}
