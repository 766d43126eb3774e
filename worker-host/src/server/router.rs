use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use super::{api, websocket};
use crate::app::SharedState;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // --- Core ---
        .route("/status", get(api::worker::status))
        .route("/ws", get(websocket::ws_handler))
        // --- Worker events ---
        .route("/api/push", post(api::worker::push))
        .route("/api/periodic-sync", post(api::worker::periodic_sync))
        // --- Notifications ---
        .route("/api/notifications", get(api::notifications::list_notifications))
        .route("/api/notifications/click", post(api::notifications::click_notification))
        .route("/api/notifications/close", post(api::notifications::close_notification))
        // --- OAuth ---
        .route("/api/oauth/token", post(api::oauth::token))
        .route("/api/oauth/authorize", get(api::oauth::authorize))
        // --- Delivery logs ---
        .route(
            "/api/notification-logs",
            get(api::notification_logs::list_logs).post(api::notification_logs::save_log),
        )
        // --- Middleware ---
        .layer(CorsLayer::permissive())
        .with_state(state)
}
