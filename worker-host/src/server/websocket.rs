use std::sync::Arc;

use axum::{
    extract::{
        Query, State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::{broadcast, mpsc};

use crate::app::SharedState;
use crate::platform::WsWindow;

#[derive(Debug, Deserialize)]
pub struct WindowParams {
    pub url: Option<String>,
    pub focusable: Option<bool>,
}

/// WebSocket upgrade handler. Each connection is one application window.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WindowParams>,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, params, state))
}

async fn handle_socket(socket: WebSocket, params: WindowParams, state: SharedState) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.subscribe_ws();
    let (direct_tx, mut direct_rx) = mpsc::unbounded_channel::<String>();

    // Send connection confirmation
    let client_id = uuid::Uuid::new_v4().to_string();
    let welcome = json!({
        "type": "connected",
        "data": { "clientId": client_id }
    });
    if sender
        .send(Message::Text(welcome.to_string().into()))
        .await
        .is_err()
    {
        return;
    }

    let window = Arc::new(WsWindow::new(
        client_id.clone(),
        params.url.unwrap_or_else(|| "/".to_string()),
        params.focusable.unwrap_or(true),
        direct_tx,
    ));
    state.clients().register(window.clone()).await;

    // Forward broadcast and window-directed frames to this client
    let mut send_task = tokio::spawn(async move {
        loop {
            let frame = tokio::select! {
                msg = rx.recv() => match msg {
                    Ok(msg) => msg,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "WebSocket client lagging, dropped broadcast messages");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                msg = direct_rx.recv() => match msg {
                    Some(msg) => msg,
                    None => break,
                },
            };
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    let recv_window = window.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => handle_client_message(&text, &recv_window),
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.clients().unregister(&client_id).await;
}

/// Route incoming client messages.
fn handle_client_message(text: &str, window: &WsWindow) {
    let Ok(msg) = serde_json::from_str::<Value>(text) else {
        tracing::debug!("Ignoring non-JSON WebSocket message");
        return;
    };
    let msg_type = msg.get("type").and_then(|t| t.as_str()).unwrap_or("");

    match msg_type {
        "ping" => {
            let _ = window.send_json(&json!({ "type": "pong" }));
        }
        "visibility" => {
            if let Some(focusable) = msg.get("focusable").and_then(Value::as_bool) {
                window.set_focusable(focusable);
                tracing::debug!(focusable, "Window visibility changed");
            }
        }
        other => tracing::debug!(message_type = other, "Unhandled WebSocket message"),
    }
}
