//! Open application windows, one per WebSocket connection.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use push_engine::{ClientMessage, ClientQuery, ClientWindow, Clients, PlatformError};
use serde_json::{Value, json};
use tokio::sync::{RwLock, mpsc};

use super::launcher::WindowLauncher;

/// A connected window. Frames pushed to `tx` are written to its socket.
pub struct WsWindow {
    id: String,
    url: String,
    focusable: AtomicBool,
    controlled: AtomicBool,
    tx: mpsc::UnboundedSender<String>,
}

impl WsWindow {
    pub fn new(id: impl Into<String>, url: impl Into<String>, focusable: bool, tx: mpsc::UnboundedSender<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            focusable: AtomicBool::new(focusable),
            controlled: AtomicBool::new(false),
            tx,
        }
    }

    pub fn set_focusable(&self, focusable: bool) {
        self.focusable.store(focusable, Ordering::SeqCst);
    }

    pub fn is_controlled(&self) -> bool {
        self.controlled.load(Ordering::SeqCst)
    }

    fn set_controlled(&self) {
        self.controlled.store(true, Ordering::SeqCst);
    }

    /// Queue a JSON frame for this window only.
    pub fn send_json(&self, value: &Value) -> Result<(), PlatformError> {
        self.tx
            .send(value.to_string())
            .map_err(|_| PlatformError::ClientGone(self.id.clone()))
    }
}

#[async_trait]
impl ClientWindow for WsWindow {
    fn id(&self) -> &str {
        &self.id
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn is_focusable(&self) -> bool {
        self.focusable.load(Ordering::SeqCst)
    }

    async fn focus(&self) -> Result<(), PlatformError> {
        self.send_json(&json!({ "type": "focus" }))
    }

    async fn post_message(&self, message: &ClientMessage) -> Result<(), PlatformError> {
        let data = serde_json::to_value(message).map_err(|e| PlatformError::Other(e.to_string()))?;
        self.send_json(&json!({ "type": "message", "data": data }))
    }
}

/// Registry of connected windows in connection order.
pub struct ClientHub {
    windows: RwLock<Vec<Arc<WsWindow>>>,
    launcher: WindowLauncher,
}

impl ClientHub {
    pub fn new(launcher: WindowLauncher) -> Self {
        Self {
            windows: RwLock::new(Vec::new()),
            launcher,
        }
    }

    pub async fn register(&self, window: Arc<WsWindow>) {
        tracing::info!(client_id = %window.id, url = %window.url, "Window connected");
        self.windows.write().await.push(window);
    }

    pub async fn unregister(&self, id: &str) {
        self.windows.write().await.retain(|w| w.id != id);
        tracing::info!(client_id = id, "Window disconnected");
    }

    pub async fn windows(&self) -> Vec<Arc<WsWindow>> {
        self.windows.read().await.clone()
    }
}

#[async_trait]
impl Clients for ClientHub {
    async fn match_all(&self, query: ClientQuery) -> Result<Vec<Arc<dyn ClientWindow>>, PlatformError> {
        let windows = self.windows.read().await;
        Ok(windows
            .iter()
            .filter(|w| query.include_uncontrolled || w.is_controlled())
            .map(|w| Arc::clone(w) as Arc<dyn ClientWindow>)
            .collect())
    }

    fn can_open_window(&self) -> bool {
        self.launcher.is_available()
    }

    async fn open_window(&self, url: &str) -> Result<(), PlatformError> {
        self.launcher.open(url).await
    }

    async fn claim(&self) -> Result<(), PlatformError> {
        let windows = self.windows.read().await;
        for window in windows.iter() {
            window.set_controlled();
        }
        tracing::info!(count = windows.len(), "Claimed open windows");
        Ok(())
    }
}
