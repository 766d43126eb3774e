//! In-process notification center.

use async_trait::async_trait;
use push_engine::{NotificationDescriptor, NotificationHost, PlatformError};
use serde_json::{Value, json};
use tokio::sync::{Mutex, broadcast};

/// Displayed notifications, oldest first, at most one per tag.
pub struct NotificationCenter {
    shown: Mutex<Vec<NotificationDescriptor>>,
    ws_tx: broadcast::Sender<String>,
}

impl NotificationCenter {
    pub fn new(ws_tx: broadcast::Sender<String>) -> Self {
        Self {
            shown: Mutex::new(Vec::new()),
            ws_tx,
        }
    }

    pub async fn list(&self) -> Vec<NotificationDescriptor> {
        self.shown.lock().await.clone()
    }

    pub async fn get(&self, tag: &str) -> Option<NotificationDescriptor> {
        self.shown.lock().await.iter().find(|n| n.tag == tag).cloned()
    }

    fn broadcast(&self, message_type: &str, data: Value) {
        let msg = json!({ "type": message_type, "data": data });
        // No subscribers is fine.
        let _ = self.ws_tx.send(msg.to_string());
    }
}

#[async_trait]
impl NotificationHost for NotificationCenter {
    async fn show_notification(&self, descriptor: &NotificationDescriptor) -> Result<(), PlatformError> {
        let replaced = {
            let mut shown = self.shown.lock().await;
            let before = shown.len();
            shown.retain(|n| n.tag != descriptor.tag);
            let replaced = shown.len() != before;
            shown.push(descriptor.clone());
            replaced
        };

        tracing::info!(tag = %descriptor.tag, replaced, "Notification displayed");
        let data = serde_json::to_value(descriptor).map_err(|e| PlatformError::Other(e.to_string()))?;
        self.broadcast("notification_shown", data);
        Ok(())
    }

    async fn close_notification(&self, tag: &str) -> Result<(), PlatformError> {
        let removed = {
            let mut shown = self.shown.lock().await;
            let before = shown.len();
            shown.retain(|n| n.tag != tag);
            shown.len() != before
        };

        if removed {
            tracing::debug!(tag, "Notification removed");
            self.broadcast("notification_closed", json!({ "tag": tag }));
        }
        Ok(())
    }
}
