//! The background worker: event handlers over injected host capabilities.

use std::sync::Arc;

use serde::Serialize;

use crate::lifecycle::{LifecycleController, WorkerLifecycleState};
use crate::normalizer::{self, NotificationDefaults};
use crate::platform::{ClientQuery, Clients, NotificationHost, Registration, ScheduledCheck};
use crate::routing;
use crate::types::{ClientMessage, NotificationClickEvent, NotificationCloseEvent, PushMessage};
use crate::{PERIODIC_CHECK_TAG, WorkerError};

/// What a notification click ended up doing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ClickOutcome {
    /// An existing window was focused and messaged.
    FocusedExisting { client_id: String },
    /// A new window was requested at `url`.
    OpenedWindow { url: String },
    /// No window qualified and the host cannot open windows.
    OpenWindowUnavailable { url: String },
}

/// Event handlers for one worker instance.
pub struct ServiceWorker {
    notifications: Arc<dyn NotificationHost>,
    clients: Arc<dyn Clients>,
    registration: Arc<dyn Registration>,
    scheduled_check: Arc<dyn ScheduledCheck>,
    defaults: NotificationDefaults,
    lifecycle: LifecycleController,
}

impl ServiceWorker {
    pub fn new(
        notifications: Arc<dyn NotificationHost>,
        clients: Arc<dyn Clients>,
        registration: Arc<dyn Registration>,
        scheduled_check: Arc<dyn ScheduledCheck>,
    ) -> Self {
        Self {
            notifications,
            clients,
            registration,
            scheduled_check,
            defaults: NotificationDefaults::default(),
            lifecycle: LifecycleController::new(),
        }
    }

    pub fn with_defaults(mut self, defaults: NotificationDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn lifecycle_state(&self) -> WorkerLifecycleState {
        self.lifecycle.state()
    }

    pub async fn on_install(&self) -> Result<(), WorkerError> {
        self.lifecycle.install(self.registration.as_ref()).await
    }

    pub async fn on_activate(&self) -> Result<(), WorkerError> {
        self.lifecycle.activate(self.clients.as_ref()).await
    }

    /// Normalize and display a pushed notification.
    ///
    /// Returns the displayed tag, or `None` when the push had no payload.
    pub async fn on_push(&self, message: &PushMessage) -> Result<Option<String>, WorkerError> {
        let Some(descriptor) = normalizer::normalize_now(message, &self.defaults)? else {
            return Ok(None);
        };

        tracing::debug!(tag = %descriptor.tag, title = ?descriptor.title, "Showing notification");
        self.notifications.show_notification(&descriptor).await?;
        Ok(Some(descriptor.tag))
    }

    /// Route a notification click.
    ///
    /// The first focusable window (in host order) is focused and messaged and
    /// routing stops there; no broadcast. With no such window, a new window
    /// is opened at the routing-table URL.
    pub async fn on_notification_click(
        &self,
        event: NotificationClickEvent,
    ) -> Result<ClickOutcome, WorkerError> {
        let NotificationClickEvent { notification, action } = event;
        self.notifications.close_notification(&notification.tag).await?;

        let data = notification.data;
        let windows = self.clients.match_all(ClientQuery::all_windows()).await?;

        if let Some(window) = windows.iter().find(|w| w.is_focusable()) {
            tracing::debug!(client_id = window.id(), url = window.url(), "Reusing open window");
            window.focus().await?;
            window
                .post_message(&ClientMessage::notification_click(action, data))
                .await?;
            return Ok(ClickOutcome::FocusedExisting {
                client_id: window.id().to_string(),
            });
        }

        let url = routing::target_url(&data);
        if !self.clients.can_open_window() {
            tracing::debug!(url = %url, "Host cannot open windows, click dropped");
            return Ok(ClickOutcome::OpenWindowUnavailable { url });
        }

        tracing::debug!(url = %url, "Opening new window");
        self.clients.open_window(&url).await?;
        Ok(ClickOutcome::OpenedWindow { url })
    }

    pub fn on_notification_close(&self, event: &NotificationCloseEvent) {
        tracing::info!(tag = %event.tag, "Notification closed");
    }

    /// Run the scheduled-notification check for its periodic-sync tag.
    ///
    /// Returns `false` for any other tag.
    pub async fn on_periodic_sync(&self, tag: &str) -> Result<bool, WorkerError> {
        if tag != PERIODIC_CHECK_TAG {
            tracing::debug!(tag, "Ignoring periodic sync");
            return Ok(false);
        }
        self.scheduled_check.check_scheduled_notifications().await?;
        Ok(true)
    }
}
