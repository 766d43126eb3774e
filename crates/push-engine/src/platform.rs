//! Host capabilities the engine is given instead of reaching for globals.
//!
//! The host owns the set of displayed notifications and the set of open
//! windows. The engine only reads (enumerate) and requests mutations
//! (show, close, focus, message, open) through these traits.

use std::sync::Arc;

use async_trait::async_trait;

use crate::PlatformError;
use crate::types::{ClientMessage, NotificationDescriptor};

/// Filter passed to [`Clients::match_all`]. Only window clients are ever enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientQuery {
    pub include_uncontrolled: bool,
}

impl ClientQuery {
    /// Every application window, including ones this worker does not control yet.
    pub fn all_windows() -> Self {
        Self {
            include_uncontrolled: true,
        }
    }
}

/// Displayed-notification capability.
#[async_trait]
pub trait NotificationHost: Send + Sync {
    /// Display a notification. Same-tag notifications may be replaced by the host.
    async fn show_notification(&self, descriptor: &NotificationDescriptor) -> Result<(), PlatformError>;

    /// Close the notification with this tag. Closing one that is already gone is not an error.
    async fn close_notification(&self, tag: &str) -> Result<(), PlatformError>;
}

/// A handle to an open application window.
#[async_trait]
pub trait ClientWindow: Send + Sync {
    fn id(&self) -> &str;

    fn url(&self) -> &str;

    /// Whether the window can currently be focused.
    fn is_focusable(&self) -> bool;

    async fn focus(&self) -> Result<(), PlatformError>;

    async fn post_message(&self, message: &ClientMessage) -> Result<(), PlatformError>;
}

/// Open-window enumeration and creation.
#[async_trait]
pub trait Clients: Send + Sync {
    /// Enumerate clients in host order.
    async fn match_all(&self, query: ClientQuery) -> Result<Vec<Arc<dyn ClientWindow>>, PlatformError>;

    /// Whether [`Clients::open_window`] is available on this host.
    fn can_open_window(&self) -> bool {
        true
    }

    /// Open a new window at an application-relative URL.
    async fn open_window(&self, url: &str) -> Result<(), PlatformError>;

    /// Take control of every open, uncontrolled client.
    async fn claim(&self) -> Result<(), PlatformError>;
}

/// The worker's own registration.
#[async_trait]
pub trait Registration: Send + Sync {
    /// Make a freshly installed worker eligible for activation without
    /// waiting for the previous worker to be released.
    async fn skip_waiting(&self) -> Result<(), PlatformError>;
}

/// Extension point run by the periodic-sync trigger.
#[async_trait]
pub trait ScheduledCheck: Send + Sync {
    async fn check_scheduled_notifications(&self) -> Result<(), crate::WorkerError>;
}
