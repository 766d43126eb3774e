//! Notification dispatch and client-routing engine.
//!
//! Turns platform events (install, activate, push, notification click/close,
//! periodic sync) into notification display requests and window routing
//! decisions. Everything the engine touches on the host side (shown
//! notifications, open windows, the worker registration) is reached through
//! the capability traits in [`platform`], so hosts and tests plug in their own.

pub mod dispatch;
pub mod lifecycle;
pub mod normalizer;
pub mod platform;
pub mod routing;
pub mod types;
pub mod worker;

#[cfg(test)]
mod tests;

pub use dispatch::{EventKind, EventOutcome, WorkerEvent};
pub use lifecycle::{LifecycleController, WorkerLifecycleState};
pub use normalizer::NotificationDefaults;
pub use platform::{ClientQuery, ClientWindow, Clients, NotificationHost, Registration, ScheduledCheck};
pub use routing::NotificationKind;
pub use types::{ActionSpec, ClientMessage, NotificationDescriptor, PushMessage};
pub use worker::{ClickOutcome, ServiceWorker};

/// Periodic-sync tag that triggers the scheduled-notification check.
pub const PERIODIC_CHECK_TAG: &str = "check-scheduled-notifications";

/// Failure reported by a host capability (display, enumerate, focus, message, open).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("notification permission denied")]
    PermissionDenied,

    #[error("client {0} is no longer reachable")]
    ClientGone(String),

    #[error("failed to open window at {url}: {message}")]
    OpenWindow { url: String, message: String },

    #[error("{0}")]
    Other(String),
}

/// Unified error type for the push-engine crate.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("push payload is not a valid notification object: {0}")]
    MalformedPayload(String),

    #[error("platform capability failed: {0}")]
    Platform(#[from] PlatformError),

    #[error("handler for {expected:?} received a {actual:?} event")]
    EventMismatch { expected: EventKind, actual: EventKind },
}
