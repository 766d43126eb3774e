//! Host-side implementations of the engine's capability traits.

pub mod clients;
pub mod launcher;
pub mod notifications;

pub use clients::{ClientHub, WsWindow};
pub use launcher::WindowLauncher;
pub use notifications::NotificationCenter;

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use push_engine::{PlatformError, Registration, ScheduledCheck, WorkerError};
use tokio::sync::RwLock;

/// Registration of the single in-process worker.
#[derive(Default)]
pub struct HostRegistration {
    waiting_skipped: AtomicBool,
}

impl HostRegistration {
    pub fn waiting_skipped(&self) -> bool {
        self.waiting_skipped.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Registration for HostRegistration {
    async fn skip_waiting(&self) -> Result<(), PlatformError> {
        self.waiting_skipped.store(true, Ordering::SeqCst);
        tracing::debug!("Worker will activate without waiting");
        Ok(())
    }
}

/// Scheduled check with no backend; records when it last ran.
#[derive(Default)]
pub struct RecordingScheduledCheck {
    last_run: RwLock<Option<DateTime<Utc>>>,
}

impl RecordingScheduledCheck {
    pub async fn last_run(&self) -> Option<DateTime<Utc>> {
        *self.last_run.read().await
    }
}

#[async_trait]
impl ScheduledCheck for RecordingScheduledCheck {
    async fn check_scheduled_notifications(&self) -> Result<(), WorkerError> {
        let now = Utc::now();
        *self.last_run.write().await = Some(now);
        tracing::info!(at = %now.to_rfc3339(), "Checking scheduled notifications");
        Ok(())
    }
}
