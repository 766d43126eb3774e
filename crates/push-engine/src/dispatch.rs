//! Explicit event-kind → handler table.
//!
//! The dispatcher awaits the handler future before reporting the event as
//! processed, which is how the host keeps the worker alive until every
//! chained async step has resolved.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Serialize;

use crate::WorkerError;
use crate::types::{NotificationClickEvent, NotificationCloseEvent, PushMessage};
use crate::worker::{ClickOutcome, ServiceWorker};

/// Platform event delivered to the worker.
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    Install,
    Activate,
    Push(PushMessage),
    NotificationClick(NotificationClickEvent),
    NotificationClose(NotificationCloseEvent),
    PeriodicSync { tag: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Install,
    Activate,
    Push,
    NotificationClick,
    NotificationClose,
    PeriodicSync,
}

impl WorkerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Install => EventKind::Install,
            Self::Activate => EventKind::Activate,
            Self::Push(_) => EventKind::Push,
            Self::NotificationClick(_) => EventKind::NotificationClick,
            Self::NotificationClose(_) => EventKind::NotificationClose,
            Self::PeriodicSync { .. } => EventKind::PeriodicSync,
        }
    }
}

/// Result of a fully handled event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EventOutcome {
    Installed,
    Activated,
    Displayed { tag: String },
    /// Push without a payload; nothing was shown.
    Skipped,
    Clicked(ClickOutcome),
    Closed { tag: String },
    SyncCompleted,
    Ignored,
}

type Handler = for<'a> fn(&'a ServiceWorker, WorkerEvent) -> BoxFuture<'a, Result<EventOutcome, WorkerError>>;

/// The event-kind → handler table. Exhaustive, so every kind has exactly one handler.
fn handler_for(kind: EventKind) -> Handler {
    match kind {
        EventKind::Install => handle_install as Handler,
        EventKind::Activate => handle_activate as Handler,
        EventKind::Push => handle_push as Handler,
        EventKind::NotificationClick => handle_click as Handler,
        EventKind::NotificationClose => handle_close as Handler,
        EventKind::PeriodicSync => handle_periodic_sync as Handler,
    }
}

impl ServiceWorker {
    /// Route an event to its handler and wait for it to finish.
    pub async fn dispatch(&self, event: WorkerEvent) -> Result<EventOutcome, WorkerError> {
        let kind = event.kind();
        let result = handler_for(kind)(self, event).await;
        if let Err(e) = &result {
            tracing::warn!(event = ?kind, error = %e, "Event handler failed");
        }
        result
    }
}

fn mismatch(expected: EventKind, event: &WorkerEvent) -> WorkerError {
    WorkerError::EventMismatch {
        expected,
        actual: event.kind(),
    }
}

fn handle_install(worker: &ServiceWorker, _event: WorkerEvent) -> BoxFuture<'_, Result<EventOutcome, WorkerError>> {
    async move {
        worker.on_install().await?;
        Ok(EventOutcome::Installed)
    }
    .boxed()
}

fn handle_activate(worker: &ServiceWorker, _event: WorkerEvent) -> BoxFuture<'_, Result<EventOutcome, WorkerError>> {
    async move {
        worker.on_activate().await?;
        Ok(EventOutcome::Activated)
    }
    .boxed()
}

fn handle_push(worker: &ServiceWorker, event: WorkerEvent) -> BoxFuture<'_, Result<EventOutcome, WorkerError>> {
    async move {
        let message = match event {
            WorkerEvent::Push(message) => message,
            other => return Err(mismatch(EventKind::Push, &other)),
        };
        Ok(match worker.on_push(&message).await? {
            Some(tag) => EventOutcome::Displayed { tag },
            None => EventOutcome::Skipped,
        })
    }
    .boxed()
}

fn handle_click(worker: &ServiceWorker, event: WorkerEvent) -> BoxFuture<'_, Result<EventOutcome, WorkerError>> {
    async move {
        let click = match event {
            WorkerEvent::NotificationClick(click) => click,
            other => return Err(mismatch(EventKind::NotificationClick, &other)),
        };
        Ok(EventOutcome::Clicked(worker.on_notification_click(click).await?))
    }
    .boxed()
}

fn handle_close(worker: &ServiceWorker, event: WorkerEvent) -> BoxFuture<'_, Result<EventOutcome, WorkerError>> {
    async move {
        let close = match event {
            WorkerEvent::NotificationClose(close) => close,
            other => return Err(mismatch(EventKind::NotificationClose, &other)),
        };
        worker.on_notification_close(&close);
        Ok(EventOutcome::Closed { tag: close.tag })
    }
    .boxed()
}

fn handle_periodic_sync(worker: &ServiceWorker, event: WorkerEvent) -> BoxFuture<'_, Result<EventOutcome, WorkerError>> {
    async move {
        let tag = match event {
            WorkerEvent::PeriodicSync { tag } => tag,
            other => return Err(mismatch(EventKind::PeriodicSync, &other)),
        };
        Ok(if worker.on_periodic_sync(&tag).await? {
            EventOutcome::SyncCompleted
        } else {
            EventOutcome::Ignored
        })
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::platform::{ClientQuery, ClientWindow, Clients, NotificationHost, Registration, ScheduledCheck};
    use crate::types::NotificationDescriptor;
    use crate::{PlatformError, WorkerError};
    use async_trait::async_trait;

    struct Inert;

    #[async_trait]
    impl NotificationHost for Inert {
        async fn show_notification(&self, _: &NotificationDescriptor) -> Result<(), PlatformError> {
            Ok(())
        }
        async fn close_notification(&self, _: &str) -> Result<(), PlatformError> {
            Ok(())
        }
    }

    #[async_trait]
    impl Clients for Inert {
        async fn match_all(&self, _: ClientQuery) -> Result<Vec<Arc<dyn ClientWindow>>, PlatformError> {
            Ok(Vec::new())
        }
        async fn open_window(&self, _: &str) -> Result<(), PlatformError> {
            Ok(())
        }
        async fn claim(&self) -> Result<(), PlatformError> {
            Ok(())
        }
    }

    #[async_trait]
    impl Registration for Inert {
        async fn skip_waiting(&self) -> Result<(), PlatformError> {
            Ok(())
        }
    }

    #[async_trait]
    impl ScheduledCheck for Inert {
        async fn check_scheduled_notifications(&self) -> Result<(), WorkerError> {
            Ok(())
        }
    }

    fn worker() -> ServiceWorker {
        let inert = Arc::new(Inert);
        ServiceWorker::new(inert.clone(), inert.clone(), inert.clone(), inert)
    }

    #[tokio::test]
    async fn handler_rejects_event_of_another_kind() {
        let worker = worker();
        let err = handler_for(EventKind::Push)(&worker, WorkerEvent::Install)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WorkerError::EventMismatch {
                expected: EventKind::Push,
                actual: EventKind::Install,
            }
        ));
    }

    #[tokio::test]
    async fn periodic_sync_handler_serves_only_its_kind() {
        let worker = worker();
        let outcome = handler_for(EventKind::PeriodicSync)(
            &worker,
            WorkerEvent::PeriodicSync {
                tag: crate::PERIODIC_CHECK_TAG.into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(outcome, EventOutcome::SyncCompleted);

        let err = handler_for(EventKind::NotificationClose)(
            &worker,
            WorkerEvent::PeriodicSync { tag: "x".into() },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, WorkerError::EventMismatch { .. }));
    }
}
