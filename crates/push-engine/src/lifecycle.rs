//! Worker install/activate state machine.

use std::sync::RwLock;

use serde::Serialize;

use crate::WorkerError;
use crate::platform::{Clients, Registration};

/// Lifecycle state of the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerLifecycleState {
    /// Registered but no install event handled yet.
    Parsed,
    Installing,
    Installed,
    Activating,
    Active,
}

impl WorkerLifecycleState {
    fn can_transition_to(self, next: Self) -> bool {
        use WorkerLifecycleState::*;
        matches!(
            (self, next),
            (Parsed | Installed | Activating | Active, Installing)
                | (Installing, Installed)
                | (Installed, Activating)
                | (Activating, Active)
        )
    }
}

/// Drives the lifecycle state from platform install/activate events.
pub struct LifecycleController {
    state: RwLock<WorkerLifecycleState>,
}

impl Default for LifecycleController {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleController {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(WorkerLifecycleState::Parsed),
        }
    }

    pub fn state(&self) -> WorkerLifecycleState {
        self.state
            .read()
            .map(|s| *s)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }

    fn transition(&self, next: WorkerLifecycleState) {
        let mut guard = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = *guard;
        if !previous.can_transition_to(next) {
            // Platform events drive the lifecycle; an out-of-order event is logged, not refused.
            tracing::warn!(from = ?previous, to = ?next, "Unexpected lifecycle transition");
        }
        *guard = next;
        tracing::info!(from = ?previous, to = ?next, "Worker lifecycle transition");
    }

    /// Handle the install event, then skip waiting so activation is not delayed.
    pub async fn install(&self, registration: &dyn Registration) -> Result<(), WorkerError> {
        self.transition(WorkerLifecycleState::Installing);
        tracing::info!("Service worker installing");
        self.transition(WorkerLifecycleState::Installed);
        registration.skip_waiting().await?;
        Ok(())
    }

    /// Handle the activate event and claim every open client.
    ///
    /// A failed claim leaves the worker in `Activating` and returns the error
    /// to the platform.
    pub async fn activate(&self, clients: &dyn Clients) -> Result<(), WorkerError> {
        self.transition(WorkerLifecycleState::Activating);
        tracing::info!("Service worker activating");
        clients.claim().await?;
        self.transition(WorkerLifecycleState::Active);
        Ok(())
    }
}
