//! Background task loops: periodic scheduled-notification check.

use std::time::Duration;

use push_engine::{PERIODIC_CHECK_TAG, WorkerEvent};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::app::SharedState;

async fn sleep_or_cancel(token: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        _ = token.cancelled() => true,
        _ = sleep(duration) => false,
    }
}

/// Fire the scheduled-notification periodic sync every configured interval.
pub async fn periodic_sync_loop(state: SharedState) {
    let Some(interval) = state.config().periodic_sync_interval() else {
        tracing::info!("Periodic sync disabled");
        return;
    };
    let shutdown_token = state.shutdown_token().clone();
    tracing::info!(interval_secs = interval.as_secs(), "Periodic sync loop started");

    loop {
        if sleep_or_cancel(&shutdown_token, interval).await {
            tracing::info!("Periodic sync loop stopped (shutdown)");
            return;
        }
        run_periodic_sync_once(&state).await;
    }
}

async fn run_periodic_sync_once(state: &SharedState) {
    let event = WorkerEvent::PeriodicSync {
        tag: PERIODIC_CHECK_TAG.to_string(),
    };
    if let Err(e) = state.worker().dispatch(event).await {
        tracing::warn!("Periodic sync failed: {e}");
    }
}
