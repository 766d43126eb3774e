//! Headless push server binary.
//!
//! Starts the worker, the axum web server, the periodic sync loop and
//! signal handling.

use tracing_subscriber::EnvFilter;

use calendar_push_lib::app::SharedState;
use calendar_push_lib::background;
use calendar_push_lib::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Step 1: Tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting calendar push server");

    // Step 2: Foundation
    let (logs, config, dir) = calendar_push_lib::init_foundation()?;
    let state = SharedState::new(logs, config, dir);

    // Step 3: Install + activate
    calendar_push_lib::start_worker(&state).await?;

    // Step 4: Web server
    let server_state = state.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::start_server(server_state).await {
            tracing::error!("Server failed: {e}");
        }
    });

    // Step 5: Periodic sync
    let s = state.clone();
    let sync_handle = tokio::spawn(async move { background::periodic_sync_loop(s).await });

    tracing::info!(
        port = state.server_port(),
        "Headless server running. Press Ctrl+C to stop."
    );

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    state.shutdown_token().cancel();
    let _ = tokio::join!(server_handle, sync_handle);
    tracing::info!("Shutdown complete");
    Ok(())
}
