use std::path::PathBuf;

use anyhow::Context;
use notification_log::LogStore;
use push_engine::WorkerEvent;

use crate::app::SharedState;
use crate::config::AppConfig;

/// Foundation init: env, config, data dir, log store (fatal on error).
pub fn init_foundation() -> Result<(LogStore, AppConfig, PathBuf), anyhow::Error> {
    load_dotenv();
    let config = AppConfig::load();

    let dir = config.data_dir.clone();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create data dir {}", dir.display()))?;

    let db_path = dir.join("notification_logs.db");
    tracing::info!("Opening notification log at {}", db_path.display());
    let logs = LogStore::open(&db_path)?;

    let missing = config.missing_settings();
    if !missing.is_empty() {
        let keys: Vec<_> = missing.iter().map(|d| d.key).collect();
        tracing::warn!("Missing settings: {keys:?}");
        for def in &missing {
            tracing::debug!("{}: {}", def.key, def.description);
        }
    }

    tracing::info!("Settings loaded (port={})", config.server_port);
    Ok((logs, config, dir))
}

/// Bring the worker from parsed to active: install, then activate.
pub async fn start_worker(state: &SharedState) -> Result<(), anyhow::Error> {
    let worker = state.worker();
    worker
        .dispatch(WorkerEvent::Install)
        .await
        .context("worker install failed")?;
    worker
        .dispatch(WorkerEvent::Activate)
        .await
        .context("worker activation failed")?;
    Ok(())
}

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}
