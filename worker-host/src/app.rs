use std::path::PathBuf;
use std::sync::Arc;

use notification_log::LogStore;
use oauth_client::OAuthClient;
use push_engine::ServiceWorker;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;
use crate::platform::{ClientHub, HostRegistration, NotificationCenter, RecordingScheduledCheck, WindowLauncher};

/// Application shared state accessible from axum handlers and background tasks.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Broadcast channel for WebSocket messages
    ws_tx: broadcast::Sender<String>,
    config: AppConfig,
    worker: ServiceWorker,
    notifications: Arc<NotificationCenter>,
    clients: Arc<ClientHub>,
    registration: Arc<HostRegistration>,
    scheduled_check: Arc<RecordingScheduledCheck>,
    oauth: OAuthClient,
    logs: LogStore,
    shutdown_token: CancellationToken,
    /// Data directory path
    data_dir: PathBuf,
}

impl SharedState {
    /// Wire the host platform into a fresh worker.
    pub fn new(logs: LogStore, config: AppConfig, data_dir: PathBuf) -> Self {
        let (ws_tx, _) = broadcast::channel(2048);

        let notifications = Arc::new(NotificationCenter::new(ws_tx.clone()));
        let launcher = WindowLauncher::new(config.open_window_command.clone(), config.app_origin.clone());
        let clients = Arc::new(ClientHub::new(launcher));
        let registration = Arc::new(HostRegistration::default());
        let scheduled_check = Arc::new(RecordingScheduledCheck::default());

        let worker = ServiceWorker::new(
            notifications.clone(),
            clients.clone(),
            registration.clone(),
            scheduled_check.clone(),
        )
        .with_defaults(config.notification_defaults());
        let oauth = OAuthClient::new(config.oauth_config());

        Self {
            inner: Arc::new(SharedStateInner {
                ws_tx,
                config,
                worker,
                notifications,
                clients,
                registration,
                scheduled_check,
                oauth,
                logs,
                shutdown_token: CancellationToken::new(),
                data_dir,
            }),
        }
    }

    pub fn server_port(&self) -> u16 {
        self.inner.config.server_port
    }

    pub fn subscribe_ws(&self) -> broadcast::Receiver<String> {
        self.inner.ws_tx.subscribe()
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn worker(&self) -> &ServiceWorker {
        &self.inner.worker
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.inner.notifications
    }

    pub fn clients(&self) -> &ClientHub {
        &self.inner.clients
    }

    pub fn registration(&self) -> &HostRegistration {
        &self.inner.registration
    }

    pub fn scheduled_check(&self) -> &RecordingScheduledCheck {
        &self.inner.scheduled_check
    }

    pub fn oauth(&self) -> &OAuthClient {
        &self.inner.oauth
    }

    pub fn logs(&self) -> &LogStore {
        &self.inner.logs
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown_token
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.inner.data_dir
    }
}
