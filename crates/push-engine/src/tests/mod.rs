use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::platform::{ClientQuery, ClientWindow, Clients, NotificationHost, Registration, ScheduledCheck};
use crate::types::{ClientMessage, NotificationDescriptor, PushMessage};
use crate::{PlatformError, ServiceWorker, WorkerError};

mod lifecycle;

#[derive(Default)]
struct FakeNotifications {
    shown: Mutex<Vec<NotificationDescriptor>>,
    close_calls: Mutex<Vec<String>>,
    deny: bool,
}

impl FakeNotifications {
    fn shown(&self) -> Vec<NotificationDescriptor> {
        self.shown.lock().unwrap().clone()
    }

    fn close_calls(&self) -> Vec<String> {
        self.close_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationHost for FakeNotifications {
    async fn show_notification(&self, descriptor: &NotificationDescriptor) -> Result<(), PlatformError> {
        if self.deny {
            return Err(PlatformError::PermissionDenied);
        }
        let mut shown = self.shown.lock().unwrap();
        shown.retain(|n| n.tag != descriptor.tag);
        shown.push(descriptor.clone());
        Ok(())
    }

    async fn close_notification(&self, tag: &str) -> Result<(), PlatformError> {
        self.close_calls.lock().unwrap().push(tag.to_string());
        self.shown.lock().unwrap().retain(|n| n.tag != tag);
        Ok(())
    }
}

struct FakeWindow {
    id: String,
    url: String,
    focusable: bool,
    focus_calls: AtomicUsize,
    messages: Mutex<Vec<ClientMessage>>,
}

impl FakeWindow {
    fn new(id: &str, focusable: bool) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            url: format!("http://localhost/{id}"),
            focusable,
            focus_calls: AtomicUsize::new(0),
            messages: Mutex::new(Vec::new()),
        })
    }

    fn focus_calls(&self) -> usize {
        self.focus_calls.load(Ordering::SeqCst)
    }

    fn messages(&self) -> Vec<ClientMessage> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClientWindow for FakeWindow {
    fn id(&self) -> &str {
        &self.id
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn is_focusable(&self) -> bool {
        self.focusable
    }

    async fn focus(&self) -> Result<(), PlatformError> {
        self.focus_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn post_message(&self, message: &ClientMessage) -> Result<(), PlatformError> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }
}

struct FakeClients {
    windows: Vec<Arc<FakeWindow>>,
    can_open: bool,
    fail_claim: bool,
    opened: Mutex<Vec<String>>,
    queries: Mutex<Vec<ClientQuery>>,
    claimed: AtomicBool,
}

impl FakeClients {
    fn new(windows: Vec<Arc<FakeWindow>>) -> Self {
        Self {
            windows,
            can_open: true,
            fail_claim: false,
            opened: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
            claimed: AtomicBool::new(false),
        }
    }

    fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clients for FakeClients {
    async fn match_all(&self, query: ClientQuery) -> Result<Vec<Arc<dyn ClientWindow>>, PlatformError> {
        self.queries.lock().unwrap().push(query);
        Ok(self
            .windows
            .iter()
            .map(|w| w.clone() as Arc<dyn ClientWindow>)
            .collect())
    }

    fn can_open_window(&self) -> bool {
        self.can_open
    }

    async fn open_window(&self, url: &str) -> Result<(), PlatformError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn claim(&self) -> Result<(), PlatformError> {
        if self.fail_claim {
            return Err(PlatformError::Other("claim rejected".into()));
        }
        self.claimed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
struct FakeRegistration {
    skip_waiting_calls: AtomicUsize,
}

#[async_trait]
impl Registration for FakeRegistration {
    async fn skip_waiting(&self) -> Result<(), PlatformError> {
        self.skip_waiting_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
struct FakeCheck {
    runs: AtomicUsize,
}

#[async_trait]
impl ScheduledCheck for FakeCheck {
    async fn check_scheduled_notifications(&self) -> Result<(), WorkerError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct Harness {
    worker: ServiceWorker,
    notifications: Arc<FakeNotifications>,
    clients: Arc<FakeClients>,
    registration: Arc<FakeRegistration>,
    check: Arc<FakeCheck>,
}

impl Harness {
    fn new(windows: Vec<Arc<FakeWindow>>) -> Self {
        Self::build(FakeNotifications::default(), FakeClients::new(windows))
    }

    fn build(notifications: FakeNotifications, clients: FakeClients) -> Self {
        let notifications = Arc::new(notifications);
        let clients = Arc::new(clients);
        let registration = Arc::new(FakeRegistration::default());
        let check = Arc::new(FakeCheck::default());
        let worker = ServiceWorker::new(
            notifications.clone(),
            clients.clone(),
            registration.clone(),
            check.clone(),
        );
        Self {
            worker,
            notifications,
            clients,
            registration,
            check,
        }
    }
}

fn push(payload: Value) -> PushMessage {
    PushMessage::from_json(&payload)
}
