use std::sync::Arc;

use notification_log::LogStore;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::app::SharedState;
use crate::config::AppConfig;
use crate::platform::WsWindow;


fn test_state(vars: &[(&str, &str)]) -> SharedState {
    let vars: Vec<(String, String)> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let config = AppConfig::from_lookup(|key| {
        vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    });
    let logs = LogStore::open_in_memory().unwrap();
    SharedState::new(logs, config, std::env::temp_dir())
}

/// Register a window the way a WebSocket connection does.
async fn connect_window(
    state: &SharedState,
    id: &str,
    url: &str,
    focusable: bool,
) -> (Arc<WsWindow>, mpsc::UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let window = Arc::new(WsWindow::new(id, url, focusable, tx));
    state.clients().register(window.clone()).await;
    (window, rx)
}

fn frames(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<Value> {
    let mut out = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        out.push(serde_json::from_str(&frame).unwrap());
    }
    out
}
