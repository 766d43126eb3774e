//! Push payload → notification descriptor.

use serde_json::{Map, Value};

use crate::WorkerError;
use crate::types::{ActionSpec, NotificationDescriptor, PushMessage};

pub const DEFAULT_ICON: &str = "/icons/icon-192x192.png";
pub const DEFAULT_BADGE: &str = "/icons/badge-72x72.png";
pub const DEFAULT_TAG: &str = "default";
/// Vibration pattern applied to every notification; payloads cannot override it.
pub const VIBRATE_PATTERN: [u32; 3] = [200, 100, 200];

/// Host-configurable fallbacks for asset paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDefaults {
    pub icon: String,
    pub badge: String,
}

impl Default for NotificationDefaults {
    fn default() -> Self {
        Self {
            icon: DEFAULT_ICON.into(),
            badge: DEFAULT_BADGE.into(),
        }
    }
}

/// Normalize a push message into a descriptor, using `now_ms` for a missing timestamp.
///
/// Returns `Ok(None)` when the push carried no payload; such pushes are
/// dropped without showing anything. The body must be a JSON object. Inside
/// it, a field that is absent or of the wrong type gets its default.
pub fn normalize(
    message: &PushMessage,
    defaults: &NotificationDefaults,
    now_ms: i64,
) -> Result<Option<NotificationDescriptor>, WorkerError> {
    if !message.has_data() {
        tracing::warn!("Push event carried no payload, ignoring");
        return Ok(None);
    }
    let payload = match message.json::<Value>() {
        Ok(Some(Value::Object(map))) => map,
        Ok(Some(other)) => {
            return Err(WorkerError::MalformedPayload(format!(
                "expected an object, got {}",
                json_type(&other)
            )));
        }
        Ok(None) => return Ok(None),
        Err(e) => return Err(WorkerError::MalformedPayload(e.to_string())),
    };

    Ok(Some(NotificationDescriptor {
        title: string_field(&payload, "title"),
        body: string_field(&payload, "body"),
        icon: non_empty(string_field(&payload, "icon")).unwrap_or_else(|| defaults.icon.clone()),
        badge: non_empty(string_field(&payload, "badge")).unwrap_or_else(|| defaults.badge.clone()),
        tag: non_empty(string_field(&payload, "tag")).unwrap_or_else(|| DEFAULT_TAG.to_string()),
        data: payload
            .get("data")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default(),
        require_interaction: payload
            .get("requireInteraction")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        actions: actions_field(&payload),
        timestamp: timestamp_field(&payload).unwrap_or(now_ms),
        vibrate: VIBRATE_PATTERN.to_vec(),
    }))
}

/// Same as [`normalize`] with the current wall-clock time.
pub fn normalize_now(
    message: &PushMessage,
    defaults: &NotificationDefaults,
) -> Result<Option<NotificationDescriptor>, WorkerError> {
    normalize(message, defaults, chrono::Utc::now().timestamp_millis())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn string_field(payload: &Map<String, Value>, key: &str) -> Option<String> {
    payload.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Well-formed action entries only; malformed ones are dropped.
fn actions_field(payload: &Map<String, Value>) -> Vec<ActionSpec> {
    let Some(items) = payload.get("actions").and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| serde_json::from_value::<ActionSpec>(item.clone()).ok())
        .collect()
}

/// Epoch milliseconds; fractional values are truncated.
fn timestamp_field(payload: &Map<String, Value>) -> Option<i64> {
    let value = payload.get("timestamp")?;
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
