//! Data types shared between the engine and its host.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw push message as delivered by the push transport.
///
/// `data` is `None` when the push carried no payload body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushMessage {
    data: Option<Vec<u8>>,
}

impl PushMessage {
    /// A push with no payload body.
    pub fn empty() -> Self {
        Self { data: None }
    }

    /// Wrap a transport body. A zero-length body counts as no payload.
    pub fn from_body(body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        Self {
            data: (!body.is_empty()).then_some(body),
        }
    }

    /// Build a push whose body is the serialized JSON value.
    pub fn from_json(value: &Value) -> Self {
        Self::from_body(value.to_string())
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Parse the payload body as JSON. Returns `Ok(None)` when there is no body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<Option<T>, serde_json::Error> {
        self.data
            .as_deref()
            .map(serde_json::from_slice)
            .transpose()
    }
}

/// An action button attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub action: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Fully defaulted description of a notification to display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDescriptor {
    /// Passed through from the payload; a push without a title keeps `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub icon: String,
    pub badge: String,
    pub tag: String,
    pub data: Map<String, Value>,
    pub require_interaction: bool,
    pub actions: Vec<ActionSpec>,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub vibrate: Vec<u32>,
}

/// Message posted to an existing window when a notification is clicked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    pub notification_data: Map<String, Value>,
}

impl ClientMessage {
    pub const NOTIFICATION_CLICK: &'static str = "notification-click";

    pub fn notification_click(action: Option<String>, notification_data: Map<String, Value>) -> Self {
        Self {
            message_type: Self::NOTIFICATION_CLICK.to_string(),
            action,
            notification_data,
        }
    }
}

/// A click on a displayed notification or one of its action buttons.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationClickEvent {
    pub notification: NotificationDescriptor,
    /// Identifier of the pressed action button, `None` for a click on the body.
    pub action: Option<String>,
}

impl NotificationClickEvent {
    /// Platforms report a body click as an empty action string.
    pub fn new(notification: NotificationDescriptor, action: Option<String>) -> Self {
        Self {
            notification,
            action: action.filter(|a| !a.is_empty()),
        }
    }
}

/// A notification dismissed without interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationCloseEvent {
    pub tag: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_body_counts_as_no_payload() {
        assert!(!PushMessage::from_body(Vec::new()).has_data());
        assert!(PushMessage::from_body("{}").has_data());
    }

    #[test]
    fn json_without_body_is_none() {
        let parsed: Option<Value> = PushMessage::empty().json().unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn client_message_uses_wire_field_names() {
        let mut data = Map::new();
        data.insert("scheduleId".into(), json!("9"));
        let msg = ClientMessage::notification_click(Some("view".into()), data);
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "notification-click",
                "action": "view",
                "notificationData": { "scheduleId": "9" }
            })
        );
    }

    #[test]
    fn client_message_omits_missing_action() {
        let msg = ClientMessage::notification_click(None, Map::new());
        let value = serde_json::to_value(&msg).unwrap();
        assert!(value.get("action").is_none());
    }

    #[test]
    fn click_event_treats_empty_action_as_body_click() {
        let descriptor: NotificationDescriptor = serde_json::from_value(json!({
            "icon": "/i.png",
            "badge": "/b.png",
            "tag": "default",
            "data": {},
            "requireInteraction": false,
            "actions": [],
            "timestamp": 0,
            "vibrate": [200, 100, 200]
        }))
        .unwrap();
        let event = NotificationClickEvent::new(descriptor, Some(String::new()));
        assert_eq!(event.action, None);
    }
}
