//! Static routing table: notification type → navigation target.

use serde_json::{Map, Value};
use url::form_urlencoded;

pub const CALENDAR_PATH: &str = "/calendar";
pub const LEAVE_REQUESTS_PATH: &str = "/leave-requests";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Notification type discriminant carried in `data.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    ScheduleCreated,
    ScheduleUpdated,
    ScheduleReminder,
    LeaveRequest,
    Other,
}

impl NotificationKind {
    pub fn from_type(value: Option<&str>) -> Self {
        match value {
            Some("schedule_created") => Self::ScheduleCreated,
            Some("schedule_updated") => Self::ScheduleUpdated,
            Some("schedule_reminder") => Self::ScheduleReminder,
            Some("leave_request") => Self::LeaveRequest,
            _ => Self::Other,
        }
    }

    pub fn from_data(data: &Map<String, Value>) -> Self {
        Self::from_type(data.get("type").and_then(Value::as_str))
    }

    pub fn is_schedule(self) -> bool {
        matches!(
            self,
            Self::ScheduleCreated | Self::ScheduleUpdated | Self::ScheduleReminder
        )
    }
}

/// Resolve the path a new window should open at for the given notification data.
pub fn target_url(data: &Map<String, Value>) -> String {
    match NotificationKind::from_data(data) {
        kind if kind.is_schedule() => calendar_url(data.get("scheduleId")),
        NotificationKind::LeaveRequest => LEAVE_REQUESTS_PATH.to_string(),
        _ => DASHBOARD_PATH.to_string(),
    }
}

/// `/calendar?scheduleId={id}`; the bare calendar view when no id is present.
fn calendar_url(schedule_id: Option<&Value>) -> String {
    let id = match schedule_id {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return CALENDAR_PATH.to_string(),
    };
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("scheduleId", &id)
        .finish();
    format!("{CALENDAR_PATH}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test data must be an object"),
        }
    }

    #[test]
    fn schedule_types_route_to_calendar() {
        for kind in ["schedule_created", "schedule_updated", "schedule_reminder"] {
            assert_eq!(
                target_url(&data(json!({ "type": kind, "scheduleId": "42" }))),
                "/calendar?scheduleId=42",
                "{kind} should open the calendar"
            );
        }
    }

    #[test]
    fn numeric_schedule_id_is_accepted() {
        assert_eq!(
            target_url(&data(json!({ "type": "schedule_reminder", "scheduleId": 7 }))),
            "/calendar?scheduleId=7"
        );
    }

    #[test]
    fn schedule_without_id_opens_calendar_view() {
        assert_eq!(
            target_url(&data(json!({ "type": "schedule_created" }))),
            CALENDAR_PATH
        );
    }

    #[test]
    fn schedule_id_is_query_encoded() {
        assert_eq!(
            target_url(&data(json!({ "type": "schedule_updated", "scheduleId": "a b&c" }))),
            "/calendar?scheduleId=a+b%26c"
        );
    }

    #[test]
    fn leave_request_ignores_other_fields() {
        assert_eq!(
            target_url(&data(json!({ "type": "leave_request", "scheduleId": "42", "extra": true }))),
            LEAVE_REQUESTS_PATH
        );
    }

    #[test]
    fn unknown_or_missing_type_routes_to_dashboard() {
        assert_eq!(target_url(&Map::new()), DASHBOARD_PATH);
        assert_eq!(target_url(&data(json!({ "type": "payroll_ready" }))), DASHBOARD_PATH);
        assert_eq!(target_url(&data(json!({ "type": 5 }))), DASHBOARD_PATH);
    }
}
