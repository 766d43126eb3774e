use serde_json::json;

use crate::{DeliveryStatus, LogStore, NewLogEntry};


fn test_store() -> LogStore {
    LogStore::open_in_memory().expect("Failed to create test store")
}

fn entry(user_id: &str, status: DeliveryStatus) -> NewLogEntry {
    serde_json::from_value(json!({
        "user_id": user_id,
        "type": "push",
        "category": "schedule_reminder",
        "subject": "Reminder",
        "content": "Your shift starts in 1 hour",
        "metadata": { "scheduleId": "7" },
        "status": status,
    }))
    .expect("valid entry")
}
