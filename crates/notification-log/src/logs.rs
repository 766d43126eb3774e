//! Notification delivery log entries.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{LogStore, LogStoreError};

const MAX_LIST_LIMIT: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Failed,
    Pending,
}

impl DeliveryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed => "failed",
            Self::Pending => "pending",
        }
    }

    fn parse(s: &str) -> Result<Self, LogStoreError> {
        match s {
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            "pending" => Ok(Self::Pending),
            other => Err(LogStoreError::InvalidData(format!("unknown status '{other}'"))),
        }
    }
}

/// A delivery outcome to record.
#[derive(Debug, Clone, Deserialize)]
pub struct NewLogEntry {
    pub user_id: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub metadata: Value,
    pub status: DeliveryStatus,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
}

/// A stored log row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub id: i64,
    pub user_id: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub category: String,
    pub subject: String,
    pub content: String,
    pub metadata: Value,
    pub status: DeliveryStatus,
    pub error_message: Option<String>,
    pub sent_at: String,
    pub created_at: String,
}

/// `{success: true, data}` or `{success: false, error}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SaveResponse {
    Saved { success: bool, data: LogEntry },
    Failed { success: bool, error: String },
}

impl SaveResponse {
    pub fn from_result(result: Result<LogEntry, LogStoreError>) -> Self {
        match result {
            Ok(data) => Self::Saved { success: true, data },
            Err(e) => Self::Failed {
                success: false,
                error: e.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

impl NewLogEntry {
    fn validate(&self) -> Result<(), LogStoreError> {
        if self.user_id.trim().is_empty() {
            return Err(LogStoreError::InvalidData("user_id is required".into()));
        }
        if self.notification_type.trim().is_empty() {
            return Err(LogStoreError::InvalidData("type is required".into()));
        }
        if self.status == DeliveryStatus::Failed && self.error_message.is_none() {
            tracing::debug!(user_id = %self.user_id, "Failed delivery logged without error message");
        }
        Ok(())
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Raw column values; converted once the statement has finished.
struct LogRow {
    id: i64,
    user_id: String,
    notification_type: String,
    category: String,
    subject: String,
    content: String,
    error_message: Option<String>,
    metadata: String,
    status: String,
    sent_at: String,
    created_at: String,
}

fn read_row(row: &Row<'_>) -> Result<LogRow, rusqlite::Error> {
    Ok(LogRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        notification_type: row.get(2)?,
        category: row.get(3)?,
        subject: row.get(4)?,
        content: row.get(5)?,
        error_message: row.get(6)?,
        metadata: row.get(7)?,
        status: row.get(8)?,
        sent_at: row.get(9)?,
        created_at: row.get(10)?,
    })
}

impl TryFrom<LogRow> for LogEntry {
    type Error = LogStoreError;

    fn try_from(row: LogRow) -> Result<Self, Self::Error> {
        let metadata = serde_json::from_str(&row.metadata).unwrap_or_else(|e| {
            tracing::warn!(id = row.id, "Corrupt metadata in notification log: {e}");
            Value::Null
        });
        Ok(LogEntry {
            id: row.id,
            user_id: row.user_id,
            notification_type: row.notification_type,
            category: row.category,
            subject: row.subject,
            content: row.content,
            metadata,
            status: DeliveryStatus::parse(&row.status)?,
            error_message: row.error_message,
            sent_at: row.sent_at,
            created_at: row.created_at,
        })
    }
}

const SELECT_COLUMNS: &str = "SELECT id, user_id, type, category, subject, content, error_message, metadata, status, sent_at, created_at FROM notification_logs";

impl LogStore {
    /// Record a delivery outcome and return the stored row.
    pub fn save(&self, entry: &NewLogEntry) -> Result<LogEntry, LogStoreError> {
        entry.validate()?;
        let now = Utc::now();
        let sent_at = timestamp(entry.sent_at.unwrap_or(now));
        let created_at = timestamp(now);
        let metadata = if entry.metadata.is_null() {
            "{}".to_string()
        } else {
            entry.metadata.to_string()
        };

        let id = self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO notification_logs (user_id, type, category, subject, content, metadata, status, error_message, sent_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                rusqlite::params![
                    entry.user_id,
                    entry.notification_type,
                    entry.category,
                    entry.subject,
                    entry.content,
                    metadata,
                    entry.status.as_str(),
                    entry.error_message,
                    sent_at,
                    created_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        tracing::debug!(id, user_id = %entry.user_id, status = entry.status.as_str(), "Notification log saved");
        self.get(id)?
            .ok_or_else(|| LogStoreError::InvalidData(format!("log {id} vanished after insert")))
    }

    pub fn get(&self, id: i64) -> Result<Option<LogEntry>, LogStoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
            let mut rows = stmt.query_map([id], read_row)?;
            let first = rows.next().transpose()?;
            first.map(LogEntry::try_from).transpose()
        })
    }

    /// Newest-first entries for a user, capped at 500.
    pub fn recent_for_user(&self, user_id: &str, limit: usize) -> Result<Vec<LogEntry>, LogStoreError> {
        let limit = limit.clamp(1, MAX_LIST_LIMIT) as i64;
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_COLUMNS} WHERE user_id = ?1 ORDER BY sent_at DESC, id DESC LIMIT ?2"
            ))?;
            let rows = stmt
                .query_map(rusqlite::params![user_id, limit], read_row)?
                .collect::<Result<Vec<_>, _>>()?;
            rows.into_iter().map(LogEntry::try_from).collect()
        })
    }
}
