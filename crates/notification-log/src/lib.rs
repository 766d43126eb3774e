//! SQLite-backed log of notification delivery outcomes.

pub mod logs;
pub mod schema;

#[cfg(test)]
mod tests;

pub use logs::{DeliveryStatus, LogEntry, NewLogEntry, SaveResponse};

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

/// Thread-safe store handle wrapping a single SQLite connection.
#[derive(Clone)]
pub struct LogStore {
    conn: Arc<Mutex<Connection>>,
}

impl LogStore {
    /// Open or create the store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LogStoreError> {
        Self::init(Connection::open(path)?)
    }

    /// Create an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, LogStoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, LogStoreError> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.with_conn(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode=WAL;
                 PRAGMA busy_timeout=5000;",
            )?;
            schema::run_migrations(conn)
        })?;
        Ok(store)
    }

    /// Access the underlying connection with a closure.
    pub fn with_conn<F, R>(&self, f: F) -> Result<R, LogStoreError>
    where
        F: FnOnce(&Connection) -> Result<R, LogStoreError>,
    {
        let conn = self.conn.lock().map_err(|_| LogStoreError::LockPoisoned)?;
        f(&conn)
    }
}

/// Log store error type.
#[derive(Debug, thiserror::Error)]
pub enum LogStoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Log store lock poisoned")]
    LockPoisoned,

    #[error("Invalid log entry: {0}")]
    InvalidData(String),
}
