//! SQLite-backed row source.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OpenFlags};

use crate::config::DatabaseConfig;
use crate::store::{Row, RowSource, StoreError};

/// Tables read by the entity kinds. Applied with `CREATE TABLE IF NOT EXISTS`
/// so an existing database is left alone.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS projects (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT,
    deadline    NUMERIC,
    urgency     INTEGER,
    importance  INTEGER
);
CREATE TABLE IF NOT EXISTS tasks (
    id    INTEGER PRIMARY KEY,
    title TEXT NOT NULL
);
"#;

/// A single SQLite connection shared by all requests.
///
/// `rusqlite::Connection` is `Send` but not `Sync`, so the handle sits behind
/// a mutex and concurrent requests take turns on it.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the database file described by `config`.
    pub fn open(path: &Path, config: &DatabaseConfig) -> Result<Self, StoreError> {
        let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        if config.create_if_missing {
            flags |= OpenFlags::SQLITE_OPEN_CREATE;
        }

        let conn = Connection::open_with_flags(path, flags).map_err(|source| StoreError::Open {
            path: path.display().to_string(),
            source,
        })?;
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;

        let store = Self::from_connection(conn);
        if config.initialize_schema {
            store.initialize_schema()?;
        }

        tracing::info!(
            path = %path.display(),
            busy_timeout_ms = config.busy_timeout_ms,
            "Database opened"
        );
        Ok(store)
    }

    /// Open a private in-memory database with the schema applied.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::Open {
            path: ":memory:".to_string(),
            source,
        })?;
        let store = Self::from_connection(conn);
        store.initialize_schema()?;
        Ok(store)
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn initialize_schema(&self) -> Result<(), StoreError> {
        self.execute_batch(SCHEMA)
    }

    /// Run one or more statements without results. Used for schema setup and
    /// seeding test data.
    pub fn execute_batch(&self, sql: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        conn.execute_batch(sql)?;
        Ok(())
    }
}

impl RowSource for SqliteStore {
    fn query_one(&self, sql: &str, params: &[Value]) -> Result<Option<Row>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let mut stmt = conn.prepare_cached(sql)?;
        let columns = stmt.column_count();
        let mut rows = stmt.query(params_from_iter(params.iter()))?;

        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let values = (0..columns)
            .map(|index| row.get::<_, Value>(index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(Row::new(values)))
    }
}
