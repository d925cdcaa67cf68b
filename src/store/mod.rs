//! Persistence subsystem.
//!
//! # Data Flow
//! ```text
//! Entity::sync
//!     → RowSource::query_one (SQL text + bound parameters)
//!     → sqlite.rs (prepared statement, first row only)
//!     → row.rs (typed, nullable column access)
//! ```
//!
//! # Design Decisions
//! - Read-only: nothing in the request path writes
//! - At most one row is read per query, extra rows are ignored
//! - "No row" is `Ok(None)`; only execution failures are errors

pub mod row;
pub mod sqlite;

use rusqlite::types::Value;
use thiserror::Error;

pub use row::{ColumnError, Numeric, Row};
pub use sqlite::SqliteStore;

/// Errors raised by a row source.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened.
    #[error("cannot open database {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Statement preparation or execution failed.
    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// A previous holder of the connection panicked.
    #[error("database handle poisoned")]
    Poisoned,
}

/// Executes a parameterized query and yields at most one row.
///
/// Implementations must be safe to call from several threads at once,
/// either by serializing internally or by holding one handle per caller.
pub trait RowSource: Send + Sync {
    fn query_one(&self, sql: &str, params: &[Value]) -> Result<Option<Row>, StoreError>;
}
