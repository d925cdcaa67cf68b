//! Database-backed entities.
//!
//! # Data Flow
//! ```text
//! (kind, id)
//!     → Entity::new (invalid, never synced)
//!     → Entity::sync
//!         → KindSchema::select_sql + bound id
//!         → RowSource::query_one
//!         → project.rs / task.rs decode the row
//!     → Entity (valid with a Record, or invalid without one)
//! ```
//!
//! # Design Decisions
//! - Validity is `record.is_some()`: fields and the flag cannot disagree
//! - Optional columns are `Option<T>`; NULL never becomes 0 or ""
//! - Adding a kind means a new `EntityKind` variant, schema and record type

pub mod kind;
pub mod project;
pub mod task;

use rusqlite::types::Value;
use thiserror::Error;

use crate::store::{ColumnError, Numeric, Row, RowSource, StoreError};

pub use kind::{EntityKind, KindSchema};
pub use project::Project;
pub use task::Task;

/// Reasons a sync could not produce a record, other than "no such row".
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Column(#[from] ColumnError),

    /// A required column held NULL.
    #[error("required column {column} is null")]
    MissingRequired { column: &'static str },
}

pub(crate) fn required_text(
    row: &Row,
    index: usize,
    column: &'static str,
) -> Result<String, SyncError> {
    row.text(index)?
        .map(str::to_owned)
        .ok_or(SyncError::MissingRequired { column })
}

/// Kind-specific fields of a valid entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Project(Project),
    Task(Task),
}

impl Record {
    fn decode(kind: EntityKind, row: &Row) -> Result<Self, SyncError> {
        match kind {
            EntityKind::Project => Project::from_row(row).map(Record::Project),
            EntityKind::Task => Task::from_row(row).map(Record::Task),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Project(_) => EntityKind::Project,
            Record::Task(_) => EntityKind::Task,
        }
    }

    /// Uniform view of the serializable fields.
    pub fn fields(&self) -> Fields<'_> {
        match self {
            Record::Project(p) => Fields {
                name: &p.name,
                deadline: p.deadline,
                urgency: p.urgency,
                importance: p.importance,
                body: p.description.as_deref(),
            },
            Record::Task(t) => Fields {
                name: &t.title,
                deadline: None,
                urgency: None,
                importance: None,
                body: None,
            },
        }
    }
}

/// Fields shared by every kind's XML form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fields<'a> {
    pub name: &'a str,
    pub deadline: Option<Numeric>,
    pub urgency: Option<i64>,
    pub importance: Option<i64>,
    /// Element text content. `None` renders a self-closing element.
    pub body: Option<&'a str>,
}

/// One identified row plus its validity.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: i64,
    kind: EntityKind,
    record: Option<Record>,
}

impl Entity {
    /// An entity that has not been synced yet, and is therefore invalid.
    pub fn new(kind: EntityKind, id: i64) -> Self {
        Self {
            id,
            kind,
            record: None,
        }
    }

    /// A valid entity with known fields.
    pub fn with_record(id: i64, record: Record) -> Self {
        Self {
            id,
            kind: record.kind(),
            record: Some(record),
        }
    }

    /// Construct and sync once.
    pub fn load(
        kind: EntityKind,
        id: i64,
        source: &dyn RowSource,
    ) -> (Self, Result<bool, SyncError>) {
        let mut entity = Self::new(kind, id);
        let outcome = entity.sync(source);
        (entity, outcome)
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn is_valid(&self) -> bool {
        self.record.is_some()
    }

    pub fn record(&self) -> Option<&Record> {
        self.record.as_ref()
    }

    /// Reload the fields from `source`.
    ///
    /// Returns `Ok(true)` when a row was found and decoded, `Ok(false)` when
    /// there is no row with this id. On `Ok(false)` and on any error the
    /// entity is left invalid.
    pub fn sync(&mut self, source: &dyn RowSource) -> Result<bool, SyncError> {
        match self.fetch(source) {
            Ok(record) => {
                let found = record.is_some();
                self.record = record;
                Ok(found)
            }
            Err(err) => {
                self.record = None;
                Err(err)
            }
        }
    }

    fn fetch(&self, source: &dyn RowSource) -> Result<Option<Record>, SyncError> {
        let sql = self.kind.schema().select_sql();
        let Some(row) = source.query_one(&sql, &[Value::Integer(self.id)])? else {
            return Ok(None);
        };
        Record::decode(self.kind, &row).map(Some)
    }
}
