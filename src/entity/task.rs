use crate::entity::kind::KindSchema;
use crate::entity::{required_text, SyncError};
use crate::store::Row;

pub static SCHEMA: KindSchema = KindSchema {
    table: "tasks",
    required: &["title"],
    optional: &[],
};

/// Fields of a `tasks` row. The title is served as the `name` attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub title: String,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub(crate) fn from_row(row: &Row) -> Result<Self, SyncError> {
        Ok(Self {
            title: required_text(row, 0, SCHEMA.required[0])?,
        })
    }
}
