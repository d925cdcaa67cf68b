use crate::entity::kind::KindSchema;
use crate::entity::{required_text, SyncError};
use crate::store::{Numeric, Row};

pub static SCHEMA: KindSchema = KindSchema {
    table: "projects",
    required: &["name"],
    optional: &["description", "deadline", "urgency", "importance"],
};

/// Fields of a `projects` row.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub name: String,
    /// Free text; `Some("")` and `None` are different states.
    pub description: Option<String>,
    pub deadline: Option<Numeric>,
    pub urgency: Option<i64>,
    pub importance: Option<i64>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            deadline: None,
            urgency: None,
            importance: None,
        }
    }

    pub(crate) fn from_row(row: &Row) -> Result<Self, SyncError> {
        let opt = SCHEMA.optional_offset();
        Ok(Self {
            name: required_text(row, 0, SCHEMA.required[0])?,
            description: row.text(opt)?.map(str::to_owned),
            deadline: row.numeric(opt + 1)?,
            urgency: row.integer(opt + 2)?,
            importance: row.integer(opt + 3)?,
        })
    }
}
