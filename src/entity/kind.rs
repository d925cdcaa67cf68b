//! The closed set of entity kinds and their storage layout.

use serde::{Deserialize, Serialize};

use crate::entity::{project, task};

/// Every kind of record the service can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Project,
    Task,
}

impl EntityKind {
    /// All kinds, in default routing order.
    pub const ALL: [EntityKind; 2] = [EntityKind::Project, EntityKind::Task];

    /// Element name used in XML and in the default route prefix.
    pub fn tag(self) -> &'static str {
        match self {
            EntityKind::Project => "project",
            EntityKind::Task => "task",
        }
    }

    pub fn schema(self) -> &'static KindSchema {
        match self {
            EntityKind::Project => &project::SCHEMA,
            EntityKind::Task => &task::SCHEMA,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Table and columns read by one entity kind.
///
/// Columns are selected in order: required first, then optional, so the
/// decoder can address them by ordinal.
#[derive(Debug)]
pub struct KindSchema {
    pub table: &'static str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

impl KindSchema {
    /// `SELECT <required>, <optional> FROM <table> WHERE id = ?1`
    pub fn select_sql(&self) -> String {
        let columns = self
            .required
            .iter()
            .chain(self.optional)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        format!("SELECT {columns} FROM {} WHERE id = ?1", self.table)
    }

    /// Ordinal of the first optional column.
    pub fn optional_offset(&self) -> usize {
        self.required.len()
    }
}
