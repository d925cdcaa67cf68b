//! A single result row with typed, nullable column access.

use std::fmt;

use rusqlite::types::Value;
use thiserror::Error;

/// Errors raised when reading a column out of a [`Row`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnError {
    /// The row has fewer columns than the requested ordinal.
    #[error("column {0} is out of range")]
    OutOfRange(usize),

    /// The stored value has a storage class the caller cannot use.
    #[error("column {index} holds {found}, expected {expected}")]
    Type {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
}

/// Numeric column value. SQLite columns with `NUMERIC` affinity may hold
/// either storage class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Integer(i64),
    Real(f64),
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Integer(v) => write!(f, "{v}"),
            Numeric::Real(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Integer(value)
    }
}

/// Column values of one row, addressed by ordinal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn value(&self, index: usize) -> Result<&Value, ColumnError> {
        self.values.get(index).ok_or(ColumnError::OutOfRange(index))
    }

    /// Text column. `None` for SQL NULL.
    pub fn text(&self, index: usize) -> Result<Option<&str>, ColumnError> {
        match self.value(index)? {
            Value::Null => Ok(None),
            Value::Text(s) => Ok(Some(s.as_str())),
            other => Err(type_error(index, "text", other)),
        }
    }

    /// Integer column. `None` for SQL NULL.
    pub fn integer(&self, index: usize) -> Result<Option<i64>, ColumnError> {
        match self.value(index)? {
            Value::Null => Ok(None),
            Value::Integer(v) => Ok(Some(*v)),
            other => Err(type_error(index, "integer", other)),
        }
    }

    /// Integer or real column. `None` for SQL NULL.
    pub fn numeric(&self, index: usize) -> Result<Option<Numeric>, ColumnError> {
        match self.value(index)? {
            Value::Null => Ok(None),
            Value::Integer(v) => Ok(Some(Numeric::Integer(*v))),
            Value::Real(v) => Ok(Some(Numeric::Real(*v))),
            other => Err(type_error(index, "numeric", other)),
        }
    }
}

fn type_error(index: usize, expected: &'static str, found: &Value) -> ColumnError {
    ColumnError::Type {
        index,
        expected,
        found: storage_class(found),
    }
}

fn storage_class(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Integer(_) => "integer",
        Value::Real(_) => "real",
        Value::Text(_) => "text",
        Value::Blob(_) => "blob",
    }
}
