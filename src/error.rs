use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// The dimension an index was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// A data column, label column excluded.
    Column,
    /// A data row, header row excluded.
    Row,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Column => write!(f, "column"),
            Axis::Row => write!(f, "row"),
        }
    }
}

#[derive(Error, Debug)]
/// Document error
pub enum DocumentError {
    #[error("cannot read {}: {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("{axis} index {index} is out of range ({len} {axis}s)")]
    OutOfRange { axis: Axis, index: usize, len: usize },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("row not found: {0}")]
    RowNotFound(String),

    #[error("cannot convert {value:?} at column {column}, row {row} to {target}: {reason}")]
    ConversionError {
        column: usize,
        row: usize,
        value: String,
        target: &'static str,
        reason: String,
    },

    #[error("cannot deserialize row {row}: {message}")]
    Deserialize { row: usize, message: String },
}

/// Result alias used by every fallible operation of this crate.
pub type Result<T> = std::result::Result<T, DocumentError>;
