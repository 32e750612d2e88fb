//! Error types for extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading sources into tables.
#[derive(Debug, Error)]
pub enum DataError {
    /// Source file could not be opened or read
    #[error("Cannot read source {path}: {source}")]
    Io {
        /// Path of the source
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content
    #[error("CSV error in {table}: {source}")]
    Csv {
        /// Logical table name
        table: String,
        /// Underlying reader error
        #[source]
        source: polars::prelude::PolarsError,
    },

    /// Source has no header row
    #[error("Source for {0} is empty")]
    EmptySource(String),

    /// A configured column is not present in the source
    #[error("Column {column} not found in {table}")]
    MissingColumn {
        /// Logical table name
        table: String,
        /// Column that was expected
        column: String,
    },

    /// A date cell could not be parsed
    #[error("Invalid date {value:?} in {table}.{column} at row {row}")]
    InvalidDate {
        /// Logical table name
        table: String,
        /// Column holding the cell
        column: String,
        /// 1-based data row
        row: usize,
        /// Raw cell content
        value: String,
    },

    /// Table requested from a table set that does not hold it
    #[error("Table not found: {0}")]
    MissingTable(String),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
