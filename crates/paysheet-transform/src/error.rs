//! Error types for the transform stage.

use thiserror::Error;

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

/// Errors that can occur while deriving tables.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Input table missing from the table set
    #[error(transparent)]
    Data(#[from] paysheet_data::DataError),

    /// Required column absent
    #[error("Column {column} not found in {table}")]
    MissingColumn {
        /// Table that was inspected
        table: String,
        /// Column that was expected
        column: String,
    },

    /// Column present with an unusable type
    #[error("Column {table}.{column} has type {actual}, expected {expected}")]
    ColumnType {
        /// Table that was inspected
        table: String,
        /// Offending column
        column: String,
        /// Type that was required
        expected: String,
        /// Type that was found
        actual: String,
    },

    /// Time-of-day cell that could not be parsed
    #[error("Invalid time {value:?} in column {column}")]
    InvalidTime {
        /// Column holding the cell
        column: String,
        /// Raw cell content
        value: String,
    },

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
