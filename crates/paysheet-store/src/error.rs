//! Error types for store operations.

use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while writing to the relational store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Database directory could not be created
    #[error("Cannot create database directory {path}: {source}")]
    Io {
        /// Directory that was being created
        path: std::path::PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Connection string not understood
    #[error("Invalid connection string: {0}")]
    InvalidConnection(String),

    /// Table missing from the table set
    #[error(transparent)]
    Data(#[from] paysheet_data::DataError),

    /// Column type with no SQL mapping
    #[error("Column {column} has unsupported type {dtype}")]
    UnsupportedType {
        /// Offending column
        column: String,
        /// Its polars type
        dtype: String,
    },

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
