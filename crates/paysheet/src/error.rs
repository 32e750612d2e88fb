//! Pipeline-level error type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors surfaced by a pipeline run. Every variant is fatal.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Extraction failed
    #[error("Extraction failed: {0}")]
    Extract(#[from] paysheet_data::DataError),

    /// Transformation failed
    #[error("Transformation failed: {0}")]
    Transform(#[from] paysheet_transform::TransformError),

    /// Schema setup or load failed
    #[error("Store error: {0}")]
    Store(#[from] paysheet_store::StoreError),

    /// Configuration file unreadable
    #[error("Cannot read config {path}: {source}")]
    ConfigIo {
        /// Path of the config file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file malformed
    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        /// Path of the config file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Configuration incomplete
    #[error("Invalid configuration: {0}")]
    Config(String),
}
