#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/paysheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod pipeline;

// Re-export stage crates
pub use paysheet_data as data;
pub use paysheet_store as store;
pub use paysheet_transform as transform;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use paysheet_data::{SourceSpec, Sources, TableSet, tables};
pub use pipeline::Pipeline;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
