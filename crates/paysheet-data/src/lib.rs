#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/paysheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod extract;
pub mod source;
pub mod table_set;

pub use error::{DataError, Result};
pub use extract::{extract, read_source};
pub use source::{SourceSpec, Sources};
pub use table_set::{TableSet, tables};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
