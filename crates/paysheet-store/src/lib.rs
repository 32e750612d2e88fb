#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/paysheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod loader;
pub mod schema;
pub mod store;

pub use error::{Result, StoreError};
pub use loader::load;
pub use schema::{ColumnDef, SqlType, TableSchema};
pub use store::{ConnectionTarget, Store};
