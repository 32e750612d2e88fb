//! Source configuration.
//!
//! A [`Sources`] value maps each logical table name to the file it is read
//! from and the columns that hold dates.

use crate::table_set::tables;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Location and date columns of one tabular source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Path of the CSV file
    pub filepath: PathBuf,
    /// Columns to parse as dates
    #[serde(default)]
    pub date_cols: Vec<String>,
}

impl SourceSpec {
    /// Create a new source spec.
    pub fn new<P, I, S>(filepath: P, date_cols: I) -> Self
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            filepath: filepath.into(),
            date_cols: date_cols.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `column` is configured as a date column.
    pub fn is_date_col(&self, column: &str) -> bool {
        self.date_cols.iter().any(|c| c == column)
    }
}

/// Mapping from logical table name to its source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sources(BTreeMap<String, SourceSpec>);

impl Sources {
    /// Create an empty mapping.
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// The two standard sources: employee and timesheet exports.
    pub fn standard(employees: impl AsRef<Path>, timesheets: impl AsRef<Path>) -> Self {
        Self::new()
            .with(
                tables::EMPLOYEES_RAW,
                SourceSpec::new(employees.as_ref(), ["join_date", "resign_date"]),
            )
            .with(
                tables::TIMESHEETS_RAW,
                SourceSpec::new(timesheets.as_ref(), ["date"]),
            )
    }

    /// Add or replace a source.
    pub fn with(mut self, table: impl Into<String>, spec: SourceSpec) -> Self {
        self.0.insert(table.into(), spec);
        self
    }

    /// Look up the source of a table.
    pub fn get(&self, table: &str) -> Option<&SourceSpec> {
        self.0.get(table)
    }

    /// Iterate over `(table, source)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SourceSpec)> {
        self.0.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Number of configured sources.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no sources are configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
