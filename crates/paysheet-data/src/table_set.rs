//! Named collection of in-memory tables passed between pipeline stages.

use crate::error::{DataError, Result};
use polars::prelude::DataFrame;
use std::collections::BTreeMap;

/// Logical table names used across the pipeline.
pub mod tables {
    /// Employee records as read from the source
    pub const EMPLOYEES_RAW: &str = "employees_raw";
    /// Timesheet events as read from the source
    pub const TIMESHEETS_RAW: &str = "timesheets_raw";
    /// Hours per (year, month, employee)
    pub const TIMESHEETS: &str = "timesheets";
    /// Salary per hour per (year, month, branch)
    pub const BRANCH_SALARY: &str = "branch_salary";
}

/// A set of named tables.
///
/// Stages never mutate a set they were given; they build and return a new
/// one, so each stage can be exercised on its own.
#[derive(Debug, Clone, Default)]
pub struct TableSet {
    tables: BTreeMap<String, DataFrame>,
}

impl TableSet {
    /// Create an empty table set.
    pub const fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
        }
    }

    /// Return a set that also holds `df` under `name`, replacing any table
    /// already stored under that name.
    pub fn with_table(mut self, name: impl Into<String>, df: DataFrame) -> Self {
        self.tables.insert(name.into(), df);
        self
    }

    /// Get a table by name.
    pub fn get(&self, name: &str) -> Result<&DataFrame> {
        self.tables
            .get(name)
            .ok_or_else(|| DataError::MissingTable(name.to_string()))
    }

    /// Whether a table is present.
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Table names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Number of tables held.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<(String, DataFrame)> for TableSet {
    fn from_iter<I: IntoIterator<Item = (String, DataFrame)>>(iter: I) -> Self {
        Self {
            tables: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn frame(values: &[i64]) -> DataFrame {
        DataFrame::new(vec![Series::new("id".into(), values).into()]).unwrap()
    }

    #[test]
    fn test_with_table_returns_new_set() {
        let empty = TableSet::new();
        let one = empty.clone().with_table(tables::EMPLOYEES_RAW, frame(&[1, 2]));

        assert!(empty.is_empty());
        assert_eq!(one.len(), 1);
        assert_eq!(one.get(tables::EMPLOYEES_RAW).unwrap().height(), 2);
    }

    #[test]
    fn test_missing_table() {
        let set = TableSet::new();
        let err = set.get(tables::BRANCH_SALARY).unwrap_err();
        assert!(matches!(err, DataError::MissingTable(ref name) if name == "branch_salary"));
    }

    #[test]
    fn test_replace_and_names() {
        let set = TableSet::new()
            .with_table(tables::TIMESHEETS_RAW, frame(&[1]))
            .with_table(tables::EMPLOYEES_RAW, frame(&[1]))
            .with_table(tables::TIMESHEETS_RAW, frame(&[1, 2, 3]));

        assert_eq!(set.len(), 2);
        assert!(set.contains(tables::TIMESHEETS_RAW));
        assert_eq!(set.get(tables::TIMESHEETS_RAW).unwrap().height(), 3);
        let names: Vec<_> = set.names().collect();
        assert_eq!(names, vec!["employees_raw", "timesheets_raw"]);
    }
}
