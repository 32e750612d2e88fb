//! Column presence and type checks shared by the derivations.

use crate::error::{Result, TransformError};
use polars::prelude::*;

pub(crate) fn require_columns(table: &str, df: &DataFrame, columns: &[&str]) -> Result<()> {
    match columns
        .iter()
        .find(|column| df.get_column_index(column).is_none())
    {
        Some(missing) => Err(TransformError::MissingColumn {
            table: table.to_string(),
            column: (*missing).to_string(),
        }),
        None => Ok(()),
    }
}

pub(crate) fn require_dtype(
    table: &str,
    df: &DataFrame,
    column: &str,
    expected: &DataType,
) -> Result<()> {
    let actual = df.column(column)?.dtype();
    if actual == expected {
        Ok(())
    } else {
        Err(TransformError::ColumnType {
            table: table.to_string(),
            column: column.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

/// First of `candidates` present in `df`.
pub(crate) fn first_present<'a>(
    table: &str,
    df: &DataFrame,
    candidates: &[&'a str],
) -> Result<&'a str> {
    candidates
        .iter()
        .copied()
        .find(|column| df.get_column_index(column).is_some())
        .ok_or_else(|| TransformError::MissingColumn {
            table: table.to_string(),
            column: candidates.first().copied().unwrap_or_default().to_string(),
        })
}
