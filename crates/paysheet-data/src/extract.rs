//! CSV extraction into polars frames.
//!
//! Sources are read with the polars CSV reader, inferring column types over
//! every row. Empty cells and the [`NULL_TOKENS`] become nulls. Columns listed
//! in [`SourceSpec::date_cols`] are then parsed into `Date`.

use crate::error::{DataError, Result};
use crate::source::{SourceSpec, Sources};
use crate::table_set::TableSet;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use polars::io::mmap::MmapBytesReader;
use polars::prelude::*;
use std::fs::File;
use std::io::Cursor;
use tracing::{debug, info};

/// Cell contents treated as missing values, besides the empty cell.
pub const NULL_TOKENS: &[&str] = &["nan", "NaN"];

/// Accepted date layouts, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

/// Accepted datetime layouts for date columns carrying a time part.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// `num_days_from_ce` of 1970-01-01.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Load every configured source into a table set.
///
/// Any unreadable or malformed source aborts the whole extraction.
pub fn extract(sources: &Sources) -> Result<TableSet> {
    info!("[EXTRACTION] Read CSV files.");

    let mut tables = TableSet::new();
    for (name, spec) in sources.iter() {
        let df = read_source(name, spec)?;
        tables = tables.with_table(name, df);
    }

    info!("[EXTRACTION] DONE.");
    Ok(tables)
}

/// Read a single source into a frame.
pub fn read_source(table: &str, spec: &SourceSpec) -> Result<DataFrame> {
    let file = File::open(&spec.filepath).map_err(|source| DataError::Io {
        path: spec.filepath.clone(),
        source,
    })?;
    let df = read_frame(table, file, &spec.date_cols)?;

    debug!(
        table,
        path = %spec.filepath.display(),
        rows = df.height(),
        columns = df.width(),
        "source loaded"
    );
    Ok(df)
}

/// Read in-memory CSV content.
pub fn read_csv(table: &str, content: &[u8], date_cols: &[String]) -> Result<DataFrame> {
    read_frame(table, Cursor::new(content), date_cols)
}

fn read_frame<R: MmapBytesReader>(table: &str, reader: R, date_cols: &[String]) -> Result<DataFrame> {
    let null_values = NullValues::AllColumns(NULL_TOKENS.iter().map(|t| (*t).into()).collect());
    let options = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|parse| parse.with_null_values(Some(null_values.clone())));

    let mut df = match options.into_reader_with_file_handle(reader).finish() {
        Ok(df) => df,
        Err(PolarsError::NoData(_)) => return Err(DataError::EmptySource(table.to_string())),
        Err(source) => {
            return Err(DataError::Csv {
                table: table.to_string(),
                source,
            });
        }
    };
    if df.width() == 0 {
        return Err(DataError::EmptySource(table.to_string()));
    }

    for name in date_cols {
        let Some(column) = df.column(name).ok() else {
            return Err(DataError::MissingColumn {
                table: table.to_string(),
                column: name.clone(),
            });
        };
        let dates = date_column(table, column)?;
        df.with_column(dates)?;
    }

    Ok(df)
}

/// Parse a configured date column into a `Date` column.
fn date_column(table: &str, column: &Column) -> Result<Column> {
    let name = column.name().clone();
    let raw = column.cast(&DataType::String)?;
    let days = raw
        .str()?
        .into_iter()
        .enumerate()
        .map(|(idx, value)| match value {
            None => Ok(None),
            Some(raw) => parse_date(raw)
                .map(|date| Some(date.num_days_from_ce() - EPOCH_DAYS_FROM_CE))
                .ok_or_else(|| DataError::InvalidDate {
                    table: table.to_string(),
                    column: name.to_string(),
                    row: idx + 1,
                    value: raw.to_string(),
                }),
        })
        .collect::<Result<Vec<Option<i32>>>>()?;

    let series = Series::new(name, days).cast(&DataType::Date)?;
    Ok(series.into())
}

/// Parse a date cell, accepting a trailing time part.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}
