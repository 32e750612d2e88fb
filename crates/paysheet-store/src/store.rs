//! SQLite-backed relational store.

use crate::error::{Result, StoreError};
use crate::schema::{self, TableSchema, quote_ident};
use polars::prelude::*;
use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where a connection string points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    /// Private in-memory database
    Memory,
    /// Database file
    File(PathBuf),
}

impl ConnectionTarget {
    /// Parse a connection string.
    ///
    /// Accepts `sqlite::memory:`, `:memory:`, `sqlite://<path>`,
    /// `sqlite:<path>` and bare paths.
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);

        if path == ":memory:" {
            return Ok(Self::Memory);
        }
        if path.is_empty() {
            return Err(StoreError::InvalidConnection(url.to_string()));
        }
        if let Some((scheme, _)) = path.split_once("://") {
            return Err(StoreError::InvalidConnection(format!(
                "unsupported scheme {scheme:?} in {url}"
            )));
        }

        Ok(Self::File(PathBuf::from(path)))
    }
}

/// Connection to the target database.
#[derive(Debug)]
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the database a connection string points to.
    pub fn connect(url: &str) -> Result<Self> {
        match ConnectionTarget::parse(url)? {
            ConnectionTarget::Memory => Self::in_memory(),
            ConnectionTarget::File(path) => Self::open(path),
        }
    }

    /// Open or create a database file, creating its directory if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Create an in-memory database (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Create the declared tables that do not exist yet.
    pub fn build_schema(&self) -> Result<()> {
        for table in schema::declared() {
            self.create_table(&table)?;
        }
        Ok(())
    }

    /// Create a table if it does not exist.
    pub fn create_table(&self, table: &TableSchema) -> Result<()> {
        self.conn.execute(&table.create_if_not_exists_sql(), [])?;
        Ok(())
    }

    /// Replace `name` with the contents of `df`.
    ///
    /// The table is dropped, recreated from the frame's column types and
    /// filled inside one transaction. Returns the number of rows written.
    pub fn replace_table(&self, name: &str, df: &DataFrame) -> Result<usize> {
        let table = TableSchema::from_frame(name, df)?;
        let columns = df
            .get_columns()
            .iter()
            .map(column_values)
            .collect::<Result<Vec<_>>>()?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(&format!("DROP TABLE IF EXISTS {}", quote_ident(name)), [])?;
        tx.execute(&table.create_sql(), [])?;
        {
            let mut stmt = tx.prepare(&table.insert_sql())?;
            for row in 0..df.height() {
                stmt.execute(params_from_iter(columns.iter().map(|values| &values[row])))?;
            }
        }
        tx.commit()?;

        debug!(table = name, rows = df.height(), "table replaced");
        Ok(df.height())
    }

    /// Names of all tables, sorted.
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Column names of a table, in order.
    pub fn column_names(&self, table: &str) -> Result<Vec<String>> {
        let stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {} LIMIT 0", quote_ident(table)))?;
        Ok(stmt.column_names().into_iter().map(str::to_string).collect())
    }

    /// Number of rows in a table.
    pub fn row_count(&self, table: &str) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", quote_ident(table)),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// All rows of a table in insertion order.
    pub fn read_rows(&self, table: &str) -> Result<Vec<Vec<Value>>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {} ORDER BY rowid", quote_ident(table)))?;
        let width = stmt.column_count();
        let rows = stmt
            .query_map([], |row| {
                (0..width)
                    .map(|i| row.get::<_, Value>(i))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

/// Convert a frame column into SQL values, nulls included.
fn column_values(column: &Column) -> Result<Vec<Value>> {
    let dtype = column.dtype();
    let values = match dtype {
        DataType::Boolean => column
            .bool()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, |b| Value::Integer(i64::from(b))))
            .collect(),
        DataType::String => column
            .str()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, |s| Value::Text(s.to_string())))
            .collect(),
        DataType::Date => column
            .cast(&DataType::String)?
            .str()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, |s| Value::Text(s.to_string())))
            .collect(),
        dt if dt.is_integer() => column
            .cast(&DataType::Int64)?
            .i64()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::Integer))
            .collect(),
        dt if dt.is_float() => column
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::Real))
            .collect(),
        other => {
            return Err(StoreError::UnsupportedType {
                column: column.name().to_string(),
                dtype: other.to_string(),
            });
        }
    };
    Ok(values)
}
