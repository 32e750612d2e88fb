//! Declared table shapes and their DDL.

use crate::error::{Result, StoreError};
use polars::prelude::{DataFrame, DataType};

/// Column types understood by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    /// 64-bit integer
    Integer,
    /// Double precision float
    Real,
    /// Free text
    Text,
    /// Calendar date, stored as `YYYY-MM-DD`
    Date,
    /// Time of day, stored as `HH:MM:SS`
    Time,
    /// Boolean, stored as 0/1 in an INTEGER column
    Boolean,
}

impl SqlType {
    /// Type name used in DDL.
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Text => "TEXT",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Boolean => "INTEGER",
        }
    }

    /// Store type for a frame column type, if there is one.
    pub fn from_dtype(dtype: &DataType) -> Option<Self> {
        match dtype {
            DataType::Boolean => Some(Self::Boolean),
            DataType::String => Some(Self::Text),
            DataType::Date => Some(Self::Date),
            dt if dt.is_integer() => Some(Self::Integer),
            dt if dt.is_float() => Some(Self::Real),
            _ => None,
        }
    }
}

/// One column of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Column name
    pub name: String,
    /// Column type
    pub sql_type: SqlType,
    /// Whether the column is the primary key
    pub primary_key: bool,
}

impl ColumnDef {
    /// A plain column.
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            primary_key: false,
        }
    }

    /// Mark the column as primary key.
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", quote_ident(&self.name), self.sql_type.as_sql());
        if self.primary_key {
            sql.push_str(" PRIMARY KEY");
        }
        sql
    }
}

/// Shape of a persisted table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// Table name
    pub name: String,
    /// Columns in order
    pub columns: Vec<ColumnDef>,
}

impl TableSchema {
    /// Create a table schema.
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Schema mirroring a frame's columns, without keys.
    pub fn from_frame(name: impl Into<String>, df: &DataFrame) -> Result<Self> {
        let columns = df
            .get_columns()
            .iter()
            .map(|column| {
                SqlType::from_dtype(column.dtype())
                    .map(|ty| ColumnDef::new(column.name().as_str(), ty))
                    .ok_or_else(|| StoreError::UnsupportedType {
                        column: column.name().to_string(),
                        dtype: column.dtype().to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(name, columns))
    }

    fn column_list(&self) -> String {
        self.columns
            .iter()
            .map(ColumnDef::to_sql)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `CREATE TABLE` statement.
    pub fn create_sql(&self) -> String {
        format!("CREATE TABLE {} ({})", quote_ident(&self.name), self.column_list())
    }

    /// `CREATE TABLE IF NOT EXISTS` statement.
    pub fn create_if_not_exists_sql(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote_ident(&self.name),
            self.column_list()
        )
    }

    /// Parameterized `INSERT` statement covering every column.
    pub fn insert_sql(&self) -> String {
        let names = self
            .columns
            .iter()
            .map(|c| quote_ident(&c.name))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=self.columns.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident(&self.name),
            names,
            placeholders
        )
    }
}

/// Quote an SQL identifier.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Persisted employee table.
pub fn employees() -> TableSchema {
    TableSchema::new(
        "employees",
        vec![
            ColumnDef::new("employee_id", SqlType::Integer).primary_key(),
            ColumnDef::new("branch_id", SqlType::Integer),
            ColumnDef::new("salary", SqlType::Integer),
            ColumnDef::new("join_date", SqlType::Date),
            ColumnDef::new("resign_date", SqlType::Date),
        ],
    )
}

/// Persisted timesheet table.
pub fn timesheets() -> TableSchema {
    TableSchema::new(
        "timesheets",
        vec![
            ColumnDef::new("timesheet_id", SqlType::Integer).primary_key(),
            ColumnDef::new("employee_id", SqlType::Integer),
            ColumnDef::new("date", SqlType::Date),
            ColumnDef::new("checkin", SqlType::Time),
            ColumnDef::new("checkout", SqlType::Time),
        ],
    )
}

/// Persisted branch payroll table.
pub fn branch_salary() -> TableSchema {
    TableSchema::new(
        "branch_salary",
        vec![
            ColumnDef::new("branch_id", SqlType::Integer),
            ColumnDef::new("year", SqlType::Integer),
            ColumnDef::new("month", SqlType::Integer),
            ColumnDef::new("salary_per_hour", SqlType::Real),
        ],
    )
}

/// All declared tables.
pub fn declared() -> Vec<TableSchema> {
    vec![employees(), timesheets(), branch_salary()]
}
