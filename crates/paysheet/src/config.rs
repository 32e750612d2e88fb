//! Pipeline configuration.

use crate::error::{PipelineError, Result};
use paysheet_data::{Sources, tables};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Sources to read and the database to write to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Logical table name to source file
    pub sources: Sources,
    /// Connection string; the platform default is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

impl PipelineConfig {
    /// Create a configuration.
    pub const fn new(sources: Sources) -> Self {
        Self {
            sources,
            database: None,
        }
    }

    /// Set the connection string.
    pub fn with_database(mut self, url: impl Into<String>) -> Self {
        self.database = Some(url.into());
        self
    }

    /// Read a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PipelineError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| PipelineError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check that both raw sources are configured.
    pub fn validate(&self) -> Result<()> {
        for table in [tables::EMPLOYEES_RAW, tables::TIMESHEETS_RAW] {
            if self.sources.get(table).is_none() {
                return Err(PipelineError::Config(format!("no source for {table}")));
            }
        }
        Ok(())
    }

    /// Connection string in effect.
    pub fn database_url(&self) -> String {
        self.database
            .clone()
            .unwrap_or_else(|| format!("sqlite://{}", default_database_path().display()))
    }
}

/// Default database directory.
///
/// Uses platform-specific data directories:
/// - Linux: `~/.local/share/paysheet/`
/// - macOS: `~/Library/Application Support/paysheet/`
/// - Windows: `%APPDATA%\paysheet\`
pub fn default_database_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("paysheet")
}

/// Default database file.
pub fn default_database_path() -> PathBuf {
    default_database_dir().join("paysheet.db")
}

#[cfg(test)]
mod tests {
    use super::*;
    use paysheet_data::SourceSpec;
    use std::io::Write;

    #[test]
    fn test_parse_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "sources": {{
                    "employees_raw": {{ "filepath": "e.csv", "date_cols": ["join_date", "resign_date"] }},
                    "timesheets_raw": {{ "filepath": "t.csv", "date_cols": ["date"] }}
                }},
                "database": "sqlite::memory:"
            }}"#
        )
        .unwrap();

        let config = PipelineConfig::from_file(file.path()).unwrap();
        assert_eq!(config, PipelineConfig::new(Sources::standard("e.csv", "t.csv")).with_database("sqlite::memory:"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_date_cols_default_to_empty() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"sources": {"extra": {"filepath": "x.csv"}}}"#).unwrap();
        assert_eq!(config.sources.get("extra"), Some(&SourceSpec::new("x.csv", Vec::<String>::new())));
        assert!(config.database.is_none());
    }

    #[test]
    fn test_validate_requires_raw_sources() {
        let config = PipelineConfig::new(
            Sources::new().with(tables::EMPLOYEES_RAW, SourceSpec::new("e.csv", ["join_date"])),
        );
        let err = config.validate().unwrap_err();
        assert!(matches!(err, PipelineError::Config(ref msg) if msg.contains("timesheets_raw")));
    }

    #[test]
    fn test_malformed_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            PipelineConfig::from_file(file.path()),
            Err(PipelineError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_default_database_url() {
        let config = PipelineConfig::default();
        let url = config.database_url();
        assert!(url.starts_with("sqlite://"));
        assert!(url.ends_with("paysheet.db"));
    }
}
