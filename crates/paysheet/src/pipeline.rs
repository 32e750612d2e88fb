//! End-to-end pipeline.
//!
//! The stages run strictly in order: extract, schema setup, transform,
//! load. Each stage takes a [`TableSet`] and hands a new one to the next.

use crate::config::PipelineConfig;
use crate::error::Result;
use paysheet_data::TableSet;
use paysheet_store::Store;
use tracing::info;

/// A configured pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline from a configuration.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        info!(sources = config.sources.len(), "Init Data Pipeline.");
        Ok(Self { config })
    }

    /// The configuration in use.
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Read every configured source.
    pub fn extract(&self) -> Result<TableSet> {
        Ok(paysheet_data::extract(&self.config.sources)?)
    }

    /// Derive the monthly hours and branch payroll tables.
    pub fn transform(&self, tables: TableSet) -> Result<TableSet> {
        Ok(paysheet_transform::transform(tables)?)
    }

    /// Open the configured database, creating its directory if needed.
    pub fn open_store(&self) -> Result<Store> {
        let url = self.config.database_url();
        info!(database = %url, "Establish database and tables.");
        Ok(Store::connect(&url)?)
    }

    /// Create the declared tables.
    pub fn build_schema(&self, store: &Store) -> Result<()> {
        Ok(store.build_schema()?)
    }

    /// Write the raw and derived tables.
    pub fn load(&self, tables: &TableSet, store: &Store) -> Result<()> {
        Ok(paysheet_store::load(tables, store)?)
    }

    /// Run every stage against the configured database.
    pub fn run(&self) -> Result<TableSet> {
        let store = self.open_store()?;
        self.run_with(&store)
    }

    /// Run every stage against an already opened store.
    pub fn run_with(&self, store: &Store) -> Result<TableSet> {
        let raw = self.extract()?;
        self.build_schema(store)?;
        let derived = self.transform(raw)?;
        self.load(&derived, store)?;
        Ok(derived)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use paysheet_data::{DataError, Sources};

    #[test]
    fn test_new_rejects_incomplete_config() {
        let err = Pipeline::new(PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_unreadable_source_stops_before_writing() {
        let config = PipelineConfig::new(Sources::standard(
            "/nonexistent/employees.csv",
            "/nonexistent/timesheets.csv",
        ));
        let pipeline = Pipeline::new(config).unwrap();
        let store = Store::in_memory().unwrap();

        let err = pipeline.run_with(&store).unwrap_err();
        assert!(matches!(err, PipelineError::Extract(DataError::Io { .. })));
        assert!(store.table_names().unwrap().is_empty());
    }

    #[test]
    fn test_open_store_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("pay.db");
        let config = PipelineConfig::new(Sources::standard("e.csv", "t.csv"))
            .with_database(format!("sqlite://{}", db.display()));

        let pipeline = Pipeline::new(config).unwrap();
        let store = pipeline.open_store().unwrap();
        pipeline.build_schema(&store).unwrap();

        assert!(db.exists());
    }
}
