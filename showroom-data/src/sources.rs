//! Catalog-source backends: the embedded table and CSV files on disk.

use std::path::PathBuf;

use async_trait::async_trait;
use showroom_core::catalog::{Catalog, CatalogError, CatalogRegistry, CatalogSource, CatalogSourceFactory, SourceConfig};
use tracing::{debug, info};

use crate::builtin;
use crate::loader::{CatalogLoadError, CatalogLoader};

impl From<CatalogLoadError> for CatalogError {
    fn from(err: CatalogLoadError) -> Self {
        match err {
            CatalogLoadError::Io { .. } => CatalogError::Unavailable(err.to_string()),
            other => CatalogError::Invalid(other.to_string()),
        }
    }
}

/// Registry with every backend this crate provides.
pub fn default_registry() -> CatalogRegistry {
    let mut registry = CatalogRegistry::new();
    registry.register(Box::new(BuiltinCatalogFactory));
    registry.register(Box::new(CsvCatalogFactory));
    registry
}

// ---------------------------------------------------------------------------
// builtin
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalogSource;

#[async_trait]
impl CatalogSource for BuiltinCatalogSource {
    async fn load(&self) -> Result<Catalog, CatalogError> {
        let catalog = builtin::catalog()?;
        info!(entries = catalog.len(), "loaded built-in catalog");
        Ok(catalog)
    }
}

pub struct BuiltinCatalogFactory;

#[async_trait]
impl CatalogSourceFactory for BuiltinCatalogFactory {
    fn backend_name(&self) -> &'static str {
        "builtin"
    }

    async fn create(
        &self,
        _config: &SourceConfig,
    ) -> Result<Box<dyn CatalogSource>, CatalogError> {
        Ok(Box::new(BuiltinCatalogSource))
    }
}

// ---------------------------------------------------------------------------
// csv
// ---------------------------------------------------------------------------

/// Reads the catalog from a CSV file each time [`CatalogSource::load`] runs.
#[derive(Debug, Clone)]
pub struct CsvCatalogSource {
    path: PathBuf,
}

impl CsvCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for CsvCatalogSource {
    async fn load(&self) -> Result<Catalog, CatalogError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| {
                CatalogError::Unavailable(format!("{}: {err}", self.path.display()))
            })?;

        let catalog = CatalogLoader::load_from_str(&contents)?;
        info!(
            entries = catalog.len(),
            path = %self.path.display(),
            "loaded catalog from CSV"
        );
        Ok(catalog)
    }
}

pub struct CsvCatalogFactory;

#[async_trait]
impl CatalogSourceFactory for CsvCatalogFactory {
    fn backend_name(&self) -> &'static str {
        "csv"
    }

    async fn create(
        &self,
        config: &SourceConfig,
    ) -> Result<Box<dyn CatalogSource>, CatalogError> {
        let location = config.location.trim();
        if location.is_empty() {
            return Err(CatalogError::Configuration(
                "the csv backend needs a file location".to_string(),
            ));
        }

        debug!(location, "creating CSV catalog source");
        Ok(Box::new(CsvCatalogSource::new(location)))
    }
}
