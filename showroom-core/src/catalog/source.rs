use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use super::Catalog;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid catalog data: {0}")]
    Invalid(String),
}

/// Backend-agnostic catalog source configuration.
///
/// `backend` must match the [`CatalogSourceFactory::backend_name`] of a
/// registered factory. `location` is passed through to that factory
/// unchanged; its meaning is backend-specific.
///
/// | backend    | location examples              |
/// |------------|--------------------------------|
/// | `builtin`  | ignored                        |
/// | `csv`      | `catalog.csv`, `/srv/cars.csv` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"csv"`).
    pub backend: String,
    pub location: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            backend: "builtin".to_string(),
            location: String::new(),
        }
    }
}

/// Read-only origin of the vehicle catalog. Loaded once per session.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<Catalog, CatalogError>;
}

/// One implementation per source backend, registered with a
/// [`CatalogRegistry`] at startup.
#[async_trait]
pub trait CatalogSourceFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Build a source for `config`. Implementations may validate the
    /// location here so that misconfiguration surfaces before loading.
    async fn create(
        &self,
        config: &SourceConfig,
    ) -> Result<Box<dyn CatalogSource>, CatalogError>;
}

/// Registry of [`CatalogSourceFactory`] instances, keyed by backend name.
pub struct CatalogRegistry {
    factories: HashMap<&'static str, Box<dyn CatalogSourceFactory>>,
}

impl CatalogRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory, replacing any factory with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn CatalogSourceFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend`.
    ///
    /// # Errors
    /// * [`CatalogError::Configuration`] when no factory is registered for
    ///   the requested backend name.
    /// * Any error the chosen factory itself returns.
    pub async fn create(
        &self,
        config: &SourceConfig,
    ) -> Result<Box<dyn CatalogSource>, CatalogError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                CatalogError::Configuration(format!(
                    "unknown catalog backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for CatalogRegistry {
    fn default() -> Self {
        Self::new()
    }
}
