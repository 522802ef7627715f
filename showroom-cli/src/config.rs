//! `showroom.toml` loading.
//!
//! Every section and key is optional; a missing file yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use showroom_core::calculations::{FinancingError, FinancingTerms};
use showroom_core::catalog::SourceConfig;
use thiserror::Error;
use tracing::debug;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "showroom.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid [financing] section: {0}")]
    Financing(#[from] FinancingError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShowroomConfig {
    pub catalog: CatalogSection,
    pub financing: FinancingTerms,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    pub backend: String,
    pub location: String,
}

impl Default for CatalogSection {
    fn default() -> Self {
        let source = SourceConfig::default();
        Self {
            backend: source.backend,
            location: source.location,
        }
    }
}

impl CatalogSection {
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            backend: self.backend.to_lowercase(),
            location: self.location.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins when set.
    pub level: String,
    /// Appends log records to this file in addition to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl ShowroomConfig {
    pub fn from_toml_str(
        input: &str,
        origin: &Path,
    ) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.financing.validate()?;
        Ok(config)
    }

    /// Reads `path`, or [`DEFAULT_CONFIG_FILE`] when `path` is `None`.
    ///
    /// An explicit path must exist. The default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&contents, &path)
    }
}
