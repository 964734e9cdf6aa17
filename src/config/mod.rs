//! Configuration management for the documentation cache generator

pub mod schema;

pub use schema::{Config, NormalizeRuleConfig, ScannerConfig};

use crate::error::{DocCacheError, DocCacheResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Configuration manager
pub struct ConfigManager {
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create a config manager that only uses built-in defaults
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Create a config manager reading from a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: Some(path),
        }
    }

    /// Load configuration, falling back to defaults when no file exists
    pub async fn load(&self) -> DocCacheResult<Config> {
        match &self.config_path {
            Some(path) if path.exists() => self.load_from_file(path).await,
            Some(path) => {
                debug!("Config file {} not found, using defaults", path.display());
                Ok(Config::default())
            }
            None => Ok(Config::default()),
        }
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> DocCacheResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| DocCacheError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| DocCacheError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Get the config file path, if one was given
    pub fn path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
