use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::embeddings::DEFAULT_DIMENSION;

const MAX_DIMENSION: usize = 4096;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub index: IndexConfig,
    /// Override for the data directory; primarily for tests. When unset the
    /// per-user config directory is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexConfig {
    /// Number of components in every embedding vector. Changing this
    /// invalidates stored vectors; run a full reindex afterwards.
    pub dimension: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found or could not be created")]
    DirectoryError,
    #[error("Invalid vector dimension: {0} (must be between 1 and 4096)")]
    InvalidDimension(usize),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Default for Config {
    #[inline]
    fn default() -> Self {
        Self {
            index: IndexConfig {
                dimension: DEFAULT_DIMENSION,
            },
            base_dir: None,
        }
    }
}

impl Config {
    #[inline]
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(".docdex"))
            .or({
                #[cfg(windows)]
                {
                    dirs::data_dir().map(|data| data.join("docdex"))
                }
                #[cfg(not(windows))]
                {
                    None
                }
            })
            .ok_or(ConfigError::DirectoryError)
    }

    #[inline]
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Data directory for this configuration, honoring the base_dir override.
    #[inline]
    pub fn config_dir_path(&self) -> Result<PathBuf, ConfigError> {
        self.base_dir
            .as_ref()
            .map_or_else(Self::config_dir, |dir| Ok(dir.clone()))
    }

    #[inline]
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.config_dir_path()?.join("documents.db"))
    }

    #[inline]
    pub fn load() -> Result<Self> {
        let config_path =
            Self::config_file_path().context("Failed to determine config file path")?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        config
            .validate()
            .with_context(|| "Configuration validation failed")?;

        Ok(config)
    }

    #[inline]
    pub fn save(&self) -> Result<()> {
        self.validate()
            .context("Configuration validation failed before saving")?;

        let config_dir = Self::config_dir().context("Failed to determine config directory")?;

        fs::create_dir_all(&config_dir).with_context(|| {
            format!(
                "Failed to create config directory: {}",
                config_dir.display()
            )
        })?;

        let config_path = config_dir.join("config.toml");
        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.index.validate()
    }
}

impl IndexConfig {
    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dimension == 0 || self.dimension > MAX_DIMENSION {
            return Err(ConfigError::InvalidDimension(self.dimension));
        }

        Ok(())
    }

    #[inline]
    pub fn set_dimension(&mut self, dimension: usize) -> Result<(), ConfigError> {
        if dimension == 0 || dimension > MAX_DIMENSION {
            return Err(ConfigError::InvalidDimension(dimension));
        }
        self.dimension = dimension;
        Ok(())
    }
}
