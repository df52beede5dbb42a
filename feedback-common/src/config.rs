//! Configuration loading
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Tiers 1 and 2 arrive together as [`ConfigOverrides`] (the binary's
//! argument parser merges them); this module layers them over the TOML file
//! and the defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::store::StorageBackend;
use crate::{Error, Result};

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_CSV_PATH: &str = "/data/feedback.csv";
pub const DEFAULT_DB_PATH: &str = "/data/feedback.db";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// TOML configuration file contents
///
/// Every key is optional; absent keys fall through to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerSection,
    pub storage: StorageSection,
    pub ai: AiSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// "csv" or "sqlite"
    pub backend: Option<String>,
    pub csv_path: Option<PathBuf>,
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AiSection {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level or tracing filter directive (e.g. "debug")
    pub level: Option<String>,
}

/// Load and parse a TOML config file
///
/// The file was named explicitly, so a missing or malformed file is an error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
    })?;
    parse_toml_config(&content)
        .map_err(|e| Error::Config(format!("{} ({})", e, path.display())))
}

pub fn parse_toml_config(content: &str) -> Result<TomlConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML config: {}", e)))
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind: Option<String>,
    pub storage: Option<StorageBackend>,
    pub csv_path: Option<PathBuf>,
    pub db_path: Option<PathBuf>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

/// Storage location settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub csv_path: PathBuf,
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Csv,
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

/// Text-generation provider settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiConfig {
    /// `None` puts the generator in fallback mode
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: String,
    pub storage: StorageConfig,
    pub ai: AiConfig,
    pub log_level: String,
}

impl AppConfig {
    /// Layer overrides over the TOML file over compiled defaults
    pub fn resolve(overrides: ConfigOverrides, toml: TomlConfig) -> Result<Self> {
        let backend = match (overrides.storage, toml.storage.backend.as_deref()) {
            (Some(backend), _) => backend,
            (None, Some(raw)) => raw.parse()?,
            (None, None) => StorageBackend::default(),
        };

        let api_key = overrides
            .api_key
            .or(toml.ai.api_key)
            .filter(|key| is_valid_key(key));

        Ok(Self {
            bind: overrides
                .bind
                .or(toml.server.bind)
                .unwrap_or_else(|| DEFAULT_BIND.to_string()),
            storage: StorageConfig {
                backend,
                csv_path: overrides
                    .csv_path
                    .or(toml.storage.csv_path)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_PATH)),
                db_path: overrides
                    .db_path
                    .or(toml.storage.db_path)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            },
            ai: AiConfig {
                api_key,
                model: overrides
                    .model
                    .or(toml.ai.model)
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: overrides
                    .base_url
                    .or(toml.ai.base_url)
                    .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
                timeout: Duration::from_secs(
                    toml.ai.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
                ),
            },
            log_level: toml
                .logging
                .level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }

    /// Path of the active storage medium
    pub fn storage_path(&self) -> &Path {
        match self.storage.backend {
            StorageBackend::Csv => &self.storage.csv_path,
            StorageBackend::Sqlite => &self.storage.db_path,
        }
    }
}

/// API keys must be non-empty after trimming
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
