//! Configuration type definitions

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ShelfResult;

use super::loader::{self, ConfigWarning, LoadedConfig};

/// Default listen address; port 1234 on all interfaces.
pub const DEFAULT_BIND: &str = "0.0.0.0:1234";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Largest accepted upload request body, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_max_upload_bytes() -> u64 {
    1024 * 1024 * 1024
}

/// Where metadata, artifacts and icons live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_metadata_path")]
    pub metadata_path: PathBuf,

    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,

    #[serde(default = "default_icons_dir")]
    pub icons_dir: PathBuf,

    /// Unset means `<uploads_dir>/.staging`, which keeps commits a rename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn staging_dir(&self) -> PathBuf {
        self.staging_dir
            .clone()
            .unwrap_or_else(|| self.uploads_dir.join(".staging"))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            metadata_path: default_metadata_path(),
            uploads_dir: default_uploads_dir(),
            icons_dir: default_icons_dir(),
            staging_dir: None,
        }
    }
}

fn default_metadata_path() -> PathBuf {
    PathBuf::from("metadata.json")
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_icons_dir() -> PathBuf {
    PathBuf::from("static/icons")
}

/// Deletion secret configuration
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Empty disables deletion over HTTP.
    #[serde(default)]
    pub delete_secret: String,
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("delete_secret", &redacted(&self.delete_secret))
            .finish()
    }
}

impl SecurityConfig {
    /// Copy that is safe to print.
    pub fn redacted(&self) -> Self {
        Self {
            delete_secret: redacted(&self.delete_secret).to_string(),
        }
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "pretty" => Some(LogFormat::Text),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub security: SecurityConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ShelfResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ShelfResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from the explicit path, the working directory, the user config
    /// dir, or defaults, then apply environment overrides.
    pub fn resolve(explicit: Option<&Path>) -> ShelfResult<LoadedConfig> {
        loader::resolve(explicit)
    }

    /// Apply environment variable overrides (APKSHELF_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Copy that is safe to print.
    pub fn redacted(&self) -> Self {
        Self {
            security: self.security.redacted(),
            ..self.clone()
        }
    }
}
