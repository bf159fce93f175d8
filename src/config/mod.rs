//! Configuration module for apkshelf
//!
//! Configuration hierarchy:
//! 1. `--config <file>` (must exist)
//! 2. `./apkshelf.toml`
//! 3. User config (`<config dir>/apkshelf/config.toml`)
//! 4. Built-in defaults
//!
//! Environment variables (`APKSHELF_*`) are applied on top of whichever
//! of these was used.

mod loader;
mod types;

pub use loader::{candidate_paths, ConfigWarning, LoadedConfig, LOCAL_CONFIG_FILE};
pub use types::{
    Config, LogFormat, LoggingConfig, SecurityConfig, ServerConfig, StorageConfig, DEFAULT_BIND,
};
