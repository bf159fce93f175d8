//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ShelfError, ShelfResult};

use super::types::{Config, LogFormat};

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "apkshelf.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Effective configuration and where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// File that was read; `None` when running on defaults.
    pub source: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ShelfResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| ShelfError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ShelfError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Candidate config files, most specific first.
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("apkshelf").join("config.toml"));
    }
    paths
}

/// An explicit path must exist; the implicit candidates are optional.
pub fn resolve(explicit: Option<&Path>) -> ShelfResult<LoadedConfig> {
    let source = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => candidate_paths().into_iter().find(|p| p.is_file()),
    };

    let (config, warnings) = match &source {
        Some(path) => load_with_warnings(path)?,
        None => (Config::default(), Vec::new()),
    };

    Ok(LoadedConfig {
        config: with_env_overrides(config),
        source,
        warnings,
    })
}

/// Apply environment variable overrides (APKSHELF_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_overrides_from(config, |name| std::env::var(name).ok())
}

fn with_overrides_from(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(bind) = var("APKSHELF_BIND") {
        config.server.bind = bind;
    }

    if let Some(value) = var("APKSHELF_MAX_UPLOAD_BYTES") {
        match value.trim().parse::<u64>() {
            Ok(bytes) => config.server.max_upload_bytes = bytes,
            Err(_) => eprintln!(
                "Warning: Invalid APKSHELF_MAX_UPLOAD_BYTES value '{}', keeping {}",
                value, config.server.max_upload_bytes
            ),
        }
    }

    if let Some(path) = var("APKSHELF_METADATA_PATH") {
        config.storage.metadata_path = PathBuf::from(path);
    }
    if let Some(path) = var("APKSHELF_UPLOADS_DIR") {
        config.storage.uploads_dir = PathBuf::from(path);
    }
    if let Some(path) = var("APKSHELF_ICONS_DIR") {
        config.storage.icons_dir = PathBuf::from(path);
    }

    if let Some(secret) = var("APKSHELF_DELETE_SECRET") {
        config.security.delete_secret = secret;
    }

    if let Some(value) = var("APKSHELF_LOG_FORMAT") {
        match LogFormat::parse(&value) {
            Some(format) => config.logging.format = format,
            None => eprintln!(
                "Warning: Invalid APKSHELF_LOG_FORMAT value '{}'\nValid values: text, json",
                value
            ),
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "server",
        "bind",
        "max_upload_bytes",
        "storage",
        "metadata_path",
        "uploads_dir",
        "icons_dir",
        "staging_dir",
        "security",
        "delete_secret",
        "logging",
        "format",
    ];

    CANDIDATES
        .iter()
        .map(|candidate| (candidate, levenshtein(unknown, candidate)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(candidate, _)| candidate.to_string())
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

#[cfg(test)]
pub(super) fn overrides_for_test(config: Config, vars: &[(&str, &str)]) -> Config {
    with_overrides_from(config, |name| {
        vars.iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.to_string())
    })
}
