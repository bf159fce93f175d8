//! Common test utilities for apkshelf scenario and HTTP tests.
//!
//! This module provides:
//! - `TestShelf`: an isolated shelf (metadata, uploads, icons) in a temp dir
//! - `FakeApkExtractor`: reads package metadata from a plain-text "APK"
//! - `fake_apk`: builds such a package

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use apkshelf::config::{Config, StorageConfig};
use apkshelf::domain::ports::{ArtifactExtractor, ExtractedArtifact, ExtractionError};
use apkshelf::infrastructure::{JsonRegistryRepository, LocalBlobStore};
use apkshelf::presentation::Shelf;
use tempfile::TempDir;

pub const SECRET: &str = "correct horse";

/// Text package: `name|package|version[|icon]`. Anything else fails to parse.
pub fn fake_apk(app_name: &str, package: &str, version: &str, icon: bool) -> Vec<u8> {
    let mut text = format!("{}|{}|{}", app_name, package, version);
    if icon {
        text.push_str("|icon");
    }
    text.into_bytes()
}

pub struct FakeApkExtractor;

impl ArtifactExtractor for FakeApkExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedArtifact, ExtractionError> {
        let text = fs::read_to_string(path).map_err(|_| ExtractionError::Archive {
            message: "not a package".to_string(),
        })?;
        let parts: Vec<&str> = text.split('|').collect();
        if parts.len() < 3 {
            return Err(ExtractionError::Archive {
                message: "not a package".to_string(),
            });
        }
        Ok(ExtractedArtifact {
            app_name: parts[0].to_string(),
            package_name: parts[1].to_string(),
            version: parts[2].to_string(),
            icon_png: (parts.get(3) == Some(&"icon")).then(|| b"\x89PNG\r\n\x1a\nicon".to_vec()),
        })
    }
}

/// Isolated shelf rooted in a temp dir.
pub struct TestShelf {
    pub root: TempDir,
    pub config: Config,
}

impl TestShelf {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.storage = StorageConfig {
            metadata_path: root.path().join("metadata.json"),
            uploads_dir: root.path().join("uploads"),
            icons_dir: root.path().join("static/icons"),
            staging_dir: Some(root.path().join("staging")),
        };
        config.security.delete_secret = SECRET.to_string();
        Self { root, config }
    }

    /// Open (or reopen) the shelf from disk, as a process restart would.
    pub fn open(&self) -> Shelf {
        Shelf::with_parts(
            Arc::new(JsonRegistryRepository::new(&self.config.storage.metadata_path)),
            LocalBlobStore::from_config(&self.config.storage),
            Arc::new(FakeApkExtractor),
        )
        .unwrap()
    }

    pub fn metadata_path(&self) -> &Path {
        &self.config.storage.metadata_path
    }

    pub fn backup_path(&self) -> PathBuf {
        JsonRegistryRepository::new(self.metadata_path()).backup_path()
    }

    pub fn upload_path(&self, file_name: &str) -> PathBuf {
        self.config.storage.uploads_dir.join(file_name)
    }

    pub fn icon_path(&self, package: &str) -> PathBuf {
        self.config.storage.icons_dir.join(format!("{}.png", package))
    }

    pub fn staged_files(&self) -> usize {
        fs::read_dir(self.config.storage.staging_dir())
            .map(|d| d.count())
            .unwrap_or(0)
    }
}
