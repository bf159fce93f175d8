//! Upload Use Case
//!
//! stage → extract → validate → name → commit → record.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Local, Timelike};

use crate::application::store::RegistryStore;
use crate::domain::entities::{AppInfo, BuildInfo};
use crate::domain::ports::{ArtifactExtractor, BlobStore, ExtractedArtifact};
use crate::domain::value_objects::ArtifactName;

use super::options::UploadRequest;
use super::result::{UploadError, UploadResult};

/// Upload use case - records uploaded packages as new builds
pub struct UploadUseCase {
    store: Arc<RegistryStore>,
    blobs: Arc<dyn BlobStore>,
    extractor: Arc<dyn ArtifactExtractor>,
    /// Held from naming to commit so two uploads can never pick the same
    /// file name.
    ingest_lock: Mutex<()>,
}

/// Staged upload that is discarded when dropped, unless already committed.
struct Staged<'a> {
    blobs: &'a dyn BlobStore,
    path: Option<PathBuf>,
}

impl Staged<'_> {
    fn path(&self) -> &Path {
        self.path.as_deref().unwrap_or(Path::new(""))
    }

    /// The staged file has been moved away; nothing left to discard.
    fn consumed(mut self) {
        self.path = None;
    }
}

impl Drop for Staged<'_> {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            if let Err(e) = self.blobs.discard(&path) {
                tracing::warn!(path = %path.display(), error = %e, "failed to discard staged upload");
            }
        }
    }
}

impl UploadUseCase {
    pub fn new(
        store: Arc<RegistryStore>,
        blobs: Arc<dyn BlobStore>,
        extractor: Arc<dyn ArtifactExtractor>,
    ) -> Self {
        Self {
            store,
            blobs,
            extractor,
            ingest_lock: Mutex::new(()),
        }
    }

    /// Ingest one uploaded package.
    pub fn execute(
        &self,
        request: &UploadRequest,
        content: &[u8],
    ) -> Result<UploadResult, UploadError> {
        let project_name = required(&request.project_name, "projectName")?;
        let channel = required(&request.channel, "channel")?;
        if content.is_empty() {
            return Err(UploadError::EmptyFile);
        }

        let staged = Staged {
            blobs: self.blobs.as_ref(),
            path: Some(self.blobs.stage(content)?),
        };

        let extracted = self.extractor.extract(staged.path())?;
        validate(&extracted)?;

        let _guard = self.ingest_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let now = Local::now();
        let file_name = ArtifactName::unique(
            &extracted.package_name,
            &extracted.version,
            channel,
            now.timestamp_millis(),
            |candidate| self.store.contains_file(candidate),
        )
        .into_string();

        let file_size = self.blobs.commit_artifact(staged.path(), &file_name)?;
        staged.consumed();

        let icon_path = extracted
            .icon_png
            .as_deref()
            .and_then(|png| match self.blobs.save_icon(&extracted.package_name, png) {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::warn!(package = %extracted.package_name, error = %e, "failed to save app icon");
                    None
                }
            });

        let build = BuildInfo {
            version: extracted.version.clone(),
            channel: channel.to_string(),
            release_notes: request.release_notes.clone(),
            file_name: file_name.clone(),
            file_size,
            upload_time: now.naive_local().with_nanosecond(0).unwrap_or(now.naive_local()),
        };
        let app = AppInfo {
            app_name: extracted.app_name.clone(),
            package_name: extracted.package_name.clone(),
            icon_path: icon_path.clone(),
        };

        if let Err(e) = self.store.upsert_build(project_name, app, build.clone()) {
            if let Err(cleanup) = self.blobs.remove_artifact(&file_name) {
                tracing::warn!(file = %file_name, error = %cleanup, "failed to remove orphaned artifact");
            }
            return Err(e.into());
        }

        tracing::info!(
            project = %project_name,
            package = %extracted.package_name,
            version = %extracted.version,
            file = %file_name,
            size = file_size,
            "build uploaded"
        );

        Ok(UploadResult {
            project_name: project_name.to_string(),
            app_name: extracted.app_name,
            package_name: extracted.package_name,
            icon_path,
            build,
            source: request.source,
        })
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, UploadError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(UploadError::MissingField { field });
    }
    Ok(value)
}

fn validate(extracted: &ExtractedArtifact) -> Result<(), UploadError> {
    for (value, field) in [
        (&extracted.app_name, "app name"),
        (&extracted.package_name, "package name"),
        (&extracted.version, "version"),
    ] {
        if value.trim().is_empty() {
            return Err(UploadError::InvalidMetadata { field });
        }
    }
    Ok(())
}
