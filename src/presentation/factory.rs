//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application; the CLI and
//! the HTTP server both build their use cases from one `Shelf`.

use std::sync::Arc;

use crate::application::{DeleteAuth, DeleteUseCase, RegistryStore, UploadUseCase};
use crate::config::Config;
use crate::domain::ports::{ArtifactExtractor, BlobStore, RegistryRepository};
use crate::domain::value_objects::DeleteSecret;
use crate::error::ShelfResult;
use crate::infrastructure::{ApkExtractor, JsonRegistryRepository, LocalBlobStore};

/// Opened registry plus the adapters every use case shares
#[derive(Clone)]
pub struct Shelf {
    pub store: Arc<RegistryStore>,
    pub blobs: Arc<LocalBlobStore>,
    pub extractor: Arc<dyn ArtifactExtractor>,
}

impl Shelf {
    /// Load the registry from disk (recovering an interrupted save) and wire
    /// the local blob store and APK extractor.
    pub fn open(config: &Config) -> ShelfResult<Self> {
        let repository: Arc<dyn RegistryRepository> =
            Arc::new(JsonRegistryRepository::new(&config.storage.metadata_path));
        Self::with_parts(
            repository,
            LocalBlobStore::from_config(&config.storage),
            Arc::new(ApkExtractor::new()),
        )
    }

    pub fn with_parts(
        repository: Arc<dyn RegistryRepository>,
        blobs: LocalBlobStore,
        extractor: Arc<dyn ArtifactExtractor>,
    ) -> ShelfResult<Self> {
        Ok(Self {
            store: Arc::new(RegistryStore::open(repository)?),
            blobs: Arc::new(blobs),
            extractor,
        })
    }

    fn blob_store(&self) -> Arc<dyn BlobStore> {
        self.blobs.clone()
    }

    pub fn upload_use_case(&self) -> UploadUseCase {
        UploadUseCase::new(
            Arc::clone(&self.store),
            self.blob_store(),
            Arc::clone(&self.extractor),
        )
    }

    pub fn delete_use_case(&self, auth: DeleteAuth) -> DeleteUseCase {
        DeleteUseCase::new(Arc::clone(&self.store), self.blob_store(), auth)
    }

    /// Deletions over HTTP are checked against the configured secret.
    pub fn remote_delete_use_case(&self, config: &Config) -> DeleteUseCase {
        let secret = DeleteSecret::new(&config.security.delete_secret);
        if !secret.is_enabled() {
            tracing::warn!("no delete secret configured, deletion over HTTP is disabled");
        }
        self.delete_use_case(DeleteAuth::SharedSecret(secret))
    }
}
