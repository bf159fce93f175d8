//! Shared handler state

use std::sync::Arc;

use crate::application::{DeleteUseCase, RegistryStore, UploadUseCase};
use crate::config::Config;
use crate::infrastructure::LocalBlobStore;
use crate::presentation::Shelf;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RegistryStore>,
    pub blobs: Arc<LocalBlobStore>,
    pub upload: Arc<UploadUseCase>,
    pub delete: Arc<DeleteUseCase>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(shelf: &Shelf, config: &Config) -> Self {
        Self {
            store: Arc::clone(&shelf.store),
            blobs: Arc::clone(&shelf.blobs),
            upload: Arc::new(shelf.upload_use_case()),
            delete: Arc::new(shelf.remote_delete_use_case(config)),
            max_upload_bytes: usize::try_from(config.server.max_upload_bytes)
                .unwrap_or(usize::MAX),
        }
    }
}
