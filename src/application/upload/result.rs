//! Upload result types

use crate::domain::entities::BuildInfo;
use crate::domain::ports::{BlobError, ExtractionError, RegistryError};

use super::options::UploadSource;

/// A build that was recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub project_name: String,
    pub app_name: String,
    pub package_name: String,
    pub icon_path: Option<String>,
    pub build: BuildInfo,
    pub source: UploadSource,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("uploaded file is empty")]
    EmptyFile,

    #[error("failed to parse package: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("package metadata has no {field}")]
    InvalidMetadata { field: &'static str },

    #[error("failed to store upload: {0}")]
    Storage(#[from] BlobError),

    #[error(transparent)]
    Persistence(#[from] RegistryError),
}

impl UploadError {
    /// Caused by the request rather than by the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            UploadError::MissingField { .. }
                | UploadError::EmptyFile
                | UploadError::Extraction(_)
                | UploadError::InvalidMetadata { .. }
        )
    }
}
