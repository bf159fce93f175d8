//! ArtifactExtractor port
//!
//! Reads app identity out of an uploaded package file.

use std::path::Path;

/// Metadata read from a package. Fields may be empty; callers validate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedArtifact {
    pub app_name: String,
    pub package_name: String,
    pub version: String,
    /// PNG bytes of the launcher icon, when one could be found.
    pub icon_png: Option<Vec<u8>>,
}

pub trait ArtifactExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<ExtractedArtifact, ExtractionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("failed to open package: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a valid package archive: {message}")]
    Archive { message: String },

    #[error("package has no {entry}")]
    MissingEntry { entry: &'static str },

    #[error("malformed manifest: {message}")]
    Manifest { message: String },
}
