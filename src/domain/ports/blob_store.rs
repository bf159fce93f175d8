//! BlobStore port - storage for artifact files and icons
//!
//! The registry only records names, paths and sizes; the bytes live behind
//! this trait. Artifacts are addressed by file name, icons by the path the
//! store handed out when saving them.

use std::path::{Path, PathBuf};

pub type BlobResult<T> = Result<T, BlobError>;

#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("blob not found: {0}")]
    NotFound(PathBuf),

    #[error("invalid blob name: {0}")]
    InvalidName(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BlobError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            BlobError::NotFound(path)
        } else {
            BlobError::Io { path, source }
        }
    }
}

pub trait BlobStore: Send + Sync {
    /// Write raw upload bytes to a staging location and return its path.
    fn stage(&self, content: &[u8]) -> BlobResult<PathBuf>;

    /// Remove a staged file.
    fn discard(&self, staged: &Path) -> BlobResult<()>;

    /// Move a staged file to its final artifact name. Returns the size in bytes.
    fn commit_artifact(&self, staged: &Path, file_name: &str) -> BlobResult<u64>;

    fn remove_artifact(&self, file_name: &str) -> BlobResult<()>;

    /// Store an app icon keyed by package name, replacing any previous one.
    /// Returns the icon path to record on the app.
    fn save_icon(&self, package_name: &str, png: &[u8]) -> BlobResult<String>;

    fn remove_icon(&self, icon_path: &str) -> BlobResult<()>;
}
