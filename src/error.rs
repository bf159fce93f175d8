//! Error types for apkshelf
//!
//! Each port and use case has its own `thiserror` enum; `ShelfError` gathers
//! them for callers that drive several layers (the CLI and the HTTP surface).

use std::path::PathBuf;
use thiserror::Error;

use crate::application::{DeleteError, UploadError};
use crate::domain::ports::RegistryError;

/// Result type alias for apkshelf operations
pub type ShelfResult<T> = Result<T, ShelfError>;

/// How an error should be reported to whoever caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad request: missing fields, unreadable package, empty metadata.
    Input,
    NotFound,
    Unauthorized,
    /// Storage or persistence failure on our side.
    Internal,
}

/// Main error type for apkshelf operations
#[derive(Error, Debug)]
pub enum ShelfError {
    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Delete(#[from] DeleteError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Lookup of an app that is not in the registry
    #[error("app not found: {package_name}")]
    AppNotFound { package_name: String },

    /// Invalid configuration file
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShelfError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShelfError::Upload(e) if e.is_client_error() => ErrorKind::Input,
            ShelfError::Delete(DeleteError::Unauthorized) => ErrorKind::Unauthorized,
            ShelfError::Delete(DeleteError::AppNotFound { .. })
            | ShelfError::Delete(DeleteError::BuildNotFound { .. })
            | ShelfError::AppNotFound { .. } => ErrorKind::NotFound,
            ShelfError::Config { .. } => ErrorKind::Input,
            _ => ErrorKind::Internal,
        }
    }
}
