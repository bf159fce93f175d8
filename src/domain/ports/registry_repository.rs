//! RegistryRepository port
//!
//! Persists the whole registry as a single durable document.

use std::path::PathBuf;

use crate::domain::entities::Registry;

pub trait RegistryRepository: Send + Sync {
    /// Load the registry. A missing document is an empty registry.
    fn load(&self) -> Result<Registry, RegistryError>;

    /// Replace the durable document with `registry`.
    ///
    /// On error the previously persisted document must still be loadable.
    fn save(&self, registry: &Registry) -> Result<(), RegistryError>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("failed to access metadata: {message}")]
    AccessError { message: String },

    #[error("failed to serialize metadata: {message}")]
    SerializationError { message: String },

    #[error(
        "metadata file corrupted: {path}\n  → Fix: restore it from a backup or remove it to start empty\n  → Details: {message}"
    )]
    Corrupted { path: PathBuf, message: String },
}
