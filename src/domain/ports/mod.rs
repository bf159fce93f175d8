//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod artifact_extractor;
pub mod blob_store;
pub mod registry_repository;

pub use artifact_extractor::{ArtifactExtractor, ExtractedArtifact, ExtractionError};
pub use blob_store::{BlobError, BlobResult, BlobStore};
pub use registry_repository::{RegistryError, RegistryRepository};
