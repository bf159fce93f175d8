//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `repositories/` - Registry persistence (JSON with backup protocol)
//! - `blob/` - Artifact and icon storage on local disk
//! - `extractor/` - APK metadata extraction

pub mod blob;
pub mod extractor;
pub mod repositories;

pub use blob::LocalBlobStore;
pub use extractor::ApkExtractor;
pub use repositories::JsonRegistryRepository;
