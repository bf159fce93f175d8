//! apkshelf - self-hosted catalog and download server for Android builds
//!
//! Uploaded APKs are grouped as project → app → build. Package metadata is
//! read from the APK on upload, the registry is kept in one JSON file that
//! is saved with a backup so an interrupted write never loses the previous
//! state, and builds are served for download over HTTP.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;
pub mod server;

// Re-exports for convenience
pub use application::{DeleteUseCase, RegistryStore, UploadUseCase};
pub use config::Config;
pub use error::{ErrorKind, ShelfError, ShelfResult};
pub use presentation::Shelf;
