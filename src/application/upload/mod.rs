//! Upload Use Case
//!
//! Turns an uploaded package into a new build in the registry.
//!
//! This module handles:
//! - Validating the request fields
//! - Staging the raw bytes and extracting package metadata
//! - Naming, committing and recording the artifact (and its icon)
//! - Compensating for a failed registry write

mod options;
mod result;
mod use_case;


pub use options::{UploadRequest, UploadSource};
pub use result::{UploadError, UploadResult};
pub use use_case::UploadUseCase;
