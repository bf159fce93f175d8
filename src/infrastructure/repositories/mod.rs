//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod registry;

pub use registry::{JsonRegistryRepository, UPLOAD_TIME_FORMAT};
