//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod artifact_name;
mod secret;

pub use artifact_name::ArtifactName;
pub use secret::DeleteSecret;
