//! Domain Layer
//!
//! Pure registry logic without I/O.
//!
//! ## Structure
//!
//! - `entities/` - The registry tree (Project, AppEntry, BuildInfo)
//! - `value_objects/` - Immutable value types (ArtifactName, DeleteSecret)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod value_objects;
