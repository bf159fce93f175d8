//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, value objects, ports)
//! - Does NOT contain tree rules (those are on the `Registry` entity)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `UploadUseCase` - stage, extract, name, commit and record a new build
//! - `DeleteUseCase` - remove a build or an app, then clean up its files
//!
//! ## Services
//!
//! - `RegistryStore` - the locked, persisted registry shared by every use case

pub mod delete;
pub mod store;
pub mod upload;

pub use delete::{DeleteAppResult, DeleteAuth, DeleteBuildResult, DeleteError, DeleteUseCase};
pub use store::{RegistryStore, StoreError};
pub use upload::{UploadError, UploadRequest, UploadResult, UploadSource, UploadUseCase};
