//! Domain Entities
//!
//! - `Registry` - the project → app → build tree
//! - `Project`, `AppEntry`, `BuildInfo` - its nodes

mod registry;

pub use registry::{
    AppEntry, AppInfo, AppRemoval, BuildInfo, BuildRemoval, NotFound, Project, Registry,
    DOWNLOADS_PREFIX,
};
