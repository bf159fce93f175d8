//! Delete result types

use crate::application::store::StoreError;
use crate::domain::entities::{BuildInfo, NotFound};
use crate::domain::ports::RegistryError;
use crate::domain::value_objects::DeleteSecret;

/// How callers prove they may delete
#[derive(Debug, Clone)]
pub enum DeleteAuth {
    /// Callers must present the configured secret.
    SharedSecret(DeleteSecret),
    /// Local operator; no secret required.
    Trusted,
}

impl DeleteAuth {
    pub fn allows(&self, presented: Option<&str>) -> bool {
        match self {
            DeleteAuth::Trusted => true,
            DeleteAuth::SharedSecret(secret) => presented.is_some_and(|p| secret.verify(p)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteBuildResult {
    pub package_name: String,
    pub build: BuildInfo,
    pub app_removed: bool,
    pub project_removed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAppResult {
    pub app_name: String,
    pub package_name: String,
    pub removed_builds: Vec<BuildInfo>,
    pub project_removed: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DeleteError {
    #[error("invalid delete secret")]
    Unauthorized,

    #[error("app not found: {package_name}")]
    AppNotFound { package_name: String },

    #[error("build not found: {file_name}")]
    BuildNotFound {
        package_name: String,
        file_name: String,
    },

    #[error(transparent)]
    Persistence(#[from] RegistryError),
}

impl From<StoreError> for DeleteError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(NotFound::App { package_name }) => {
                DeleteError::AppNotFound { package_name }
            }
            StoreError::NotFound(NotFound::Build {
                package_name,
                file_name,
            }) => DeleteError::BuildNotFound {
                package_name,
                file_name,
            },
            StoreError::Persistence(e) => DeleteError::Persistence(e),
        }
    }
}
