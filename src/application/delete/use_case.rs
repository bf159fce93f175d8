//! Delete Use Case
//!
//! Registry first, files second: the metadata is the source of truth, so a
//! file that cannot be removed is logged and left behind rather than failing
//! an already persisted deletion.

use std::sync::Arc;

use crate::application::store::RegistryStore;
use crate::domain::ports::{BlobError, BlobStore};

use super::result::{DeleteAppResult, DeleteAuth, DeleteBuildResult, DeleteError};

/// Delete use case - removes builds and apps with their files
pub struct DeleteUseCase {
    store: Arc<RegistryStore>,
    blobs: Arc<dyn BlobStore>,
    auth: DeleteAuth,
}

impl DeleteUseCase {
    pub fn new(store: Arc<RegistryStore>, blobs: Arc<dyn BlobStore>, auth: DeleteAuth) -> Self {
        Self { store, blobs, auth }
    }

    /// Remove one build. Removing the last build of an app removes the app
    /// (and its icon), and an emptied project goes with it.
    pub fn delete_build(
        &self,
        secret: Option<&str>,
        package_name: &str,
        file_name: &str,
    ) -> Result<DeleteBuildResult, DeleteError> {
        self.authorize(secret)?;

        let removal = self.store.delete_build(package_name, file_name)?;

        self.cleanup_artifact(&removal.build.file_name);
        if removal.app_removed {
            if let Some(icon) = &removal.icon_path {
                self.cleanup_icon(icon);
            }
        }

        tracing::info!(
            package = %package_name,
            file = %file_name,
            app_removed = removal.app_removed,
            project_removed = removal.project_removed,
            "build deleted"
        );

        Ok(DeleteBuildResult {
            package_name: package_name.to_string(),
            build: removal.build,
            app_removed: removal.app_removed,
            project_removed: removal.project_removed,
        })
    }

    /// Remove an app with all of its builds and its icon.
    pub fn delete_app(
        &self,
        secret: Option<&str>,
        package_name: &str,
    ) -> Result<DeleteAppResult, DeleteError> {
        self.authorize(secret)?;

        let removal = self.store.delete_app(package_name)?;
        let app = removal.app;

        for build in &app.builds {
            self.cleanup_artifact(&build.file_name);
        }
        if let Some(icon) = &app.icon_path {
            self.cleanup_icon(icon);
        }

        tracing::info!(
            package = %package_name,
            builds = app.builds.len(),
            project_removed = removal.project_removed,
            "app deleted"
        );

        Ok(DeleteAppResult {
            app_name: app.app_name,
            package_name: app.package_name,
            removed_builds: app.builds,
            project_removed: removal.project_removed,
        })
    }

    fn authorize(&self, secret: Option<&str>) -> Result<(), DeleteError> {
        if self.auth.allows(secret) {
            return Ok(());
        }
        tracing::warn!("delete rejected: invalid secret");
        Err(DeleteError::Unauthorized)
    }

    fn cleanup_artifact(&self, file_name: &str) {
        match self.blobs.remove_artifact(file_name) {
            Ok(()) => {}
            Err(BlobError::NotFound(_)) => {
                tracing::debug!(file = %file_name, "artifact already gone");
            }
            Err(e) => tracing::warn!(file = %file_name, error = %e, "failed to remove artifact"),
        }
    }

    fn cleanup_icon(&self, icon_path: &str) {
        match self.blobs.remove_icon(icon_path) {
            Ok(()) | Err(BlobError::NotFound(_)) => {}
            Err(e) => tracing::warn!(icon = %icon_path, error = %e, "failed to remove icon"),
        }
    }
}
