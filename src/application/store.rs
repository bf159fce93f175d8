//! Registry Store
//!
//! The single owner of the in-memory registry. Every read and every
//! mutation goes through one mutex, and mutations hold it until the new
//! state has been persisted, so no caller ever sees memory and disk disagree
//! and concurrent mutations are strictly serialized.
//!
//! A mutation whose save fails is rolled back before the lock is released.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::entities::{
    AppEntry, AppInfo, AppRemoval, BuildInfo, BuildRemoval, NotFound, Project, Registry,
};
use crate::domain::ports::{RegistryError, RegistryRepository};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    NotFound(#[from] NotFound),

    #[error(transparent)]
    Persistence(#[from] RegistryError),
}

pub struct RegistryStore {
    registry: Mutex<Registry>,
    repository: Arc<dyn RegistryRepository>,
}

impl RegistryStore {
    /// Load the persisted registry and take ownership of it.
    pub fn open(repository: Arc<dyn RegistryRepository>) -> Result<Self, RegistryError> {
        let registry = repository.load()?;
        Ok(Self {
            registry: Mutex::new(registry),
            repository,
        })
    }

    pub fn find_app(&self, package_name: &str) -> Option<AppEntry> {
        self.lock().find_app(package_name).cloned()
    }

    pub fn contains_file(&self, file_name: &str) -> bool {
        self.lock().contains_file(file_name)
    }

    /// Copy of every project, taken at a single instant.
    pub fn snapshot(&self) -> Vec<Project> {
        self.lock().projects().to_vec()
    }

    pub fn upsert_build(
        &self,
        project_name: &str,
        app: AppInfo,
        build: BuildInfo,
    ) -> Result<(), RegistryError> {
        self.mutate(|registry| {
            registry.upsert_build(project_name, app, build);
            Ok(())
        })
    }

    pub fn delete_build(
        &self,
        package_name: &str,
        file_name: &str,
    ) -> Result<BuildRemoval, StoreError> {
        self.mutate(|registry| Ok(registry.remove_build(package_name, file_name)?))
    }

    pub fn delete_app(&self, package_name: &str) -> Result<AppRemoval, StoreError> {
        self.mutate(|registry| Ok(registry.remove_app(package_name)?))
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        // Guarded state is only ever replaced wholesale, so a poisoned lock
        // still holds a consistent registry.
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Registry) -> Result<T, E>,
        E: From<RegistryError>,
    {
        let mut registry = self.lock();
        let mut next = registry.clone();
        let out = f(&mut next)?;

        if let Err(e) = self.repository.save(&next) {
            tracing::error!(error = %e, "failed to persist metadata, change discarded");
            return Err(e.into());
        }

        *registry = next;
        Ok(out)
    }
}
