//! JSON Registry Repository
//!
//! Persists the registry as a single pretty-printed JSON document.
//!
//! Saves never overwrite the live document in place: the current file is
//! first renamed to `<path>.bak`, the new content is written and synced, and
//! only then is the backup deleted. A failed write puts the backup back. A
//! backup found at load time means a save was interrupted; it is used when
//! the primary is missing or unreadable.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::entities::{AppEntry, BuildInfo, Project, Registry};
use crate::domain::ports::{RegistryError, RegistryRepository};

/// Wire format of `uploadTime`.
pub const UPLOAD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonBuild {
    version: String,
    channel: String,
    #[serde(default)]
    release_notes: String,
    file_name: String,
    #[serde(default)]
    file_size: u64,
    upload_time: String,
    /// Written for consumers of the raw file; recomputed on load.
    #[serde(rename = "downloadURL", default)]
    download_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonApp {
    app_name: String,
    package_name: String,
    #[serde(default)]
    icon_path: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    builds: Vec<JsonBuild>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonProject {
    project_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    apps: Vec<JsonApp>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

pub struct JsonRegistryRepository {
    path: PathBuf,
}

impl JsonRegistryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".bak");
        PathBuf::from(name)
    }

    /// `Ok(None)` when the file does not exist.
    fn read_document(&self, path: &Path) -> Result<Option<Registry>, RegistryError> {
        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(RegistryError::AccessError {
                    message: format!("{}: {}", path.display(), e),
                })
            }
        };

        let corrupted = |message: String| RegistryError::Corrupted {
            path: path.to_path_buf(),
            message,
        };

        let projects: Option<Vec<JsonProject>> =
            serde_json::from_slice(&content).map_err(|e| corrupted(e.to_string()))?;

        from_json(projects.unwrap_or_default())
            .map(Some)
            .map_err(corrupted)
    }

    fn recover_from_backup(&self, backup: &Path) -> Result<Registry, RegistryError> {
        tracing::warn!(
            path = %self.path.display(),
            backup = %backup.display(),
            "metadata save was interrupted, restoring previous state from backup"
        );
        let registry = self.read_document(backup)?.unwrap_or_default();
        fs::rename(backup, &self.path).map_err(|e| RegistryError::AccessError {
            message: format!("failed to restore {}: {}", backup.display(), e),
        })?;
        Ok(registry)
    }

    fn save_with<W>(&self, registry: &Registry, write: W) -> Result<(), RegistryError>
    where
        W: FnOnce(&Path, &[u8]) -> io::Result<()>,
    {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| RegistryError::AccessError {
                message: e.to_string(),
            })?;
        }

        let content = serde_json::to_vec_pretty(&to_json(registry)).map_err(|e| {
            RegistryError::SerializationError {
                message: e.to_string(),
            }
        })?;

        let backup = self.backup_path();
        let had_primary = self.path.exists();
        if had_primary {
            fs::rename(&self.path, &backup).map_err(|e| RegistryError::AccessError {
                message: format!("failed to back up {}: {}", self.path.display(), e),
            })?;
        }

        if let Err(e) = write(&self.path, &content) {
            if had_primary {
                if let Err(restore) = fs::rename(&backup, &self.path) {
                    tracing::error!(
                        backup = %backup.display(),
                        error = %restore,
                        "failed to restore metadata backup"
                    );
                }
            } else {
                let _ = fs::remove_file(&self.path);
            }
            return Err(RegistryError::AccessError {
                message: format!("failed to write {}: {}", self.path.display(), e),
            });
        }

        if had_primary {
            if let Err(e) = fs::remove_file(&backup) {
                tracing::warn!(backup = %backup.display(), error = %e, "failed to remove metadata backup");
            }
        }

        tracing::debug!(path = %self.path.display(), bytes = content.len(), "metadata saved");
        Ok(())
    }
}

impl RegistryRepository for JsonRegistryRepository {
    fn load(&self) -> Result<Registry, RegistryError> {
        let backup = self.backup_path();
        if backup.exists() {
            return match self.read_document(&self.path) {
                Ok(Some(registry)) => {
                    // The write finished; only the cleanup was lost.
                    if let Err(e) = fs::remove_file(&backup) {
                        tracing::warn!(backup = %backup.display(), error = %e, "failed to remove stale metadata backup");
                    }
                    Ok(registry)
                }
                Ok(None) | Err(RegistryError::Corrupted { .. }) => {
                    self.recover_from_backup(&backup)
                }
                Err(e) => Err(e),
            };
        }

        Ok(self.read_document(&self.path)?.unwrap_or_default())
    }

    fn save(&self, registry: &Registry) -> Result<(), RegistryError> {
        self.save_with(registry, write_synced)
    }
}

fn write_synced(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content)?;
    file.sync_all()
}

fn from_json(projects: Vec<JsonProject>) -> Result<Registry, String> {
    let projects = projects
        .into_iter()
        .map(|p| -> Result<Project, String> {
            let apps = p
                .apps
                .into_iter()
                .map(|a| -> Result<AppEntry, String> {
                    let builds = a
                        .builds
                        .into_iter()
                        .map(|b| -> Result<BuildInfo, String> {
                            let upload_time =
                                NaiveDateTime::parse_from_str(&b.upload_time, UPLOAD_TIME_FORMAT)
                                    .map_err(|e| {
                                        format!(
                                            "invalid uploadTime '{}' for {}: {}",
                                            b.upload_time, b.file_name, e
                                        )
                                    })?;
                            Ok(BuildInfo {
                                version: b.version,
                                channel: b.channel,
                                release_notes: b.release_notes,
                                file_name: b.file_name,
                                file_size: b.file_size,
                                upload_time,
                            })
                        })
                        .collect::<Result<Vec<_>, String>>()?;
                    Ok(AppEntry {
                        app_name: a.app_name,
                        package_name: a.package_name,
                        icon_path: Some(a.icon_path).filter(|p| !p.is_empty()),
                        builds,
                    })
                })
                .collect::<Result<Vec<_>, String>>()?;
            Ok(Project {
                project_name: p.project_name,
                apps,
            })
        })
        .collect::<Result<Vec<_>, String>>()?;

    Ok(Registry::from_projects(projects))
}

fn to_json(registry: &Registry) -> Vec<JsonProject> {
    registry
        .projects()
        .iter()
        .map(|p| JsonProject {
            project_name: p.project_name.clone(),
            apps: p
                .apps
                .iter()
                .map(|a| JsonApp {
                    app_name: a.app_name.clone(),
                    package_name: a.package_name.clone(),
                    icon_path: a.icon_path.clone().unwrap_or_default(),
                    builds: a
                        .builds
                        .iter()
                        .map(|b| JsonBuild {
                            version: b.version.clone(),
                            channel: b.channel.clone(),
                            release_notes: b.release_notes.clone(),
                            file_name: b.file_name.clone(),
                            file_size: b.file_size,
                            upload_time: b.upload_time.format(UPLOAD_TIME_FORMAT).to_string(),
                            download_url: b.download_url(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}
