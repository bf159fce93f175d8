//! Registry entity
//!
//! The project → app → build tree served by apkshelf. All tree rules live here
//! (uniqueness, newest-first ordering, cascading removal); locking and
//! persistence are layered on top by `application::store`.

use chrono::NaiveDateTime;

/// Prefix under which committed artifacts are served.
pub const DOWNLOADS_PREFIX: &str = "/downloads";

/// One uploaded artifact of one app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: String,
    pub channel: String,
    pub release_notes: String,
    /// Unique across the whole registry; doubles as the deletion key.
    pub file_name: String,
    pub file_size: u64,
    pub upload_time: NaiveDateTime,
}

impl BuildInfo {
    pub fn download_url(&self) -> String {
        format!("{}/{}", DOWNLOADS_PREFIX, self.file_name)
    }
}

/// A unique app, keyed by its package name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEntry {
    pub app_name: String,
    pub package_name: String,
    pub icon_path: Option<String>,
    /// Newest first. Never empty while the entry is part of a registry.
    pub builds: Vec<BuildInfo>,
}

impl AppEntry {
    pub fn latest(&self) -> Option<&BuildInfo> {
        self.builds.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub project_name: String,
    pub apps: Vec<AppEntry>,
}

/// App identity produced by ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub app_name: String,
    pub package_name: String,
    pub icon_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotFound {
    #[error("app not found: {package_name}")]
    App { package_name: String },

    #[error("build not found: {file_name} (app {package_name})")]
    Build {
        package_name: String,
        file_name: String,
    },
}

/// Outcome of removing a single build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRemoval {
    pub build: BuildInfo,
    /// The app lost its last build and was removed with it.
    pub app_removed: bool,
    pub project_removed: bool,
    /// Icon of the app at removal time.
    pub icon_path: Option<String>,
}

/// Outcome of removing a whole app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRemoval {
    pub app: AppEntry,
    pub project_removed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    projects: Vec<Project>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_projects(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn into_projects(self) -> Vec<Project> {
        self.projects
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn find_app(&self, package_name: &str) -> Option<&AppEntry> {
        self.projects
            .iter()
            .flat_map(|p| p.apps.iter())
            .find(|a| a.package_name == package_name)
    }

    pub fn contains_file(&self, file_name: &str) -> bool {
        self.projects
            .iter()
            .flat_map(|p| p.apps.iter())
            .flat_map(|a| a.builds.iter())
            .any(|b| b.file_name == file_name)
    }

    /// Record `build` as the newest build of `app` under `project_name`.
    ///
    /// Missing projects and apps are appended, so display order follows
    /// first-seen order. An existing app keeps its position and project; its
    /// name is refreshed, and its icon only when a new one was produced.
    pub fn upsert_build(&mut self, project_name: &str, app: AppInfo, build: BuildInfo) {
        let icon_path = app.icon_path.filter(|p| !p.is_empty());

        if let Some(existing) = self.find_app_mut(&app.package_name) {
            existing.app_name = app.app_name;
            if icon_path.is_some() {
                existing.icon_path = icon_path;
            }
            existing.builds.insert(0, build);
            return;
        }

        let project = match self
            .projects
            .iter()
            .position(|p| p.project_name == project_name)
        {
            Some(idx) => &mut self.projects[idx],
            None => {
                self.projects.push(Project {
                    project_name: project_name.to_string(),
                    apps: Vec::new(),
                });
                let last = self.projects.len() - 1;
                &mut self.projects[last]
            }
        };

        project.apps.push(AppEntry {
            app_name: app.app_name,
            package_name: app.package_name,
            icon_path,
            builds: vec![build],
        });
    }

    pub fn remove_build(
        &mut self,
        package_name: &str,
        file_name: &str,
    ) -> Result<BuildRemoval, NotFound> {
        let (project_idx, app_idx) =
            self.locate(package_name)
                .ok_or_else(|| NotFound::App {
                    package_name: package_name.to_string(),
                })?;

        let app = &mut self.projects[project_idx].apps[app_idx];
        let build_idx = app
            .builds
            .iter()
            .position(|b| b.file_name == file_name)
            .ok_or_else(|| NotFound::Build {
                package_name: package_name.to_string(),
                file_name: file_name.to_string(),
            })?;

        let build = app.builds.remove(build_idx);
        let icon_path = app.icon_path.clone();
        let app_removed = app.builds.is_empty();
        let mut project_removed = false;

        if app_removed {
            self.projects[project_idx].apps.remove(app_idx);
            project_removed = self.prune_project(project_idx);
        }

        Ok(BuildRemoval {
            build,
            app_removed,
            project_removed,
            icon_path,
        })
    }

    pub fn remove_app(&mut self, package_name: &str) -> Result<AppRemoval, NotFound> {
        let (project_idx, app_idx) =
            self.locate(package_name)
                .ok_or_else(|| NotFound::App {
                    package_name: package_name.to_string(),
                })?;

        let app = self.projects[project_idx].apps.remove(app_idx);
        let project_removed = self.prune_project(project_idx);

        Ok(AppRemoval {
            app,
            project_removed,
        })
    }

    fn find_app_mut(&mut self, package_name: &str) -> Option<&mut AppEntry> {
        self.projects
            .iter_mut()
            .flat_map(|p| p.apps.iter_mut())
            .find(|a| a.package_name == package_name)
    }

    fn locate(&self, package_name: &str) -> Option<(usize, usize)> {
        self.projects.iter().enumerate().find_map(|(pi, p)| {
            p.apps
                .iter()
                .position(|a| a.package_name == package_name)
                .map(|ai| (pi, ai))
        })
    }

    fn prune_project(&mut self, project_idx: usize) -> bool {
        if self.projects[project_idx].apps.is_empty() {
            self.projects.remove(project_idx);
            true
        } else {
            false
        }
    }
}
