//! JSON views of the registry
//!
//! Field names follow the metadata file (`projectName`, `downloadURL`, ...)
//! so clients can treat both the same way.

use std::path::Path;

use serde::Serialize;

use crate::domain::entities::{AppEntry, BuildInfo, Project};
use crate::infrastructure::repositories::UPLOAD_TIME_FORMAT;
use crate::presentation::format_size;

pub const ICONS_PREFIX: &str = "/icons";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub project_name: String,
    pub apps: Vec<AppView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppView {
    pub app_name: String,
    pub package_name: String,
    #[serde(rename = "iconURL", skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub builds: Vec<BuildView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildView {
    pub version: String,
    pub channel: String,
    pub release_notes: String,
    pub file_name: String,
    pub file_size: u64,
    pub file_size_human: String,
    pub upload_time: String,
    #[serde(rename = "downloadURL")]
    pub download_url: String,
}

impl From<&Project> for ProjectView {
    fn from(project: &Project) -> Self {
        Self {
            project_name: project.project_name.clone(),
            apps: project.apps.iter().map(AppView::from).collect(),
        }
    }
}

impl From<&AppEntry> for AppView {
    fn from(app: &AppEntry) -> Self {
        Self {
            app_name: app.app_name.clone(),
            package_name: app.package_name.clone(),
            icon_url: app.icon_path.as_deref().and_then(icon_url),
            builds: app.builds.iter().map(BuildView::from).collect(),
        }
    }
}

impl From<&BuildInfo> for BuildView {
    fn from(build: &BuildInfo) -> Self {
        Self {
            version: build.version.clone(),
            channel: build.channel.clone(),
            release_notes: build.release_notes.clone(),
            file_name: build.file_name.clone(),
            file_size: build.file_size,
            file_size_human: format_size(build.file_size),
            upload_time: build.upload_time.format(UPLOAD_TIME_FORMAT).to_string(),
            download_url: build.download_url(),
        }
    }
}

/// Icons are served by file name from the icons dir.
fn icon_url(icon_path: &str) -> Option<String> {
    let name = Path::new(icon_path).file_name()?.to_str()?;
    Some(format!("{}/{}", ICONS_PREFIX, name))
}
