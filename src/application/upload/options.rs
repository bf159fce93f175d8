//! Upload request

use std::str::FromStr;

/// Where an upload came from; decides how the HTTP layer answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadSource {
    /// The browser form, answered with a redirect.
    Web,
    #[default]
    Api,
}

impl FromStr for UploadSource {
    type Err = std::convert::Infallible;

    /// Anything other than `web` is an API client.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.trim().eq_ignore_ascii_case("web") {
            UploadSource::Web
        } else {
            UploadSource::Api
        })
    }
}

/// Form fields that accompany the uploaded file
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub project_name: String,
    pub channel: String,
    pub release_notes: String,
    pub source: UploadSource,
}

impl UploadRequest {
    pub fn new(project_name: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            channel: channel.into(),
            ..Self::default()
        }
    }

    pub fn with_release_notes(mut self, notes: impl Into<String>) -> Self {
        self.release_notes = notes.into();
        self
    }

    pub fn with_source(mut self, source: UploadSource) -> Self {
        self.source = source;
        self
    }
}
