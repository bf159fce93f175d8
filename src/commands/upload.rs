//! Upload command handler

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use apkshelf::application::UploadRequest;
use apkshelf::config::Config;
use apkshelf::presentation::{format_size, Shelf};

pub fn cmd_upload(
    config: &Config,
    file: &Path,
    project: &str,
    channel: &str,
    notes: &str,
) -> Result<()> {
    let content = fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;

    let shelf = Shelf::open(config)?;
    let request = UploadRequest::new(project, channel).with_release_notes(notes);
    let result = shelf.upload_use_case().execute(&request, &content)?;

    println!(
        "Uploaded {} {} ({}) to {}",
        result.app_name, result.build.version, result.package_name, result.project_name
    );
    println!(
        "  {}  {}  {}",
        result.build.file_name,
        format_size(result.build.file_size),
        result.build.download_url()
    );
    Ok(())
}
