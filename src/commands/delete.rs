//! Delete command handlers
//!
//! The local operator is trusted: no delete secret is asked for, but every
//! deletion is confirmed unless `--yes` is given.

use anyhow::{bail, Result};
use dialoguer::Confirm;

use apkshelf::application::DeleteAuth;
use apkshelf::config::Config;
use apkshelf::presentation::Shelf;

pub fn cmd_delete_build(config: &Config, package: &str, file: &str, yes: bool) -> Result<()> {
    let shelf = Shelf::open(config)?;
    if !yes && !confirm(&format!("Delete build {} of {}?", file, package))? {
        bail!("aborted");
    }

    let result = shelf
        .delete_use_case(DeleteAuth::Trusted)
        .delete_build(None, package, file)?;

    println!("Deleted {}", result.build.file_name);
    if result.app_removed {
        println!("  {} had no builds left and was removed", package);
    }
    Ok(())
}

pub fn cmd_delete_app(config: &Config, package: &str, yes: bool) -> Result<()> {
    let shelf = Shelf::open(config)?;
    let Some(app) = shelf.store.find_app(package) else {
        bail!("app not found: {}", package);
    };

    let prompt = format!(
        "Delete {} ({}) and all {} of its builds?",
        app.app_name,
        package,
        app.builds.len()
    );
    if !yes && !confirm(&prompt)? {
        bail!("aborted");
    }

    let result = shelf
        .delete_use_case(DeleteAuth::Trusted)
        .delete_app(None, package)?;

    println!(
        "Deleted {} ({} builds)",
        result.app_name,
        result.removed_builds.len()
    );
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
