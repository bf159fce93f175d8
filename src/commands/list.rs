//! List command handler

use anyhow::Result;

use apkshelf::config::Config;
use apkshelf::presentation::{render_projects, Shelf};
use apkshelf::server::ProjectView;

pub fn cmd_list(config: &Config, json: bool) -> Result<()> {
    let shelf = Shelf::open(config)?;
    let projects = shelf.store.snapshot();

    if json {
        let views: Vec<ProjectView> = projects.iter().map(ProjectView::from).collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else {
        print!("{}", render_projects(&projects));
    }
    Ok(())
}
