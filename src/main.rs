//! apkshelf CLI
//!
//! Usage: apkshelf <COMMAND>
//!
//! Commands:
//!   serve         Run the HTTP server
//!   list          List every project, app and build
//!   upload        Upload a package from the local disk
//!   delete-build  Delete one build of an app
//!   delete-app    Delete an app with all of its builds
//!   config        Show the effective configuration

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use apkshelf::config::Config;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = Config::resolve(cli.config.as_deref())?;
    apkshelf::logging::init(loaded.config.logging.format, cli.verbose);
    for warning in &loaded.warnings {
        tracing::warn!("{}", warning);
    }

    let config = loaded.config.clone();
    match cli.command {
        Commands::Serve { bind } => commands::cmd_serve(config, bind),
        Commands::List { json } => commands::cmd_list(&config, json),
        Commands::Upload {
            file,
            project,
            channel,
            notes,
        } => commands::cmd_upload(&config, &file, &project, &channel, &notes),
        Commands::DeleteBuild { package, file, yes } => {
            commands::cmd_delete_build(&config, &package, &file, yes)
        }
        Commands::DeleteApp { package, yes } => commands::cmd_delete_app(&config, &package, yes),
        Commands::Config => commands::cmd_config(&loaded),
    }
}
