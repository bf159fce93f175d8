use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// apkshelf - catalog and serve Android build artifacts
#[derive(Parser, Debug)]
#[command(name = "apkshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ./apkshelf.toml, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Listen address (overrides [server] bind)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// List every project, app and build
    List {
        /// Print the registry as JSON
        #[arg(long)]
        json: bool,
    },

    /// Upload a package from the local disk
    Upload {
        /// Path to the .apk file
        file: PathBuf,

        /// Project to file the app under
        #[arg(short, long)]
        project: String,

        /// Release channel (e.g. beta, release)
        #[arg(short, long)]
        channel: String,

        /// Release notes for this build
        #[arg(short, long, default_value = "")]
        notes: String,
    },

    /// Delete one build of an app
    DeleteBuild {
        /// Package name of the app
        package: String,

        /// File name of the build
        file: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete an app with all of its builds
    DeleteApp {
        /// Package name of the app
        package: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the effective configuration
    Config,
}
