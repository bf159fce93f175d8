//! Serve command handler

use anyhow::{Context, Result};

use apkshelf::config::Config;
use apkshelf::presentation::Shelf;
use apkshelf::server::{self, AppState};

pub fn cmd_serve(mut config: Config, bind: Option<String>) -> Result<()> {
    if let Some(bind) = bind {
        config.server.bind = bind;
    }

    let shelf = Shelf::open(&config).context("failed to open the registry")?;
    let state = AppState::new(&shelf, &config);

    tracing::info!(
        metadata = %config.storage.metadata_path.display(),
        uploads = %config.storage.uploads_dir.display(),
        apps = shelf.store.snapshot().iter().map(|p| p.apps.len()).sum::<usize>(),
        "registry loaded"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    runtime
        .block_on(server::serve(&config.server.bind, state))
        .with_context(|| format!("server on {} failed", config.server.bind))
}
