//! HTTP surface
//!
//! ## Routes
//!
//! - `GET /health`
//! - `GET /api/projects`, `GET /api/apps/{packageName}`
//! - `POST /api/upload` (multipart)
//! - `POST /api/builds/delete`, `POST /api/apps/delete` (form or JSON)
//! - `GET /downloads/{fileName}`, `GET /icons/{fileName}`

mod error;
mod routes;
mod state;
mod views;

use std::io;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

pub use error::{status_for, ApiError};
pub use routes::{APK_CONTENT_TYPE, UPLOAD_SUCCESS_LOCATION};
pub use state::AppState;
pub use views::{AppView, BuildView, ProjectView};

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/health", get(routes::health))
        .route("/api/projects", get(routes::list_projects))
        .route("/api/apps/{package_name}", get(routes::get_app))
        .route("/api/upload", post(routes::upload).layer(upload_limit))
        .route("/api/builds/delete", post(routes::delete_build))
        .route("/api/apps/delete", post(routes::delete_app))
        .route("/downloads/{file_name}", get(routes::download))
        .route("/icons/{file_name}", get(routes::icon))
        .with_state(state)
}

/// Serve until Ctrl-C / SIGTERM.
pub async fn serve(bind: &str, state: AppState) -> io::Result<()> {
    let listener = TcpListener::bind(bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown requested");
}
