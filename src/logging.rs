//! Tracing subscriber setup
//!
//! Logs go to stderr so `list --json` output on stdout stays parseable.
//! `RUST_LOG` overrides the default `info` filter.

use std::io;

use is_terminal::IsTerminal;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

const DEFAULT_FILTER: &str = "info";

pub fn init(format: LogFormat, verbose: bool) {
    let filter = build_filter(verbose);
    let ansi = io::stderr().is_terminal();

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(io::stderr),
            )
            .try_init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(ansi)
                    .with_writer(io::stderr),
            )
            .try_init(),
    };
}

fn build_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { DEFAULT_FILTER };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}
