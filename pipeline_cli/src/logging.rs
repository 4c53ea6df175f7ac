//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence; otherwise both crates log at the configured
//! level, or at debug with `--verbose`. Logs go to stderr so that stdout
//! stays clean for results and `--json` output.

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogLevel;

/// Filter directive for a level, scoped to this workspace's crates
pub fn default_directive(level: Level) -> String {
    let level = level.to_string().to_lowercase();
    format!("pipeline_core={level},pipeline_cli={level}")
}

pub fn init_logging(log_level: LogLevel, verbose: bool) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else {
        log_level.to_tracing_level()
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(level)))
        .context("Failed to create log filter")?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
