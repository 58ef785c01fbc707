// src/logging.rs

//! Diagnostics for the `framedag` binary.
//!
//! The plan report owns stdout, so log lines go to stderr. The filter comes
//! from `--log-level` when given. Otherwise `FRAMEDAG_LOG` is read as a full
//! `EnvFilter` directive (`debug`, `framedag::dag=trace,info`, ...). With
//! neither, or with a directive that does not parse, `info` applies.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

/// Environment variable holding the default filter directive.
pub const LOG_ENV: &str = "FRAMEDAG_LOG";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_directive = std::env::var(LOG_ENV).ok();
    let filter = log_filter(cli_level, env_directive.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}

fn log_filter(cli_level: Option<LogLevel>, env_directive: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(level_name(level));
    }
    env_directive
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn level_name(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
