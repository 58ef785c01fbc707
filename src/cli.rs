// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_config_path;

/// Command-line arguments for `framedag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "framedag",
    version,
    about = "Build, simplify and profile a per-frame task graph.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the graph description (TOML).
    ///
    /// Default: `Framedag.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FRAMEDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Reduce the graph even if `[graph].reduce` is off.
    #[arg(long)]
    pub reduce: bool,

    /// Order critical nodes even if `[graph].resolve_critical` is off.
    #[arg(long)]
    pub resolve_critical: bool,

    /// Rename duplicate node names with numeric suffixes before reporting.
    #[arg(long)]
    pub unique_names: bool,

    /// Execute this many frames with timing enabled before reporting, so the
    /// profile uses measured compute times.
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub frames: u32,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
