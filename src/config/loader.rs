// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{GraphConfig, RawGraphConfig};
use crate::errors::Result;

/// Load a graph description from a given path and return the raw
/// `RawGraphConfig`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawGraphConfig> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config: RawGraphConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a graph description from path and validate it.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for unknown `after` references, dependency cycles, sentinel
///   name clashes and invalid compute times.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<GraphConfig> {
    let raw_config = load_from_path(&path)?;
    GraphConfig::try_from(raw_config)
}

/// Parse and validate a graph description held in memory.
pub fn parse_and_validate(contents: &str) -> Result<GraphConfig> {
    let raw_config: RawGraphConfig = toml::from_str(contents)?;
    GraphConfig::try_from(raw_config)
}

/// Default graph description path: `Framedag.toml` in the current working
/// directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Framedag.toml")
}
