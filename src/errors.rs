// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FramedagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// An operation referenced a node that is not a member of the graph.
    #[error("node \"{0}\" does not exist in graph")]
    NodeNotInGraph(String),

    /// An insertion expected a fresh node but got an existing member.
    #[error("node \"{0}\" already exists in graph")]
    NodeAlreadyInGraph(String),

    #[error("Cycle detected in task graph: {0}")]
    GraphCycle(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, FramedagError>;
