// src/config/mod.rs

//! Graph description loading and validation for framedag.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a description from disk (`loader.rs`).
//! - Validate dependencies, names and acyclicity (`validate.rs`).
//! - Build a [`TaskGraph`](crate::dag::TaskGraph) from it (`build.rs`).

pub mod build;
pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, parse_and_validate};
pub use model::{GraphConfig, GraphSection, NodeConfig, RawGraphConfig};
