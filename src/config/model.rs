// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Graph description as read from a TOML file, before validation.
///
/// ```toml
/// [graph]
/// source = "Source"
/// sink = "Sink"
/// reduce = true
///
/// [node.update_geometry]
/// compute_time = 0.4
///
/// [node.detect_collision]
/// after = ["update_geometry"]
/// critical = true
/// ```
///
/// All sections are optional and have reasonable defaults; validation
/// rejects a description without nodes.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGraphConfig {
    /// Graph-wide options from `[graph]`.
    #[serde(default)]
    pub graph: GraphSection,

    /// All nodes from `[node.<name>]`, keyed by node name.
    #[serde(default)]
    pub node: BTreeMap<String, NodeConfig>,
}

/// A validated graph description.
///
/// Only obtainable through `TryFrom<RawGraphConfig>` (see `validate.rs`), so
/// holders can assume every dependency exists and the dependencies are
/// acyclic.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub graph: GraphSection,
    pub node: BTreeMap<String, NodeConfig>,
}

impl GraphConfig {
    pub(crate) fn new_unchecked(graph: GraphSection, node: BTreeMap<String, NodeConfig>) -> Self {
        Self { graph, node }
    }
}

/// `[graph]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphSection {
    /// Name of the source sentinel.
    #[serde(default = "default_source_name")]
    pub source: String,

    /// Name of the sink sentinel.
    #[serde(default = "default_sink_name")]
    pub sink: String,

    /// Run transitive reduction and redundant-node removal after building.
    #[serde(default)]
    pub reduce: bool,

    /// Order all critical nodes after building (and reducing).
    #[serde(default)]
    pub resolve_critical: bool,
}

fn default_source_name() -> String {
    "Source".to_string()
}

fn default_sink_name() -> String {
    "Sink".to_string()
}

impl Default for GraphSection {
    fn default() -> Self {
        Self {
            source: default_source_name(),
            sink: default_sink_name(),
            reduce: false,
            resolve_critical: false,
        }
    }
}

/// `[node.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeConfig {
    /// Nodes that must complete before this one starts.
    ///
    /// A node without dependencies starts right after the source.
    #[serde(default)]
    pub after: Vec<String>,

    /// Never run concurrently with another critical node.
    #[serde(default)]
    pub critical: bool,

    /// Expected duration in milliseconds, used for profiling until an
    /// executor measures the real one.
    #[serde(default)]
    pub compute_time: Option<f64>,

    /// A structural node without an action. Pass-through nodes with a
    /// single input and output are removed by `reduce`.
    #[serde(default)]
    pub passthrough: bool,
}
