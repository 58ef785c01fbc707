// src/config/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{GraphConfig, RawGraphConfig};
use crate::errors::{FramedagError, Result};

impl TryFrom<RawGraphConfig> for GraphConfig {
    type Error = FramedagError;

    fn try_from(raw: RawGraphConfig) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(GraphConfig::new_unchecked(raw.graph, raw.node))
    }
}

fn validate_raw_config(cfg: &RawGraphConfig) -> Result<()> {
    ensure_has_nodes(cfg)?;
    validate_sentinel_names(cfg)?;
    validate_node_settings(cfg)?;
    validate_node_dependencies(cfg)?;
    validate_dag(cfg)?;
    Ok(())
}

fn ensure_has_nodes(cfg: &RawGraphConfig) -> Result<()> {
    if cfg.node.is_empty() {
        return Err(FramedagError::ConfigError(
            "config must contain at least one [node.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_sentinel_names(cfg: &RawGraphConfig) -> Result<()> {
    let (source, sink) = (&cfg.graph.source, &cfg.graph.sink);
    if source == sink {
        return Err(FramedagError::ConfigError(format!(
            "[graph].source and [graph].sink must differ (both are '{}')",
            source
        )));
    }
    for name in cfg.node.keys() {
        if name == source || name == sink {
            return Err(FramedagError::ConfigError(format!(
                "node '{}' clashes with a sentinel name",
                name
            )));
        }
    }
    Ok(())
}

fn validate_node_settings(cfg: &RawGraphConfig) -> Result<()> {
    for (name, node) in cfg.node.iter() {
        if let Some(time) = node.compute_time {
            if !time.is_finite() || time < 0.0 {
                return Err(FramedagError::ConfigError(format!(
                    "node '{}' has invalid compute_time {} (expected a finite value >= 0)",
                    name, time
                )));
            }
        }
    }
    Ok(())
}

fn validate_node_dependencies(cfg: &RawGraphConfig) -> Result<()> {
    for (name, node) in cfg.node.iter() {
        for dep in node.after.iter() {
            if dep == name {
                return Err(FramedagError::ConfigError(format!(
                    "node '{}' cannot depend on itself in `after`",
                    name
                )));
            }
            if !cfg.node.contains_key(dep) {
                return Err(FramedagError::ConfigError(format!(
                    "node '{}' has unknown dependency '{}' in `after`",
                    name, dep
                )));
            }
        }
    }
    Ok(())
}

fn validate_dag(cfg: &RawGraphConfig) -> Result<()> {
    // Edge direction: dep -> node.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in cfg.node.keys() {
        graph.add_node(name.as_str());
    }
    for (name, node) in cfg.node.iter() {
        for dep in node.after.iter() {
            graph.add_edge(dep.as_str(), name.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(FramedagError::GraphCycle(format!(
            "cycle detected in node dependencies involving node '{}'",
            cycle.node_id()
        ))),
    }
}
