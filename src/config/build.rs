// src/config/build.rs

//! Turn a validated [`GraphConfig`] into a [`TaskGraph`].

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info, trace};

use crate::config::model::{GraphConfig, NodeConfig};
use crate::dag::{TaskGraph, TaskNode};
use crate::errors::Result;

impl GraphConfig {
    /// Build the described graph and run the configured pipeline stages.
    ///
    /// - nodes without `after` hang off the source;
    /// - nodes no other node depends on feed the sink;
    /// - `[graph].reduce` runs [`TaskGraph::reduce`];
    /// - `[graph].resolve_critical` then runs
    ///   [`TaskGraph::resolve_critical_nodes`].
    ///
    /// Non-passthrough nodes get an action that only traces; real models
    /// attach their own actions through the graph API.
    pub fn build_graph(&self) -> Result<TaskGraph> {
        let mut graph = TaskGraph::with_names(&self.graph.source, &self.graph.sink);
        let source = graph.source().clone();
        let sink = graph.sink().clone();

        let mut by_name: HashMap<&str, TaskNode> = HashMap::new();
        for (name, cfg) in self.node.iter() {
            let node = node_from_config(name, cfg);
            graph.add_node(node.clone());
            by_name.insert(name.as_str(), node);
        }

        let depended_on: BTreeSet<&str> = self
            .node
            .values()
            .flat_map(|cfg| cfg.after.iter().map(String::as_str))
            .collect();

        for (name, cfg) in self.node.iter() {
            let node = &by_name[name.as_str()];
            if cfg.after.is_empty() {
                graph.add_edge(&source, node)?;
            }
            for dep in &cfg.after {
                graph.add_edge(&by_name[dep.as_str()], node)?;
            }
            if !depended_on.contains(name.as_str()) {
                graph.add_edge(node, &sink)?;
            }
        }
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built graph from config"
        );

        if self.graph.reduce {
            graph = graph.reduce()?;
        }
        if self.graph.resolve_critical {
            graph = graph.resolve_critical_nodes();
        }

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            reduce = self.graph.reduce,
            resolve_critical = self.graph.resolve_critical,
            "task graph ready"
        );
        Ok(graph)
    }
}

fn node_from_config(name: &str, cfg: &NodeConfig) -> TaskNode {
    let node = if cfg.passthrough {
        TaskNode::new(name)
    } else {
        let label = name.to_string();
        TaskNode::from_fn(name, move || trace!(node = %label, "running configured step"))
    };
    node.set_critical(cfg.critical);
    if let Some(time) = cfg.compute_time {
        node.set_compute_time(time);
    }
    node
}

#[cfg(test)]
mod tests {
    use crate::config::loader::parse_and_validate;

    #[test]
    fn roots_and_leaves_attach_to_sentinels() {
        let cfg = parse_and_validate(
            r#"
[node.update]

[node.solve]
after = ["update"]
critical = true
compute_time = 2.0

[node.write]
after = ["update"]
"#,
        )
        .unwrap();
        let graph = cfg.build_graph().unwrap();

        let update = graph.find_node("update").unwrap().clone();
        let solve = graph.find_node("solve").unwrap().clone();
        let write = graph.find_node("write").unwrap().clone();
        assert!(graph.contains_edge(graph.source(), &update));
        assert!(graph.contains_edge(&update, &solve));
        assert!(graph.contains_edge(&update, &write));
        assert!(graph.contains_edge(&solve, graph.sink()));
        assert!(graph.contains_edge(&write, graph.sink()));
        assert!(!graph.contains_edge(&update, graph.sink()));
        assert!(solve.is_critical());
        assert_eq!(solve.compute_time(), 2.0);
        assert!(update.is_functional());
    }

    #[test]
    fn pipeline_stages_run_when_enabled() {
        let cfg = parse_and_validate(
            r#"
[graph]
source = "FrameBegin"
sink = "FrameEnd"
reduce = true
resolve_critical = true

[node.hop]
passthrough = true

[node.a]
after = ["hop"]
critical = true

[node.b]
critical = true
"#,
        )
        .unwrap();
        let graph = cfg.build_graph().unwrap();

        assert_eq!(graph.source().name(), "FrameBegin");
        assert!(graph.find_node("hop").is_none());
        let a = graph.find_node("a").unwrap();
        let b = graph.find_node("b").unwrap();
        assert!(graph.is_reachable(a, b) || graph.is_reachable(b, a));
    }
}
