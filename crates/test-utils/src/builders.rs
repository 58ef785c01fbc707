#![allow(dead_code)]

use std::collections::BTreeMap;

use framedag::config::{GraphConfig, GraphSection, NodeConfig, RawGraphConfig};
use framedag::dag::{TaskGraph, TaskNode};

/// Builder for `GraphConfig` to simplify test setup.
pub struct GraphConfigBuilder {
    config: RawGraphConfig,
}

impl GraphConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawGraphConfig {
                graph: GraphSection::default(),
                node: BTreeMap::new(),
            },
        }
    }

    pub fn with_node(mut self, name: &str, node: NodeConfig) -> Self {
        self.config.node.insert(name.to_string(), node);
        self
    }

    pub fn with_sentinels(mut self, source: &str, sink: &str) -> Self {
        self.config.graph.source = source.to_string();
        self.config.graph.sink = sink.to_string();
        self
    }

    pub fn reduce(mut self, val: bool) -> Self {
        self.config.graph.reduce = val;
        self
    }

    pub fn resolve_critical(mut self, val: bool) -> Self {
        self.config.graph.resolve_critical = val;
        self
    }

    /// The unvalidated description, for tests that expect validation errors.
    pub fn raw(self) -> RawGraphConfig {
        self.config
    }

    pub fn build(self) -> GraphConfig {
        GraphConfig::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for GraphConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `NodeConfig`.
pub struct NodeConfigBuilder {
    node: NodeConfig,
}

impl NodeConfigBuilder {
    pub fn new() -> Self {
        Self {
            node: NodeConfig::default(),
        }
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.node.after.push(dep.to_string());
        self
    }

    pub fn critical(mut self) -> Self {
        self.node.critical = true;
        self
    }

    pub fn passthrough(mut self) -> Self {
        self.node.passthrough = true;
        self
    }

    pub fn compute_time(mut self, millis: f64) -> Self {
        self.node.compute_time = Some(millis);
        self
    }

    pub fn build(self) -> NodeConfig {
        self.node
    }
}

impl Default for NodeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `source -> n[0] -> ... -> n[len-1] -> sink`, with functional nodes.
pub fn chain_graph(names: &[&str]) -> (TaskGraph, Vec<TaskNode>) {
    let mut graph = TaskGraph::new();
    let nodes: Vec<TaskNode> = names
        .iter()
        .map(|name| graph.add_function(*name, || {}))
        .collect();

    let mut path = vec![graph.source().clone()];
    path.extend(nodes.iter().cloned());
    path.push(graph.sink().clone());
    graph.add_chain(&path).expect("chain members were just added");
    (graph, nodes)
}

/// `source -> {left, right} -> join -> sink`. The arms are pass-through
/// nodes unless `functional_arms` is set.
pub fn diamond_graph(functional_arms: bool) -> (TaskGraph, [TaskNode; 3]) {
    let mut graph = TaskGraph::new();
    let (source, sink) = (graph.source().clone(), graph.sink().clone());
    let arm = |name: &str| {
        if functional_arms {
            TaskNode::from_fn(name, || {})
        } else {
            TaskNode::new(name)
        }
    };
    let left = arm("left");
    let right = arm("right");
    let join = TaskNode::from_fn("join", || {});
    graph.add_nodes([left.clone(), right.clone(), join.clone()]);
    graph
        .add_edges([
            (&source, &left),
            (&source, &right),
            (&left, &join),
            (&right, &join),
            (&join, &sink),
        ])
        .expect("diamond members were just added");
    (graph, [left, right, join])
}
