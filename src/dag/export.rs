// src/dag/export.rs

//! Read-only `petgraph` projection of a [`TaskGraph`], for visualisation
//! writers and external analysis.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::dag::graph::TaskGraph;
use crate::dag::node::TaskNode;

/// A snapshot of a task graph as a `petgraph` digraph.
#[derive(Debug, Clone)]
pub struct GraphProjection {
    pub graph: DiGraph<TaskNode, ()>,
    pub indices: HashMap<TaskNode, NodeIndex>,
}

impl GraphProjection {
    pub fn index_of(&self, node: &TaskNode) -> Option<NodeIndex> {
        self.indices.get(node).copied()
    }
}

impl TaskGraph {
    /// Project member nodes and edges onto a `petgraph` digraph.
    ///
    /// Edge endpoints missing from the node list (possible after
    /// [`TaskGraph::remove_unused_nodes`] drops a sentinel) are added too.
    pub fn to_petgraph(&self) -> GraphProjection {
        let mut graph = DiGraph::with_capacity(self.node_count(), self.edge_count());
        let mut indices: HashMap<TaskNode, NodeIndex> = HashMap::new();

        for node in self.nodes() {
            indices.insert(node.clone(), graph.add_node(node.clone()));
        }
        for (from, to) in self.edges() {
            let a = *indices
                .entry(from.clone())
                .or_insert_with(|| graph.add_node(from.clone()));
            let b = *indices
                .entry(to.clone())
                .or_insert_with(|| graph.add_node(to.clone()));
            graph.add_edge(a, b, ());
        }

        GraphProjection { graph, indices }
    }
}
