// src/dag/reduce.rs

//! Graph simplification passes.
//!
//! Every pass works on a copy and leaves `self` untouched. The copies share
//! their nodes with the input graph.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::dag::graph::TaskGraph;
use crate::dag::node::TaskNode;
use crate::errors::{FramedagError, Result};

impl TaskGraph {
    /// Remove every edge that is implied by another path.
    ///
    /// Fails with [`FramedagError::GraphCycle`] on a cyclic graph. The result
    /// has the minimal edge set with exactly the same reachability.
    pub fn transitive_reduce(&self) -> Result<TaskGraph> {
        if self.is_cyclic() {
            warn!("refusing to transitively reduce a cyclic graph");
            return Err(FramedagError::GraphCycle(
                "transitive reduction requires an acyclic graph".to_string(),
            ));
        }

        let mut result = self.clone();
        let edges: Vec<(TaskNode, TaskNode)> = self
            .edges()
            .map(|(from, to)| (from.clone(), to.clone()))
            .collect();

        let mut removed = 0usize;
        for (from, to) in &edges {
            result.remove_edge(from, to);
            if result.is_reachable(from, to) {
                removed += 1;
            } else {
                result.link(from, to);
            }
        }

        debug!(edges = edges.len(), removed, "transitive reduction complete");
        Ok(result)
    }

    /// Splice out every pass-through node (no action) that has exactly one
    /// predecessor and one successor. The sentinels are never removed.
    ///
    /// Only fan-in/fan-out and functionality are inspected: the two arms of a
    /// diamond made of pass-through nodes both collapse into a single edge.
    pub fn remove_redundant_nodes(&self) -> TaskGraph {
        let mut result = self.clone();

        let candidates: Vec<TaskNode> = self
            .nodes()
            .iter()
            .filter(|node| *node != self.source() && *node != self.sink())
            .cloned()
            .collect();

        let mut removed = 0usize;
        for node in &candidates {
            if node.is_functional() {
                continue;
            }
            if result.predecessors(node).len() == 1 && result.successors(node).len() == 1 {
                result.remove_node_and_redirect(node);
                removed += 1;
            }
        }

        debug!(removed, "redundant node removal complete");
        result
    }

    /// Transitive reduction followed by redundant-node removal.
    pub fn reduce(&self) -> Result<TaskGraph> {
        let reduced = self.transitive_reduce()?.remove_redundant_nodes();
        info!(
            nodes_before = self.node_count(),
            nodes_after = reduced.node_count(),
            edges_before = self.edge_count(),
            edges_after = reduced.edge_count(),
            "graph reduced"
        );
        Ok(reduced)
    }

    /// Keep only nodes that are an endpoint of at least one edge.
    ///
    /// Unconnected sentinels are dropped from the node list as well; the
    /// `source()`/`sink()` handles stay valid and [`TaskGraph::clear`]
    /// restores them.
    pub fn remove_unused_nodes(&self) -> TaskGraph {
        let mut result = self.clone();
        let used: HashSet<TaskNode> = self
            .edges()
            .flat_map(|(from, to)| [from.clone(), to.clone()])
            .collect();

        result.retain_nodes(|node| used.contains(node));
        debug!(
            kept = result.node_count(),
            dropped = self.node_count() - result.node_count(),
            "unused node removal complete"
        );
        result
    }
}
