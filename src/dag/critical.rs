// src/dag/critical.rs

//! Mutual exclusion between critical nodes, encoded as precedence edges.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::dag::graph::TaskGraph;
use crate::dag::node::TaskNode;

/// For each critical node, the other critical nodes reachable from it.
type CriticalAdjacency = HashMap<TaskNode, HashSet<TaskNode>>;

impl TaskGraph {
    /// Order every pair of critical nodes.
    ///
    /// For each pair with no path in either direction an edge is added from
    /// the shallower node to the deeper one (equal depths: from the node that
    /// comes first in the node list). Depths and critical reachability are
    /// recomputed after every insertion. Afterwards every two critical nodes
    /// are connected by a directed path, so no executor honouring the edges
    /// can run them at the same time.
    pub fn resolve_critical_nodes(&self) -> TaskGraph {
        let mut result = self.clone();
        let critical: Vec<TaskNode> = self
            .nodes()
            .iter()
            .filter(|node| node.is_critical())
            .cloned()
            .collect();

        let mut added = 0usize;
        loop {
            let depths = result.node_depths();
            let reach = result.critical_adjacency(&critical);
            let Some((first, second)) = first_unordered_pair(&critical, &reach) else {
                break;
            };

            let first_depth = depths.get(first).copied().unwrap_or(0);
            let second_depth = depths.get(second).copied().unwrap_or(0);
            let (from, to) = if first_depth > second_depth {
                (second, first)
            } else {
                (first, second)
            };

            debug!(
                from = %from,
                to = %to,
                from_depth = depths.get(from).copied().unwrap_or(0),
                to_depth = depths.get(to).copied().unwrap_or(0),
                "ordering critical nodes"
            );
            result.link(from, to);
            added += 1;
        }

        info!(critical = critical.len(), added, "critical nodes resolved");
        result
    }

    /// Length of the longest path from the source to every node the source
    /// reaches, counting only paths that start at the source.
    pub fn node_depths(&self) -> HashMap<TaskNode, usize> {
        let mut depths: HashMap<TaskNode, usize> = HashMap::new();
        depths.insert(self.source().clone(), 0);

        for node in self.reachable_order() {
            let Some(&depth) = depths.get(&node) else {
                continue;
            };
            for child in self.successors(&node) {
                let entry = depths.entry(child.clone()).or_insert(0);
                *entry = (*entry).max(depth + 1);
            }
        }
        depths
    }

    /// DFS from each critical node, recording hits on other critical nodes
    /// while traversing through non-critical ones.
    fn critical_adjacency(&self, critical: &[TaskNode]) -> CriticalAdjacency {
        let mut adjacency = CriticalAdjacency::new();

        for start in critical {
            let mut hits = HashSet::new();
            let mut visited: HashSet<&TaskNode> = HashSet::new();
            let mut stack: Vec<&TaskNode> = vec![start];

            while let Some(current) = stack.pop() {
                if current != start && current.is_critical() {
                    hits.insert(current.clone());
                }
                for child in self.successors(current) {
                    if visited.insert(child) {
                        stack.push(child);
                    }
                }
            }
            adjacency.insert(start.clone(), hits);
        }
        adjacency
    }
}

fn first_unordered_pair<'a>(
    critical: &'a [TaskNode],
    reach: &CriticalAdjacency,
) -> Option<(&'a TaskNode, &'a TaskNode)> {
    let reaches = |a: &TaskNode, b: &TaskNode| reach.get(a).is_some_and(|hits| hits.contains(b));

    critical.iter().enumerate().find_map(|(i, a)| {
        critical[i + 1..]
            .iter()
            .find(|&b| !reaches(a, b) && !reaches(b, a))
            .map(|b| (a, b))
    })
}
