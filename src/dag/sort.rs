// src/dag/sort.rs

//! Ordering and cycle queries.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::dag::graph::TaskGraph;
use crate::dag::node::TaskNode;

impl TaskGraph {
    /// Kahn's algorithm, seeded with the source only.
    ///
    /// In-degrees are taken from the inverse adjacency map, so a node is
    /// emitted once every one of its predecessors has been emitted. Nodes the
    /// source cannot reach (or that wait on such nodes) are left out: an
    /// executor only runs what the source reaches.
    pub fn topological_sort(&self) -> Vec<TaskNode> {
        let mut num_inputs: HashMap<&TaskNode, usize> = self
            .inv_adj_list()
            .iter()
            .map(|(node, inputs)| (node, inputs.len()))
            .collect();

        let mut consumed: HashSet<(&TaskNode, &TaskNode)> = HashSet::new();
        let mut emitted: HashSet<&TaskNode> = HashSet::new();
        let mut queue: VecDeque<&TaskNode> = VecDeque::from([self.source()]);
        let mut order = Vec::with_capacity(self.node_count());

        while let Some(node) = queue.pop_front() {
            if !emitted.insert(node) {
                continue;
            }
            order.push(node.clone());

            for child in self.successors(node) {
                if !consumed.insert((node, child)) {
                    continue;
                }
                let remaining = num_inputs.entry(child).or_insert(0);
                *remaining = remaining.saturating_sub(1);
                if *remaining == 0 {
                    queue.push_back(child);
                }
            }
        }

        debug!(
            sorted = order.len(),
            total = self.node_count(),
            "topological sort complete"
        );
        order
    }

    /// Topological order of the subgraph the source reaches.
    ///
    /// Only edges between reached nodes count towards in-degrees, so a
    /// predecessor the source never reaches does not hold a node back (it
    /// does in [`TaskGraph::topological_sort`]). Nodes on a cycle are never
    /// emitted.
    pub(crate) fn reachable_order(&self) -> Vec<TaskNode> {
        let mut reached: HashSet<&TaskNode> = HashSet::from([self.source()]);
        let mut stack: Vec<&TaskNode> = vec![self.source()];
        while let Some(current) = stack.pop() {
            for child in self.successors(current) {
                if reached.insert(child) {
                    stack.push(child);
                }
            }
        }

        let mut num_inputs: HashMap<&TaskNode, usize> = reached
            .iter()
            .map(|&node| {
                let inputs = self
                    .predecessors(node)
                    .iter()
                    .filter(|input| reached.contains(input))
                    .count();
                (node, inputs)
            })
            .collect();

        let mut queue: VecDeque<&TaskNode> = VecDeque::from([self.source()]);
        let mut order = Vec::with_capacity(reached.len());
        while let Some(node) = queue.pop_front() {
            order.push(node.clone());
            for child in self.successors(node) {
                let Some(remaining) = num_inputs.get_mut(child) else {
                    continue;
                };
                if *remaining == 0 {
                    continue;
                }
                *remaining -= 1;
                if *remaining == 0 {
                    queue.push_back(child);
                }
            }
        }
        order
    }

    /// Whether any node can reach itself again through its successors.
    ///
    /// Brute force: one DFS per node, looking for the start node downstream.
    /// Cheap enough for configuration-time graphs of a few hundred nodes.
    pub fn is_cyclic(&self) -> bool {
        self.nodes().iter().any(|start| self.reaches_itself(start))
    }

    fn reaches_itself(&self, start: &TaskNode) -> bool {
        let mut visited: HashSet<&TaskNode> = HashSet::new();
        let mut stack: Vec<&TaskNode> = Vec::new();

        for child in self.successors(start) {
            if visited.insert(child) {
                stack.push(child);
            }
        }

        while let Some(current) = stack.pop() {
            if current == start {
                debug!(node = %start, "cycle detected");
                return true;
            }
            for child in self.successors(current) {
                if visited.insert(child) {
                    stack.push(child);
                }
            }
        }
        false
    }
}
