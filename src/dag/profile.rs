// src/dag/profile.rs

//! Frame profiling from the measured `compute_time` of each node.

use std::collections::{HashMap, VecDeque};

use tracing::warn;

use crate::dag::graph::TaskGraph;
use crate::dag::node::TaskNode;

impl TaskGraph {
    /// Earliest start time of every node the source reaches.
    ///
    /// The source starts at `0`; a node starts once all of its predecessors
    /// have finished, i.e. at the maximum over incoming edges `(u, v)` of
    /// `start(u) + u.compute_time()`. Predecessors the source does not reach
    /// never run and are ignored.
    pub fn node_start_times(&self) -> HashMap<TaskNode, f64> {
        let mut start_times: HashMap<TaskNode, f64> = HashMap::new();
        start_times.insert(self.source().clone(), 0.0);

        for node in self.reachable_order() {
            let Some(&start) = start_times.get(&node) else {
                continue;
            };
            let finish = start + node.compute_time();
            for child in self.successors(&node) {
                let entry = start_times.entry(child.clone()).or_insert(finish);
                if finish > *entry {
                    *entry = finish;
                }
            }
        }
        start_times
    }

    /// The longest-duration chain from source to sink.
    ///
    /// Built by walking back from the sink, always to the predecessor with
    /// the latest start time (on ties the last predecessor in iteration
    /// order wins). Returns an empty path when the sink cannot be traced back
    /// to the source.
    pub fn critical_path(&self) -> Vec<TaskNode> {
        let start_times = self.node_start_times();
        let mut path: VecDeque<TaskNode> = VecDeque::new();
        let mut current = self.sink().clone();

        while &current != self.source() {
            if path.len() > self.node_count() {
                warn!("critical path backtracking looped; graph is cyclic");
                return Vec::new();
            }
            path.push_front(current.clone());

            let mut longest: Option<(&TaskNode, f64)> = None;
            for parent in self.predecessors(&current) {
                let Some(&start) = start_times.get(parent) else {
                    continue;
                };
                if longest.is_none_or(|(_, best)| start >= best) {
                    longest = Some((parent, start));
                }
            }

            match longest {
                Some((parent, _)) => current = parent.clone(),
                None => {
                    warn!(node = %current, "no path back to the source; critical path unavailable");
                    return Vec::new();
                }
            }
        }

        path.push_front(self.source().clone());
        path.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(name: &str, millis: f64) -> TaskNode {
        let node = TaskNode::from_fn(name, || {});
        node.set_compute_time(millis);
        node
    }

    #[test]
    fn chain_start_times_accumulate() {
        let mut graph = TaskGraph::new();
        let (source, sink) = (graph.source().clone(), graph.sink().clone());
        let a = timed("a", 2.0);
        let b = timed("b", 3.0);
        graph.add_nodes([a.clone(), b.clone()]);
        graph.add_chain(&[source.clone(), a.clone(), b.clone(), sink.clone()]).unwrap();

        let times = graph.node_start_times();
        assert_eq!(times[&source], 0.0);
        assert_eq!(times[&a], 0.0);
        assert_eq!(times[&b], 2.0);
        assert_eq!(times[&sink], 5.0);
        assert_eq!(graph.critical_path(), vec![source, a, b, sink]);
    }

    #[test]
    fn join_waits_for_the_slowest_branch() {
        let mut graph = TaskGraph::new();
        let (source, sink) = (graph.source().clone(), graph.sink().clone());
        let fast = timed("fast", 1.0);
        let pre = timed("pre", 1.0);
        let slow = timed("slow", 4.0);
        let join = timed("join", 0.5);
        graph.add_nodes([fast.clone(), pre.clone(), slow.clone(), join.clone()]);
        graph
            .add_edges([
                (&source, &fast),
                (&source, &pre),
                (&pre, &slow),
                (&fast, &join),
                (&slow, &join),
                (&join, &sink),
            ])
            .unwrap();

        let times = graph.node_start_times();
        assert_eq!(times[&slow], 1.0);
        assert_eq!(times[&join], 5.0);
        assert_eq!(times[&sink], 5.5);
        assert_eq!(graph.critical_path(), vec![source, pre, slow, join, sink]);
    }

    #[test]
    fn equal_start_times_pick_the_last_predecessor() {
        let mut graph = TaskGraph::new();
        let (source, sink) = (graph.source().clone(), graph.sink().clone());
        let first = timed("first", 1.0);
        let second = timed("second", 9.0);
        graph.add_nodes([first.clone(), second.clone()]);
        graph
            .add_edges([(&source, &first), (&source, &second), (&first, &sink), (&second, &sink)])
            .unwrap();

        assert_eq!(graph.node_start_times()[&sink], 9.0);
        // Both arms start at 0; selection is by start time, not finish time.
        assert_eq!(graph.critical_path(), vec![source, second, sink]);
    }

    #[test]
    fn unreached_predecessor_does_not_block_profiling() {
        let mut graph = TaskGraph::new();
        let (source, sink) = (graph.source().clone(), graph.sink().clone());
        let orphan = timed("orphan", 10.0);
        let a = timed("a", 2.0);
        let b = timed("b", 3.0);
        graph.add_nodes([orphan.clone(), a.clone(), b.clone()]);
        graph
            .add_edges([(&source, &a), (&orphan, &a), (&a, &b), (&b, &sink)])
            .unwrap();

        let times = graph.node_start_times();
        assert_eq!(times[&a], 0.0);
        assert_eq!(times[&sink], 5.0);
        assert!(!times.contains_key(&orphan));
        assert_eq!(graph.critical_path(), vec![source, a, b, sink]);
    }

    #[test]
    fn disconnected_sink_has_no_critical_path() {
        let graph = TaskGraph::new();
        assert!(graph.critical_path().is_empty());
        assert!(!graph.node_start_times().contains_key(graph.sink()));
    }
}
