// src/dag/compose.rs

//! Graph composition: splicing nodes into an edge set and nesting one graph
//! inside another.

use tracing::{debug, error};

use crate::dag::graph::TaskGraph;
use crate::dag::node::TaskNode;
use crate::errors::{FramedagError, Result};

impl TaskGraph {
    /// Place `new_node` directly after `ref_node`: it takes over all of
    /// `ref_node`'s outgoing edges and becomes its only successor.
    pub fn insert_after(&mut self, ref_node: &TaskNode, new_node: TaskNode) -> Result<()> {
        self.ensure_member(ref_node, "reference")?;
        self.ensure_fresh(&new_node)?;
        self.add_node(new_node.clone());

        let outputs = self.successors(ref_node).clone();
        for output in &outputs {
            self.remove_edge(ref_node, output);
        }
        self.link(ref_node, &new_node);
        for output in &outputs {
            self.link(&new_node, output);
        }

        debug!(reference = %ref_node, node = %new_node, rerouted = outputs.len(), "inserted node after");
        Ok(())
    }

    /// Place `new_node` directly before `ref_node`: it takes over all of
    /// `ref_node`'s incoming edges and becomes its only predecessor.
    pub fn insert_before(&mut self, ref_node: &TaskNode, new_node: TaskNode) -> Result<()> {
        self.ensure_member(ref_node, "reference")?;
        self.ensure_fresh(&new_node)?;
        self.add_node(new_node.clone());

        let inputs = self.predecessors(ref_node).clone();
        for input in &inputs {
            self.remove_edge(input, ref_node);
        }
        for input in &inputs {
            self.link(input, &new_node);
        }
        self.link(&new_node, ref_node);

        debug!(reference = %ref_node, node = %new_node, rerouted = inputs.len(), "inserted node before");
        Ok(())
    }

    /// Copy every node and edge of `subgraph` into this graph, then wire
    /// `entry -> subgraph.source` and `subgraph.sink -> exit`.
    ///
    /// Node identity is preserved, so nodes shared between the two graphs
    /// are not duplicated. `entry` and `exit` must already be members.
    pub fn nest_graph(&mut self, subgraph: &TaskGraph, entry: &TaskNode, exit: &TaskNode) -> Result<()> {
        self.ensure_member(entry, "entry")?;
        self.ensure_member(exit, "exit")?;

        self.add_nodes(subgraph.nodes().iter().cloned());
        for (from, to) in subgraph.edges() {
            self.link(from, to);
        }
        // The sentinels may have been pruned from the subgraph's node list.
        self.add_node(subgraph.source().clone());
        self.add_node(subgraph.sink().clone());
        self.link(entry, subgraph.source());
        self.link(subgraph.sink(), exit);

        debug!(
            entry = %entry,
            exit = %exit,
            nodes = subgraph.node_count(),
            edges = subgraph.edge_count(),
            "nested subgraph"
        );
        Ok(())
    }

    fn ensure_fresh(&self, node: &TaskNode) -> Result<()> {
        if !self.contains_node(node) {
            return Ok(());
        }
        error!(node = %node, "new node already exists in this graph");
        Err(FramedagError::NodeAlreadyInGraph(node.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected(graph: &TaskGraph, a: &TaskNode, b: &TaskNode) -> bool {
        graph.contains_edge(a, b) && graph.predecessors(b).contains(a)
    }

    #[test]
    fn insert_before_takes_over_inputs() {
        let mut graph = TaskGraph::new();
        let source = graph.source().clone();
        let sink = graph.sink().clone();
        let n1 = TaskNode::new("n1");
        let n2 = TaskNode::new("n2");
        let n3 = TaskNode::new("n3");
        graph.add_nodes([n1.clone(), n2.clone()]);
        graph
            .add_edges([(&source, &n1), (&n2, &n1), (&n1, &sink)])
            .unwrap();

        graph.insert_before(&n1, n3.clone()).unwrap();

        assert_eq!(graph.node_count(), 5);
        assert!(connected(&graph, &source, &n3));
        assert!(connected(&graph, &n2, &n3));
        assert!(connected(&graph, &n3, &n1));
        assert!(connected(&graph, &n1, &sink));
        assert_eq!(graph.predecessors(&n1).len(), 1);
    }

    #[test]
    fn insert_after_takes_over_outputs() {
        let mut graph = TaskGraph::new();
        let source = graph.source().clone();
        let sink = graph.sink().clone();
        let n1 = TaskNode::new("n1");
        let n2 = TaskNode::new("n2");
        let n3 = TaskNode::new("n3");
        graph.add_nodes([n1.clone(), n2.clone()]);
        graph
            .add_edges([(&source, &n1), (&n1, &n2), (&n1, &sink)])
            .unwrap();

        graph.insert_after(&n1, n3.clone()).unwrap();

        assert!(connected(&graph, &source, &n1));
        assert!(connected(&graph, &n1, &n3));
        assert!(connected(&graph, &n3, &n2));
        assert!(connected(&graph, &n3, &sink));
        assert_eq!(graph.successors(&n1).len(), 1);
    }

    #[test]
    fn inserting_an_existing_member_fails() {
        let mut graph = TaskGraph::new();
        let source = graph.source().clone();
        let sink = graph.sink().clone();
        graph.add_edge(&source, &sink).unwrap();

        let err = graph.insert_after(&source, sink.clone()).unwrap_err();
        assert!(matches!(err, FramedagError::NodeAlreadyInGraph(_)));
        assert!(graph.insert_before(&sink, source.clone()).is_err());
        assert!(graph.insert_after(&TaskNode::new("ghost"), TaskNode::new("x")).is_err());
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn nest_graph_splices_subgraph_between_entry_and_exit() {
        let mut sub = TaskGraph::with_names("SubSource", "SubSink");
        let inner1 = TaskNode::new("inner1");
        let inner2 = TaskNode::new("inner2");
        let (sub_source, sub_sink) = (sub.source().clone(), sub.sink().clone());
        sub.add_nodes([inner1.clone(), inner2.clone()]);
        sub.add_edges([
            (&sub_source, &inner1),
            (&sub_source, &inner2),
            (&inner1, &sub_sink),
            (&inner2, &sub_sink),
        ])
        .unwrap();

        let mut graph = TaskGraph::new();
        let source = graph.source().clone();
        let sink = graph.sink().clone();
        let n1 = TaskNode::new("n1");
        let n2 = TaskNode::new("n2");
        graph.add_nodes([n1.clone(), n2.clone()]);
        graph
            .add_edges([(&source, &n1), (&source, &n2), (&n1, &sink), (&n2, &sink)])
            .unwrap();

        graph.nest_graph(&sub, &n1, &n2).unwrap();

        assert_eq!(graph.node_count(), 8);
        assert!(connected(&graph, &source, &n1));
        assert!(connected(&graph, &n1, &sub_source));
        assert!(connected(&graph, &sub_source, &inner1));
        assert!(connected(&graph, &sub_source, &inner2));
        assert!(connected(&graph, &inner1, &sub_sink));
        assert!(connected(&graph, &inner2, &sub_sink));
        assert!(connected(&graph, &sub_sink, &n2));
        assert!(connected(&graph, &n2, &sink));
    }

    #[test]
    fn nest_graph_requires_member_entry() {
        let sub = TaskGraph::new();
        let mut graph = TaskGraph::new();
        let sink = graph.sink().clone();
        let err = graph.nest_graph(&sub, &TaskNode::new("outside"), &sink).unwrap_err();
        assert!(matches!(err, FramedagError::NodeNotInGraph(_)));
        assert_eq!(graph.node_count(), 2);
    }
}
