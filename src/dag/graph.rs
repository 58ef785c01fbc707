// src/dag/graph.rs

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use tracing::{debug, error, warn};

use crate::dag::node::TaskNode;
use crate::errors::{FramedagError, Result};

/// Set of nodes, ordered by node identity (creation order).
pub type NodeSet = BTreeSet<TaskNode>;

/// Node -> set of neighbouring nodes.
pub type AdjacencyList = BTreeMap<TaskNode, NodeSet>;

static EMPTY_SET: NodeSet = NodeSet::new();

/// A mutable directed graph of [`TaskNode`]s with two permanent sentinels.
///
/// Edges are stored twice: `adj_list` maps a node to its successors and
/// `inv_adj_list` maps a node to its predecessors. Both maps are kept in
/// sync by every mutation and stay sparse (nodes without edges have no
/// entry).
///
/// Cloning a graph copies its structure but shares the nodes themselves.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    nodes: Vec<TaskNode>,
    adj_list: AdjacencyList,
    inv_adj_list: AdjacencyList,
    source: TaskNode,
    sink: TaskNode,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::with_names("Source", "Sink")
    }

    /// Create a graph whose sentinels carry the given names.
    pub fn with_names(source_name: impl Into<String>, sink_name: impl Into<String>) -> Self {
        let source = TaskNode::new(source_name);
        let sink = TaskNode::new(sink_name);
        Self {
            nodes: vec![source.clone(), sink.clone()],
            adj_list: AdjacencyList::new(),
            inv_adj_list: AdjacencyList::new(),
            source,
            sink,
        }
    }

    pub fn source(&self) -> &TaskNode {
        &self.source
    }

    pub fn sink(&self) -> &TaskNode {
        &self.sink
    }

    /// Member nodes in insertion order.
    pub fn nodes(&self) -> &[TaskNode] {
        &self.nodes
    }

    /// Outgoing edges of every node.
    pub fn adj_list(&self) -> &AdjacencyList {
        &self.adj_list
    }

    /// Incoming edges of every node.
    pub fn inv_adj_list(&self) -> &AdjacencyList {
        &self.inv_adj_list
    }

    pub fn successors(&self, node: &TaskNode) -> &NodeSet {
        self.adj_list.get(node).unwrap_or(&EMPTY_SET)
    }

    pub fn predecessors(&self, node: &TaskNode) -> &NodeSet {
        self.inv_adj_list.get(node).unwrap_or(&EMPTY_SET)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adj_list.values().map(|outputs| outputs.len()).sum()
    }

    /// All edges as `(from, to)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&TaskNode, &TaskNode)> {
        self.adj_list
            .iter()
            .flat_map(|(from, outputs)| outputs.iter().map(move |to| (from, to)))
    }

    /// Linear search by name; the first match in insertion order wins.
    pub fn find_node(&self, name: &str) -> Option<&TaskNode> {
        self.nodes.iter().find(|node| node.name() == name)
    }

    pub fn contains_node(&self, node: &TaskNode) -> bool {
        self.nodes.contains(node)
    }

    pub fn contains_edge(&self, from: &TaskNode, to: &TaskNode) -> bool {
        self.adj_list
            .get(from)
            .is_some_and(|outputs| outputs.contains(to))
    }

    /// Add a node. Returns `false` if it was already a member.
    pub fn add_node(&mut self, node: TaskNode) -> bool {
        if self.contains_node(&node) {
            debug!(node = %node, "node already in graph; not adding");
            return false;
        }
        self.nodes.push(node);
        true
    }

    pub fn add_nodes(&mut self, nodes: impl IntoIterator<Item = TaskNode>) {
        for node in nodes {
            self.add_node(node);
        }
    }

    /// Create a functional node for `action`, add it and return its handle.
    pub fn add_function<F>(&mut self, name: impl Into<String>, action: F) -> TaskNode
    where
        F: Fn() + Send + Sync + 'static,
    {
        let node = TaskNode::from_fn(name, action);
        self.nodes.push(node.clone());
        node
    }

    /// Remove a node and every edge touching it.
    ///
    /// Returns `false` (and logs) if the node is not a member.
    pub fn remove_node(&mut self, node: &TaskNode) -> bool {
        if !self.contains_node(node) {
            warn!(node = %node, "tried to remove node from graph but it doesn't contain the node");
            return false;
        }

        self.unlink(node);
        self.nodes.retain(|n| n != node);
        debug!(node = %node, "removed node");
        true
    }

    /// Remove a node and reconnect each of its former predecessors to each
    /// of its former successors.
    pub fn remove_node_and_redirect(&mut self, node: &TaskNode) -> bool {
        if !self.contains_node(node) {
            warn!(node = %node, "tried to remove node from graph but it doesn't contain the node");
            return false;
        }

        let (inputs, outputs) = self.unlink(node);
        for input in &inputs {
            for output in &outputs {
                self.link(input, output);
            }
        }
        self.nodes.retain(|n| n != node);
        debug!(
            node = %node,
            inputs = inputs.len(),
            outputs = outputs.len(),
            "removed node and redirected its edges"
        );
        true
    }

    /// Add the directed edge `from -> to`. Both nodes must be members.
    ///
    /// A missing endpoint is a construction bug: it is logged at error level
    /// and returned as [`FramedagError::NodeNotInGraph`] without touching the
    /// graph. Adding an existing edge is a no-op.
    pub fn add_edge(&mut self, from: &TaskNode, to: &TaskNode) -> Result<()> {
        self.ensure_member(from, "source")?;
        self.ensure_member(to, "destination")?;
        self.link(from, to);
        Ok(())
    }

    pub fn add_edges<'a>(
        &mut self,
        edges: impl IntoIterator<Item = (&'a TaskNode, &'a TaskNode)>,
    ) -> Result<()> {
        for (from, to) in edges {
            self.add_edge(from, to)?;
        }
        Ok(())
    }

    /// Connect `nodes[0] -> nodes[1] -> ... -> nodes[n-1]`.
    pub fn add_chain(&mut self, nodes: &[TaskNode]) -> Result<()> {
        if nodes.len() < 2 {
            warn!("add_chain expects at least two nodes; edges will not be added");
            return Ok(());
        }
        for pair in nodes.windows(2) {
            self.add_edge(&pair[0], &pair[1])?;
        }
        Ok(())
    }

    /// Remove the edge `from -> to` if present. Empty adjacency entries are
    /// dropped.
    pub fn remove_edge(&mut self, from: &TaskNode, to: &TaskNode) {
        let Some(outputs) = self.adj_list.get_mut(from) else {
            return;
        };
        if !outputs.remove(to) {
            return;
        }
        if outputs.is_empty() {
            self.adj_list.remove(from);
        }
        if let Some(inputs) = self.inv_adj_list.get_mut(to) {
            inputs.remove(from);
            if inputs.is_empty() {
                self.inv_adj_list.remove(to);
            }
        }
    }

    /// Whether `to` can be reached from `from` by following edges.
    /// A node always reaches itself.
    pub fn is_reachable(&self, from: &TaskNode, to: &TaskNode) -> bool {
        let mut visited: HashSet<&TaskNode> = HashSet::new();
        let mut queue: VecDeque<&TaskNode> = VecDeque::from([from]);

        while let Some(current) = queue.pop_front() {
            if current == to {
                return true;
            }
            for child in self.successors(current) {
                if visited.insert(child) {
                    queue.push_back(child);
                }
            }
        }
        false
    }

    /// Reset to the two sentinels with no edges.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.clear_edges();
        self.nodes.push(self.source.clone());
        self.nodes.push(self.sink.clone());
    }

    pub fn clear_edges(&mut self) {
        self.adj_list.clear();
        self.inv_adj_list.clear();
    }

    /// Keep only the member nodes matching `keep`. Edges are left untouched;
    /// callers only drop nodes that no edge references.
    pub(crate) fn retain_nodes(&mut self, keep: impl FnMut(&TaskNode) -> bool) {
        self.nodes.retain(keep);
    }

    pub(crate) fn ensure_member(&self, node: &TaskNode, role: &str) -> Result<()> {
        if self.contains_node(node) {
            return Ok(());
        }
        error!(node = %node, role, "node does not exist in graph");
        Err(FramedagError::NodeNotInGraph(node.name()))
    }

    /// Insert the edge into both maps, no membership check.
    pub(crate) fn link(&mut self, from: &TaskNode, to: &TaskNode) {
        self.adj_list
            .entry(from.clone())
            .or_default()
            .insert(to.clone());
        self.inv_adj_list
            .entry(to.clone())
            .or_default()
            .insert(from.clone());
    }

    /// Remove every edge touching `node`; returns its former
    /// `(predecessors, successors)`.
    pub(crate) fn unlink(&mut self, node: &TaskNode) -> (NodeSet, NodeSet) {
        let inputs = self.predecessors(node).clone();
        let outputs = self.successors(node).clone();
        for input in &inputs {
            self.remove_edge(input, node);
        }
        for output in &outputs {
            self.remove_edge(node, output);
        }
        (inputs, outputs)
    }
}

impl Default for TaskGraph {
    fn default() -> Self {
        Self::new()
    }
}
