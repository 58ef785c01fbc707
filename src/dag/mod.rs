// src/dag/mod.rs

//! Task dependency graph and its algorithms.
//!
//! - [`node`] holds [`TaskNode`], the shared schedulable unit.
//! - [`graph`] holds [`TaskGraph`] and its node/edge mutation primitives.
//! - [`compose`] splices nodes and whole graphs into a graph.
//! - [`sort`] provides topological ordering and cycle detection.
//! - [`reduce`] provides the simplification passes.
//! - [`critical`] serializes critical nodes with ordering edges.
//! - [`profile`] computes start times and the critical path.
//! - [`naming`] produces collision-free display names.
//! - [`export`] projects a graph onto `petgraph`.

pub mod compose;
pub mod critical;
pub mod export;
pub mod graph;
pub mod naming;
pub mod node;
pub mod profile;
pub mod reduce;
pub mod sort;

pub use export::GraphProjection;
pub use graph::{AdjacencyList, NodeSet, TaskGraph};
pub use node::{NodeId, TaskAction, TaskNode};
