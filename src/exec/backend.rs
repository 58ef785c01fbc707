// src/exec/backend.rs

//! Pluggable executor abstraction.
//!
//! Contract between a graph and whatever runs it:
//! - a node may only start once every predecessor has completed;
//! - nodes with no path between them may run concurrently;
//! - actions are synchronous and run to completion.
//!
//! Executors may write each node's measured duration into
//! [`TaskNode::set_compute_time`](crate::dag::TaskNode::set_compute_time);
//! the profiling algorithms read it back.

use crate::dag::TaskGraph;
use crate::errors::Result;

/// Trait abstracting how a task graph is executed, one frame at a time.
pub trait Executor {
    /// Take ownership of `graph` and prepare to run it.
    ///
    /// A cyclic graph is a configuration error and must be refused here,
    /// before any frame runs.
    fn init(&mut self, graph: TaskGraph) -> Result<()>;

    /// Run every node of the graph once.
    fn execute(&mut self) -> Result<()>;
}
