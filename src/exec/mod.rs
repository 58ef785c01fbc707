// src/exec/mod.rs

//! Execution layer.
//!
//! The graph itself never runs anything; an executor walks a graph and
//! dispatches node actions while honouring every precedence edge.
//!
//! - [`backend`] provides the [`Executor`] trait that executors implement.
//! - [`sequential`] provides [`SequentialExecutor`], a single-threaded walk of
//!   the topological order that also measures node durations.

pub mod backend;
pub mod sequential;

pub use backend::Executor;
pub use sequential::SequentialExecutor;
