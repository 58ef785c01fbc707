// src/exec/sequential.rs

use std::time::Instant;

use tracing::{debug, error, info};

use crate::dag::{TaskGraph, TaskNode};
use crate::errors::{FramedagError, Result};
use crate::exec::backend::Executor;

/// Single-threaded executor: runs nodes one after another in topological
/// order.
///
/// With timing enabled, every node's wall-clock duration (milliseconds) is
/// written into its `compute_time` after each frame step.
#[derive(Debug, Default)]
pub struct SequentialExecutor {
    graph: Option<TaskGraph>,
    order: Vec<TaskNode>,
    timing_enabled: bool,
    frames: u64,
}

impl SequentialExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timing(mut self, enabled: bool) -> Self {
        self.timing_enabled = enabled;
        self
    }

    pub fn timing_enabled(&self) -> bool {
        self.timing_enabled
    }

    /// The graph being executed, if initialised.
    pub fn graph(&self) -> Option<&TaskGraph> {
        self.graph.as_ref()
    }

    /// Execution order computed at `init`.
    pub fn order(&self) -> &[TaskNode] {
        &self.order
    }

    /// Number of frames executed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Executor for SequentialExecutor {
    fn init(&mut self, graph: TaskGraph) -> Result<()> {
        if graph.is_cyclic() {
            error!("task graph is cyclic; refusing to execute it");
            return Err(FramedagError::GraphCycle(
                "executor cannot run a cyclic task graph".to_string(),
            ));
        }

        self.order = graph.topological_sort();
        if self.order.len() < graph.node_count() {
            debug!(
                skipped = graph.node_count() - self.order.len(),
                "some nodes are not reachable from the source and will not run"
            );
        }
        info!(nodes = self.order.len(), "sequential executor initialised");
        self.graph = Some(graph);
        self.frames = 0;
        Ok(())
    }

    fn execute(&mut self) -> Result<()> {
        if self.graph.is_none() {
            return Err(anyhow::anyhow!("executor used before init").into());
        }

        for node in &self.order {
            if self.timing_enabled {
                let started = Instant::now();
                node.execute();
                node.set_compute_time(started.elapsed().as_secs_f64() * 1000.0);
            } else {
                node.execute();
            }
        }

        self.frames += 1;
        debug!(frame = self.frames, "frame executed");
        Ok(())
    }
}
