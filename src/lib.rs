// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod report;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::exec::{Executor, SequentialExecutor};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - loading and validating the graph description
/// - building and simplifying the task graph
/// - optional timed execution to measure compute times
/// - printing the plan report
pub fn run(args: CliArgs) -> Result<()> {
    let config_path = &args.config;
    let mut cfg = load_and_validate(config_path)
        .with_context(|| format!("loading graph description {}", config_path.display()))?;

    cfg.graph.reduce |= args.reduce;
    cfg.graph.resolve_critical |= args.resolve_critical;

    let graph = cfg.build_graph()?;

    if args.unique_names {
        let renamed = graph.unique_node_names(true);
        debug!(renamed = renamed.len(), "applied unique node names");
    }

    if args.frames > 0 {
        // Nodes are shared between clones, so measured times show up in `graph`.
        let mut executor = SequentialExecutor::new().with_timing(true);
        executor.init(graph.clone())?;
        for _ in 0..args.frames {
            executor.execute()?;
        }
        info!(frames = executor.frames(), "timed frames executed");
    }

    print!("{}", report::render_plan(&graph));
    Ok(())
}
