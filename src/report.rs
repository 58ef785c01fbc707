// src/report.rs

//! Plain-text plan report printed by the binary.

use std::fmt::Write;

use crate::dag::{TaskGraph, TaskNode};

/// Render nodes, edges, execution order, start times and the critical path.
pub fn render_plan(graph: &TaskGraph) -> String {
    let mut out = String::new();
    let order = graph.topological_sort();
    let start_times = graph.node_start_times();
    let critical_path = graph.critical_path();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "framedag plan");
    let _ = writeln!(out, "  source = {}", graph.source());
    let _ = writeln!(out, "  sink = {}", graph.sink());
    let _ = writeln!(out);

    let _ = writeln!(out, "nodes ({}):", graph.node_count());
    for node in graph.nodes() {
        let _ = writeln!(out, "  - {}{}", node, flags(node));
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "edges ({}):", graph.edge_count());
    for (from, to) in graph.edges() {
        let _ = writeln!(out, "  {from} -> {to}");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "execution order:");
    for (step, node) in order.iter().enumerate() {
        match start_times.get(node) {
            Some(start) => {
                let _ = writeln!(out, "  {:>3}. {} (start {:.3} ms)", step + 1, node, start);
            }
            None => {
                let _ = writeln!(out, "  {:>3}. {}", step + 1, node);
            }
        }
    }
    if order.len() < graph.node_count() {
        let _ = writeln!(
            out,
            "  ({} node(s) not reachable from {})",
            graph.node_count() - order.len(),
            graph.source()
        );
    }
    let _ = writeln!(out);

    if critical_path.is_empty() {
        let _ = writeln!(out, "critical path: unavailable");
    } else {
        let names: Vec<String> = critical_path.iter().map(TaskNode::name).collect();
        let total = start_times.get(graph.sink()).copied().unwrap_or(0.0);
        let _ = writeln!(out, "critical path ({total:.3} ms):");
        let _ = writeln!(out, "  {}", names.join(" -> "));
    }

    out
}

fn flags(node: &TaskNode) -> String {
    let mut flags = Vec::new();
    if node.is_critical() {
        flags.push("critical".to_string());
    }
    if !node.is_functional() {
        flags.push("passthrough".to_string());
    }
    if node.compute_time() > 0.0 {
        flags.push(format!("{:.3} ms", node.compute_time()));
    }
    if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lists_order_and_critical_path() {
        let mut graph = TaskGraph::new();
        let (source, sink) = (graph.source().clone(), graph.sink().clone());
        let solve = graph.add_function("solve", || {});
        solve.set_compute_time(2.5);
        solve.set_critical(true);
        graph.add_chain(&[source, solve, sink]).unwrap();

        let report = render_plan(&graph);
        assert!(report.contains("  - solve [critical, 2.500 ms]"));
        assert!(report.contains("  Source -> solve"));
        assert!(report.contains("    3. Sink (start 2.500 ms)"));
        assert!(report.contains("critical path (2.500 ms):"));
        assert!(report.contains("  Source -> solve -> Sink"));
    }

    #[test]
    fn unconnected_graph_has_no_critical_path() {
        let report = render_plan(&TaskGraph::new());
        assert!(report.contains("critical path: unavailable"));
        assert!(report.contains("(1 node(s) not reachable from Source)"));
    }
}
