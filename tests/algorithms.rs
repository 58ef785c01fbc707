// tests/algorithms.rs

use framedag::dag::{TaskGraph, TaskNode};
use framedag_test_utils::builders::{chain_graph, diamond_graph};
use framedag_test_utils::init_tracing;

#[test]
fn single_node_sorts_between_sentinels() {
    init_tracing();
    let (graph, nodes) = chain_graph(&["A"]);
    assert_eq!(
        graph.topological_sort(),
        vec![graph.source().clone(), nodes[0].clone(), graph.sink().clone()]
    );
}

#[test]
fn pass_through_diamond_collapses_to_one_edge() {
    init_tracing();
    let mut graph = TaskGraph::new();
    let (source, sink) = (graph.source().clone(), graph.sink().clone());
    let a = TaskNode::new("A");
    let b = TaskNode::new("B");
    graph.add_nodes([a.clone(), b.clone()]);
    graph
        .add_edges([(&source, &a), (&source, &b), (&a, &sink), (&b, &sink)])
        .unwrap();

    let reduced = graph.transitive_reduce().unwrap();
    assert_eq!(reduced.edge_count(), 4);

    let collapsed = graph.remove_redundant_nodes();
    assert_eq!(collapsed.nodes(), &[source.clone(), sink.clone()]);
    assert_eq!(collapsed.edge_count(), 1);
    assert!(collapsed.contains_edge(&source, &sink));

    // Input graph keeps its arms.
    assert!(graph.contains_node(&a) && graph.contains_node(&b));
}

#[test]
fn functional_diamond_arms_are_kept_by_reduce() {
    init_tracing();
    let (graph, [left, right, join]) = diamond_graph(true);
    let reduced = graph.reduce().unwrap();
    assert_eq!(reduced.node_count(), graph.node_count());
    assert!(reduced.contains_edge(&left, &join));
    assert!(reduced.contains_edge(&right, &join));
}

#[test]
fn reduce_removes_shortcuts_and_indirection() {
    init_tracing();
    let mut graph = TaskGraph::new();
    let (source, sink) = (graph.source().clone(), graph.sink().clone());
    let update = graph.add_function("update", || {});
    let hop = TaskNode::new("hop");
    let solve = graph.add_function("solve", || {});
    graph.add_node(hop.clone());
    graph
        .add_edges([
            (&source, &update),
            (&update, &hop),
            (&hop, &solve),
            (&solve, &sink),
            (&update, &solve),
            (&source, &sink),
        ])
        .unwrap();

    let reduced = graph.reduce().unwrap();
    assert!(!reduced.contains_node(&hop));
    assert_eq!(
        reduced.topological_sort(),
        vec![source.clone(), update.clone(), solve.clone(), sink.clone()]
    );
    assert_eq!(reduced.edge_count(), 3);
    assert!(!reduced.contains_edge(&source, &sink));
}

#[test]
fn chain_profile_matches_compute_times() {
    init_tracing();
    let (graph, nodes) = chain_graph(&["A", "B"]);
    nodes[0].set_compute_time(2.0);
    nodes[1].set_compute_time(3.0);

    let times = graph.node_start_times();
    assert_eq!(times[graph.source()], 0.0);
    assert_eq!(times[&nodes[0]], 0.0);
    assert_eq!(times[&nodes[1]], 2.0);
    assert_eq!(times[graph.sink()], 5.0);
    assert_eq!(
        graph.critical_path(),
        vec![
            graph.source().clone(),
            nodes[0].clone(),
            nodes[1].clone(),
            graph.sink().clone()
        ]
    );
}

#[test]
fn shared_nodes_see_timings_from_either_graph() {
    init_tracing();
    let (graph, nodes) = chain_graph(&["A"]);
    let copy = graph.clone();
    copy.nodes()[2].set_compute_time(7.0);
    assert_eq!(nodes[0].compute_time(), 7.0);
    assert_eq!(graph.node_start_times()[graph.sink()], 7.0);
}

#[test]
fn duplicate_names_become_unique() {
    init_tracing();
    let (graph, nodes) = chain_graph(&["step", "step", "step"]);
    let names = graph.unique_node_names(false);
    assert_eq!(names[&nodes[0]], "step0");
    assert_eq!(names[&nodes[1]], "step1");
    assert_eq!(names[&nodes[2]], "step");
    assert_eq!(nodes[0].name(), "step");

    graph.unique_node_names(true);
    assert_eq!(nodes[1].name(), "step1");
}
