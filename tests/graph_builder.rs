mod common;
use crate::common::{children, init_tracing, parents, strings};

use tasklineage::dag::LineageGraph;
use tasklineage::tasks::{TaskRecord, TaskSet};
use tasklineage_test_utils::builders::{TaskRecordBuilder, TaskSetBuilder};
use tasklineage_test_utils::capture_warnings;

#[test]
fn chain_builds_nodes_and_edges_in_dependency_direction() {
    init_tracing();

    let graph = TaskSetBuilder::new().chain(&["A", "B", "C"]).graph();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);

    let ab = graph.edge_between("A", "B").expect("edge A->B");
    let bc = graph.edge_between("B", "C").expect("edge B->C");
    assert_eq!(ab.id, "edge0");
    assert_eq!(bc.id, "edge1");
    assert!(graph.edge_between("B", "A").is_none());

    assert_eq!(children(&graph, "A"), strings(&["B"]));
    assert_eq!(parents(&graph, "C"), strings(&["B"]));
    assert!(parents(&graph, "A").is_empty());
    assert!(children(&graph, "C").is_empty());

    let b = graph.node_by_id("B").unwrap();
    assert_eq!(b.incoming_edges, vec![0]);
    assert_eq!(b.outgoing_edges, vec![1]);
}

#[test]
fn self_dependency_creates_no_edge() {
    init_tracing();

    let graph = TaskSetBuilder::new().task("M", &["M"]).graph();

    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
    assert!(children(&graph, "M").is_empty());
    assert!(parents(&graph, "M").is_empty());
}

#[test]
fn dangling_dependency_is_skipped() {
    init_tracing();

    let graph = TaskSetBuilder::new()
        .task("A", &[])
        .task("N", &["ghost", "A"])
        .graph();

    assert_eq!(graph.node_count(), 2);
    assert!(graph.node_by_id("ghost").is_none());
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(parents(&graph, "N"), strings(&["A"]));
}

#[test]
fn duplicate_dependencies_produce_one_edge() {
    init_tracing();

    let graph = TaskSetBuilder::new()
        .task("A", &[])
        .task("B", &["A", "A", "A"])
        .graph();

    assert_eq!(graph.edge_count(), 1);
    assert_eq!(children(&graph, "A"), strings(&["B"]));
}

#[test]
fn task_with_empty_identifier_is_excluded() {
    init_tracing();

    let mut tasks = TaskSet::new();
    tasks.insert(String::new(), TaskRecord::new("", ["A"]));
    tasks.insert("A".to_string(), TaskRecord::new("A", Vec::<String>::new()));
    tasks.insert("B".to_string(), TaskRecord::new("B", [""]));

    let graph = LineageGraph::from_tasks(&tasks);

    assert_eq!(graph.node_count(), 2);
    assert!(graph.index_of("").is_none());
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn skipped_tasks_and_dependencies_are_warned_about() {
    let mut tasks = TaskSetBuilder::new()
        .task("A", &[])
        .task("M", &["M"])
        .task("N", &["ghost", "A"])
        .build();
    tasks.insert(String::new(), TaskRecord::new("", ["A"]));

    let (graph, logs) = capture_warnings(|| LineageGraph::from_tasks(&tasks));

    assert_eq!(graph.edge_count(), 1);
    assert!(logs.contains("task without an identifier, excluding it from the graph"));
    assert!(logs.contains("task depends on itself, skipping dependency task=M"));
    assert!(logs.contains("dependency does not match any task, skipping"));
    assert!(logs.contains("dependency=ghost"));
    assert_eq!(logs.lines().filter(|l| l.contains("WARN")).count(), 3);
}

#[test]
fn clean_task_set_logs_no_warnings() {
    let tasks = TaskSetBuilder::new().chain(&["A", "B", "C"]).build();

    let (graph, logs) = capture_warnings(|| LineageGraph::from_tasks(&tasks));

    assert_eq!(graph.edge_count(), 2);
    assert!(logs.is_empty(), "unexpected warnings: {logs}");
}

#[test]
fn empty_task_set_gives_empty_graph() {
    init_tracing();

    let graph = LineageGraph::from_tasks(&TaskSet::new());

    assert!(graph.is_empty());
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.find_cycle().is_none());
}

#[test]
fn edge_ids_follow_sorted_tasks_and_declaration_order() {
    init_tracing();

    let build = || {
        TaskSetBuilder::new()
            .task("C", &["B", "A", "B"])
            .task("A", &[])
            .task("B", &["A"])
            .graph()
    };
    let graph = build();

    let edges: Vec<(String, String, String)> = graph
        .edges()
        .iter()
        .map(|e| {
            (
                e.id.clone(),
                graph.node(e.source).id.clone(),
                graph.node(e.target).id.clone(),
            )
        })
        .collect();
    assert_eq!(
        edges,
        vec![
            ("edge0".into(), "A".into(), "B".into()),
            ("edge1".into(), "B".into(), "C".into()),
            ("edge2".into(), "A".into(), "C".into()),
        ]
    );

    let again = build();
    assert_eq!(graph.edges(), again.edges());
    let ids: Vec<&str> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
}

#[test]
fn label_and_level_are_carried_for_rendering() {
    init_tracing();

    let graph = TaskSetBuilder::new()
        .record(
            TaskRecordBuilder::new("load")
                .label("Load orders")
                .level("raw")
                .build(),
        )
        .task("plain", &["load"])
        .graph();

    let load = graph.node_by_id("load").unwrap();
    assert_eq!(load.label, "Load orders");
    assert_eq!(load.level.as_deref(), Some("raw"));

    let plain = graph.node_by_id("plain").unwrap();
    assert_eq!(plain.label, "plain");
    assert_eq!(plain.level, None);
}

#[test]
fn find_cycle_reports_a_node_on_the_cycle() {
    init_tracing();

    let graph = TaskSetBuilder::new()
        .task("A", &["C"])
        .task("B", &["A"])
        .task("C", &["B"])
        .task("D", &[])
        .graph();

    let node = graph.find_cycle().expect("cycle");
    assert!(["A", "B", "C"].contains(&node));

    let dag = TaskSetBuilder::new().chain(&["A", "B"]).graph();
    assert!(dag.find_cycle().is_none());
}
