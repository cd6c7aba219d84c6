mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::path::PathBuf;

use tasklineage::analyse;
use tasklineage::config::load_and_validate;
use tasklineage::dag::LineageGraph;
use tasklineage::fs::RealFileSystem;
use tasklineage::tasks::load_tasks;

type TestResult = Result<(), Box<dyn Error>>;

fn demos() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos")
}

#[test]
fn demo_tasks_build_the_expected_graph() -> TestResult {
    init_tracing();

    let cfg = load_and_validate(demos().join("Lineage.toml"))?;
    let tasks = load_tasks(&RealFileSystem, &demos().join("tasks"), &cfg)?;

    assert_eq!(tasks.len(), 6);
    assert!(!tasks.contains_key("experiment"));

    let graph = LineageGraph::from_tasks(&tasks);
    assert_eq!(graph.node_count(), 6);
    // legacy_export is dangling and the repeated raw_orders collapses.
    assert_eq!(graph.edge_count(), 6);
    assert!(graph.find_cycle().is_none());
    assert_eq!(cfg.color_for_level("raw"), "#E6A23C");

    Ok(())
}

#[test]
fn demo_reachability_counts_both_routes_to_the_dashboard() -> TestResult {
    init_tracing();

    let cfg = load_and_validate(demos().join("Lineage.toml"))?;
    let tasks = load_tasks(&RealFileSystem, &demos().join("tasks"), &cfg)?;
    let graph = LineageGraph::from_tasks(&tasks);
    let report = analyse(&graph, cfg.analysis.on_cycle)?;

    let extract = &report["extract_orders"];
    assert_eq!(extract.node_reachability["raw_orders"], 1);
    assert_eq!(extract.node_reachability["mart_revenue"], 1);
    // raw_orders -> mart_dashboard directly and via mart_revenue.
    assert_eq!(extract.node_reachability["mart_dashboard"], 2);
    assert_eq!(extract.node_reachability["extract_customers"], 0);
    assert_eq!(extract.reachable_edges.len(), 4);

    let dashboard = &report["mart_dashboard"];
    assert!(dashboard.children.is_empty());
    assert_eq!(dashboard.parents, vec!["mart_revenue", "raw_orders"]);

    Ok(())
}
