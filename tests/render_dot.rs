mod common;
use crate::common::init_tracing;

use std::path::Path;

use tasklineage::config::ConfigFile;
use tasklineage::config::model::RawConfigFile;
use tasklineage::errors::LineageError;
use tasklineage::fs::mock::MockFileSystem;
use tasklineage::render::{DotOptions, GraphvizRenderer, render_dot};
use tasklineage::analyse;
use tasklineage::types::{CyclePolicy, Layout, OutputFormat, PageSize};
use tasklineage_test_utils::builders::{TaskRecordBuilder, TaskSetBuilder};

fn layered_graph() -> tasklineage::dag::LineageGraph {
    TaskSetBuilder::new()
        .record(
            TaskRecordBuilder::new("extract")
                .label("Extract \"orders\"")
                .level("source")
                .build(),
        )
        .record(
            TaskRecordBuilder::new("load")
                .label("Load orders")
                .level("raw")
                .after("extract")
                .build(),
        )
        .task("report", &["load"])
        .graph()
}

#[test]
fn dot_output_contains_clusters_nodes_and_edges() {
    init_tracing();

    let dot = render_dot(&layered_graph(), &ConfigFile::default(), &DotOptions::default());

    assert!(dot.starts_with("digraph \"RootGraph\" {"));
    assert!(dot.trim_end().ends_with('}'));
    assert!(dot.contains("subgraph \"cluster_raw\""));
    assert!(dot.contains("subgraph \"cluster_source\""));
    assert!(!dot.contains("cluster_report"));
    assert!(dot.contains("\"load\" [id=\"load\", label=\"Load orders\""));
    assert!(dot.contains("label=\"Extract \\\"orders\\\"\""));
    assert!(dot.contains("xlabel=\"raw\""));
    assert!(dot.contains("\"extract\" -> \"load\" [id=\"edge0\", tooltip=\"extract->load\"]"));
    assert!(dot.contains("\"load\" -> \"report\" [id=\"edge1\""));
    assert!(dot.contains("clusterrank=\"global\""));
    assert!(dot.contains("size=\"20,11.25\""));
    assert!(!dot.contains("bgcolor"));
}

#[test]
fn element_ids_match_report_keys_and_edge_ids() {
    init_tracing();

    let graph = layered_graph();
    let dot = render_dot(&graph, &ConfigFile::default(), &DotOptions::default());
    let report = analyse(&graph, CyclePolicy::Reject).unwrap();

    // The hover viewer looks elements up in the report by their SVG id.
    for (task, entry) in &report {
        assert!(dot.contains(&format!("\"{task}\" [id=\"{task}\"")), "node {task}");
        for edge in entry.outgoing_edges.iter().chain(&entry.reachable_edges) {
            assert!(dot.contains(&format!("[id=\"{edge}\"")), "edge {edge}");
        }
    }
    assert_eq!(dot.matches("[id=\"edge").count(), graph.edge_count());
    assert_eq!(report["extract"].reachable_edges, ["edge0", "edge1"]);
}

#[test]
fn color_group_and_size_options_change_attributes() {
    init_tracing();

    let mut raw = RawConfigFile::default();
    raw.colors.insert("default".to_string(), "#ABCDEF".to_string());
    raw.colors.insert("raw".to_string(), "#E6A23C".to_string());
    let cfg = ConfigFile::try_from(raw).unwrap();

    let opts = DotOptions {
        group: true,
        color: true,
        size: PageSize::A3,
    };
    let dot = render_dot(&layered_graph(), &cfg, &opts);

    assert!(dot.contains("clusterrank=\"local\""));
    assert!(dot.contains("size=\"11.7,16.5\""));
    assert!(dot.contains("bgcolor=\"#323237\""));
    assert!(dot.contains("color=\"#E6A23C\", fontcolor=\"#E6A23C\""));
    assert!(dot.contains("color=\"#ABCDEF\""));
    assert!(dot.contains("color=\"#737D82\""));
}

#[test]
fn dot_format_is_written_without_graphviz() {
    init_tracing();

    let fs = MockFileSystem::new();
    let dot = render_dot(&layered_graph(), &ConfigFile::default(), &DotOptions::default());

    GraphvizRenderer::new("definitely-not-graphviz")
        .render(&fs, &dot, OutputFormat::Dot, Layout::Dot, Path::new("out/graph"))
        .unwrap();

    assert_eq!(fs.get_file("out/graph"), Some(dot.into_bytes()));
}

#[test]
fn missing_graphviz_is_a_render_error() {
    init_tracing();

    let fs = MockFileSystem::new();

    let result = GraphvizRenderer::new("definitely-not-graphviz").render(
        &fs,
        "digraph {}",
        OutputFormat::Svg,
        Layout::Neato,
        Path::new("graph.svg"),
    );

    match result {
        Err(LineageError::Render(msg)) => assert!(msg.contains("definitely-not-graphviz")),
        other => panic!("expected Render error, got {other:?}"),
    }
    assert!(fs.get_file("graph.svg").is_none());
}
