// src/dag/report.rs

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::dag::graph::LineageGraph;
use crate::dag::reach::ReachabilityEngine;
use crate::errors::Result;
use crate::fs::FileSystem;

/// Reachability report, keyed by node identifier.
pub type Report = BTreeMap<String, NodeReport>;

/// Per-node entry of the reachability report.
///
/// Serialises as
/// `{"children":[],"parents":[],"incomingEdges":[],"outgoingEdges":[],"nodeReachability":{},"reachableEdges":[]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeReport {
    pub children: Vec<String>,
    pub parents: Vec<String>,
    pub incoming_edges: Vec<String>,
    pub outgoing_edges: Vec<String>,
    pub node_reachability: BTreeMap<String, u64>,
    pub reachable_edges: Vec<String>,
}

/// Compute the closure of every node and assemble the report.
pub fn build_report(engine: &mut ReachabilityEngine<'_>) -> Result<Report> {
    let graph: &LineageGraph = engine.graph();
    let mut report = Report::new();

    for (idx, node) in graph.nodes().iter().enumerate() {
        let closure = engine.closure_at(idx)?;
        report.insert(
            node.id.clone(),
            NodeReport {
                children: owned(graph.ids(&node.children)),
                parents: owned(graph.ids(&node.parents)),
                incoming_edges: owned(graph.edge_ids(&node.incoming_edges)),
                outgoing_edges: owned(graph.edge_ids(&node.outgoing_edges)),
                node_reachability: closure.table(graph),
                reachable_edges: closure.edge_ids(graph),
            },
        );
    }

    info!(
        nodes = report.len(),
        computed = engine.computed_count(),
        "reachability analysis complete"
    );
    Ok(report)
}

/// Serialise the report as a single JSON object and write it to `path`.
pub fn write_report(fs: &dyn FileSystem, path: &Path, report: &Report) -> Result<()> {
    let json = serde_json::to_vec(report)?;
    fs.write(path, &json)?;
    info!(path = %path.display(), "reachability report written");
    Ok(())
}

fn owned<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    ids.map(str::to_string).collect()
}
