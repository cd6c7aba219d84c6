#![allow(dead_code)]

pub use tasklineage_test_utils::init_tracing;

use tasklineage::dag::LineageGraph;

/// Identifiers of the children of `id`, in edge order.
pub fn children(graph: &LineageGraph, id: &str) -> Vec<String> {
    let node = graph.node_by_id(id).expect("node exists");
    graph.ids(&node.children).map(str::to_string).collect()
}

/// Identifiers of the parents of `id`, in edge order.
pub fn parents(graph: &LineageGraph, id: &str) -> Vec<String> {
    let node = graph.node_by_id(id).expect("node exists");
    graph.ids(&node.parents).map(str::to_string).collect()
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
