// src/dag/graph.rs

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graph::DiGraph;
use tracing::{debug, info, warn};

use crate::tasks::TaskSet;

/// Dense index of a node inside a [`LineageGraph`].
pub type NodeIndex = usize;

/// Graph vertex for one task.
///
/// Adjacency is stored as indices into the owning graph's node and edge
/// lists, in edge-creation order.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub label: String,
    /// Grouping key used by the renderer.
    pub level: Option<String>,
    /// Nodes that depend on this node.
    pub children: Vec<NodeIndex>,
    /// Nodes this node depends on.
    pub parents: Vec<NodeIndex>,
    pub incoming_edges: Vec<usize>,
    pub outgoing_edges: Vec<usize>,
}

/// Directed link from a dependency (`source`) to its dependent (`target`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// `edge0`, `edge1`, ... in creation order.
    pub id: String,
    pub source: NodeIndex,
    pub target: NodeIndex,
}

/// Node/edge model built once from the full task set.
///
/// Nodes are ordered by identifier. Edge identifiers are assigned while
/// iterating tasks in identifier order and each task's dependencies in
/// declaration order, so the same input always yields the same edges.
#[derive(Debug, Clone, Default)]
pub struct LineageGraph {
    nodes: Vec<Node>,
    index: HashMap<String, NodeIndex>,
    edges: Vec<Edge>,
}

impl LineageGraph {
    /// Build the graph from task records keyed by identifier.
    ///
    /// - Records with an empty identifier are dropped with a warning.
    /// - Duplicate dependency declarations produce a single edge.
    /// - Self and dangling dependencies are skipped with a warning.
    pub fn from_tasks(tasks: &TaskSet) -> Self {
        let mut graph = Self::default();

        for (id, task) in tasks.iter() {
            if id.is_empty() {
                warn!("task without an identifier, excluding it from the graph");
                continue;
            }
            graph.index.insert(id.clone(), graph.nodes.len());
            graph.nodes.push(Node {
                id: id.clone(),
                label: match task.label() {
                    "" => id.clone(),
                    label => label.to_string(),
                },
                level: task.level().map(str::to_string),
                children: Vec::new(),
                parents: Vec::new(),
                incoming_edges: Vec::new(),
                outgoing_edges: Vec::new(),
            });
        }

        for (id, task) in tasks.iter() {
            let Some(&target) = graph.index.get(id) else {
                continue;
            };

            let mut seen = HashSet::new();
            for dep in task.dependency_ids().filter(|dep| seen.insert(*dep)) {
                if dep == id {
                    warn!(task = %id, "task depends on itself, skipping dependency");
                    continue;
                }
                match graph.index.get(dep) {
                    Some(&source) => graph.add_edge(source, target),
                    None => {
                        warn!(task = %id, dependency = %dep, "dependency does not match any task, skipping");
                    }
                }
            }
        }

        info!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "built lineage graph"
        );
        graph
    }

    fn add_edge(&mut self, source: NodeIndex, target: NodeIndex) {
        let edge_idx = self.edges.len();
        let edge = Edge {
            id: format!("edge{edge_idx}"),
            source,
            target,
        };
        debug!(
            edge = %edge.id,
            source = %self.nodes[source].id,
            target = %self.nodes[target].id,
            "adding edge"
        );
        self.edges.push(edge);

        let target_node = &mut self.nodes[target];
        target_node.parents.push(source);
        target_node.incoming_edges.push(edge_idx);

        let source_node = &mut self.nodes[source];
        source_node.children.push(target);
        source_node.outgoing_edges.push(edge_idx);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes, ordered by identifier.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges, in creation order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.nodes[idx]
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|idx| &self.nodes[idx])
    }

    /// Edge from `source` to `target`, if one was created.
    pub fn edge_between(&self, source: &str, target: &str) -> Option<&Edge> {
        let (source, target) = (self.index_of(source)?, self.index_of(target)?);
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
    }

    /// Identifiers of the given node indices.
    pub fn ids<'a>(&'a self, indices: &'a [NodeIndex]) -> impl Iterator<Item = &'a str> + 'a {
        indices.iter().map(|&idx| self.nodes[idx].id.as_str())
    }

    /// Identifiers of the given edge indices.
    pub fn edge_ids<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = &'a str> + 'a {
        indices.iter().map(|&idx| self.edges[idx].id.as_str())
    }

    /// A `petgraph` view with identical node order; edge weights are edge ids.
    pub fn to_digraph(&self) -> DiGraph<&str, &str> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.edges.len());
        let indices: Vec<_> = self
            .nodes
            .iter()
            .map(|n| graph.add_node(n.id.as_str()))
            .collect();
        for edge in &self.edges {
            graph.add_edge(indices[edge.source], indices[edge.target], edge.id.as_str());
        }
        graph
    }

    /// Identifier of some node on a cycle, or `None` if the graph is a DAG.
    pub fn find_cycle(&self) -> Option<&str> {
        let graph = self.to_digraph();
        match toposort(&graph, None) {
            Ok(_order) => None,
            Err(cycle) => Some(graph[cycle.node_id()]),
        }
    }
}
