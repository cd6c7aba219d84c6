// src/dag/reach.rs

//! Memoised transitive closure over a [`LineageGraph`].
//!
//! Each node's closure is computed exactly once by an explicit-stack
//! depth-first traversal and then reused by every ancestor that reaches it.
//! Closures live in a memo table owned by the engine, not on the nodes.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, warn};

use crate::dag::graph::{LineageGraph, NodeIndex};
use crate::errors::{LineageError, Result};
use crate::types::CyclePolicy;

/// Fully computed reachability of one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Closure {
    /// Number of distinct directed paths to each node, indexed like the graph.
    paths: Vec<u64>,
    /// Edges on some path to a reachable node, first occurrence order.
    edges: Vec<usize>,
}

impl Closure {
    /// Path counts indexed by [`NodeIndex`]; one entry per graph node.
    pub fn path_counts(&self) -> &[u64] {
        &self.paths
    }

    pub fn paths_to(&self, idx: NodeIndex) -> u64 {
        self.paths[idx]
    }

    /// Indices of reachable edges.
    pub fn reachable_edges(&self) -> &[usize] {
        &self.edges
    }

    /// Nodes reached by at least one path.
    pub fn reachable_nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.paths
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(idx, _)| idx)
    }

    /// Path counts keyed by node identifier.
    pub fn table(&self, graph: &LineageGraph) -> BTreeMap<String, u64> {
        graph
            .nodes()
            .iter()
            .zip(&self.paths)
            .map(|(node, count)| (node.id.clone(), *count))
            .collect()
    }

    /// Reachable edge identifiers.
    pub fn edge_ids(&self, graph: &LineageGraph) -> Vec<String> {
        graph.edge_ids(&self.edges).map(str::to_string).collect()
    }
}

#[derive(Debug)]
enum Slot {
    Unvisited,
    InProgress,
    Done(Closure),
}

/// Partially built closure of a node on the traversal stack.
struct Frame {
    node: NodeIndex,
    next_child: usize,
    paths: Vec<u64>,
    edges: Vec<usize>,
    seen_edges: HashSet<usize>,
}

enum Step<'a> {
    Descend(NodeIndex),
    Fold(NodeIndex, &'a Closure),
    Reentered(NodeIndex),
    Finish,
}

/// Computes and caches per-node closures for one graph.
///
/// The graph is borrowed immutably for the engine's lifetime, so it cannot
/// change while closures are being computed.
#[derive(Debug)]
pub struct ReachabilityEngine<'g> {
    graph: &'g LineageGraph,
    slots: Vec<Slot>,
    policy: CyclePolicy,
    computed: usize,
}

impl<'g> ReachabilityEngine<'g> {
    pub fn new(graph: &'g LineageGraph, policy: CyclePolicy) -> Self {
        let slots = (0..graph.node_count()).map(|_| Slot::Unvisited).collect();
        Self {
            graph,
            slots,
            policy,
            computed: 0,
        }
    }

    pub fn graph(&self) -> &'g LineageGraph {
        self.graph
    }

    /// Number of closures computed so far. Cache hits do not increase it.
    pub fn computed_count(&self) -> usize {
        self.computed
    }

    /// The memoised closure of `idx`, if it has been computed.
    pub fn cached(&self, idx: NodeIndex) -> Option<&Closure> {
        match self.slots.get(idx) {
            Some(Slot::Done(closure)) => Some(closure),
            _ => None,
        }
    }

    /// Closure of the node with identifier `id`, computing it if needed.
    pub fn closure(&mut self, id: &str) -> Result<&Closure> {
        let idx = self
            .graph
            .index_of(id)
            .ok_or_else(|| LineageError::UnknownNode(id.to_string()))?;
        self.closure_at(idx)
    }

    /// Closure of the node at `idx`, computing it if needed.
    pub fn closure_at(&mut self, idx: NodeIndex) -> Result<&Closure> {
        if idx >= self.slots.len() {
            return Err(LineageError::UnknownNode(format!("#{idx}")));
        }
        self.resolve(idx)?;
        self.cached(idx)
            .ok_or_else(|| LineageError::UnknownNode(self.graph.node(idx).id.clone()))
    }

    /// Compute the closure of every node.
    pub fn compute_all(&mut self) -> Result<()> {
        for idx in 0..self.slots.len() {
            self.resolve(idx)?;
        }
        Ok(())
    }

    fn resolve(&mut self, root: NodeIndex) -> Result<()> {
        if matches!(self.slots[root], Slot::Done(_)) {
            return Ok(());
        }

        let mut stack = vec![self.enter(root)];
        let result = self.run(&mut stack);
        if result.is_err() {
            // Leave no node half-visited so a later call starts clean.
            for frame in &stack {
                self.slots[frame.node] = Slot::Unvisited;
            }
        }
        result
    }

    fn run(&mut self, stack: &mut Vec<Frame>) -> Result<()> {
        while let Some(frame) = stack.last_mut() {
            match self.next_step(frame) {
                Step::Descend(child) => {
                    let child_frame = self.enter(child);
                    stack.push(child_frame);
                }
                Step::Fold(child, closure) => {
                    fold_child(self.graph, frame, child, Some(closure))?;
                    frame.next_child += 1;
                }
                Step::Reentered(child) => {
                    let child_id = &self.graph.node(child).id;
                    match self.policy {
                        CyclePolicy::Reject => {
                            return Err(LineageError::DagCycle(format!(
                                "involving task '{}'",
                                child_id
                            )));
                        }
                        CyclePolicy::Tolerate => {
                            warn!(
                                task = %self.graph.node(frame.node).id,
                                child = %child_id,
                                "cycle detected, treating in-progress child as reaching nothing"
                            );
                            fold_child(self.graph, frame, child, None)?;
                            frame.next_child += 1;
                        }
                    }
                }
                Step::Finish => {
                    if let Some(frame) = stack.pop() {
                        self.finish(frame);
                    }
                }
            }
        }
        Ok(())
    }

    fn next_step(&self, frame: &Frame) -> Step<'_> {
        let children = &self.graph.node(frame.node).children;
        match children.get(frame.next_child) {
            None => Step::Finish,
            Some(&child) => match &self.slots[child] {
                Slot::Done(closure) => Step::Fold(child, closure),
                Slot::Unvisited => Step::Descend(child),
                Slot::InProgress => Step::Reentered(child),
            },
        }
    }

    /// Mark `idx` in progress and seed its table and edge set.
    fn enter(&mut self, idx: NodeIndex) -> Frame {
        self.slots[idx] = Slot::InProgress;
        let edges = self.graph.node(idx).outgoing_edges.clone();
        Frame {
            node: idx,
            next_child: 0,
            paths: vec![0; self.slots.len()],
            seen_edges: edges.iter().copied().collect(),
            edges,
        }
    }

    fn finish(&mut self, frame: Frame) {
        debug!(
            task = %self.graph.node(frame.node).id,
            reachable_edges = frame.edges.len(),
            "closure computed"
        );
        self.slots[frame.node] = Slot::Done(Closure {
            paths: frame.paths,
            edges: frame.edges,
        });
        self.computed += 1;
    }
}

/// Add the direct edge to `child` plus the child's closure into `frame`.
fn fold_child(
    graph: &LineageGraph,
    frame: &mut Frame,
    child: NodeIndex,
    closure: Option<&Closure>,
) -> Result<()> {
    let from = frame.node;
    let overflow = |to: NodeIndex| LineageError::PathCountOverflow {
        from: graph.node(from).id.clone(),
        to: graph.node(to).id.clone(),
    };

    frame.paths[child] = frame.paths[child]
        .checked_add(1)
        .ok_or_else(|| overflow(child))?;

    let Some(closure) = closure else {
        return Ok(());
    };

    for (idx, count) in closure.paths.iter().enumerate() {
        frame.paths[idx] = frame.paths[idx]
            .checked_add(*count)
            .ok_or_else(|| overflow(idx))?;
    }
    for &edge in &closure.edges {
        if frame.seen_edges.insert(edge) {
            frame.edges.push(edge);
        }
    }
    Ok(())
}
