// src/dag/mod.rs

//! Task lineage graph and reachability analysis.
//!
//! - [`graph`] assembles nodes and edges from a [`TaskSet`](crate::tasks::TaskSet).
//! - [`reach`] computes memoised per-node closures (path counts + edges).
//! - [`report`] shapes closures into the JSON reachability report.

pub mod graph;
pub mod reach;
pub mod report;

pub use graph::{Edge, LineageGraph, Node, NodeIndex};
pub use reach::{Closure, ReachabilityEngine};
pub use report::{NodeReport, Report, build_report, write_report};
