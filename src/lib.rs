// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod render;
pub mod tasks;
pub mod types;

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::load_or_default;
use crate::dag::{LineageGraph, ReachabilityEngine, Report, build_report, write_report};
use crate::fs::RealFileSystem;
use crate::render::{DotOptions, GraphvizRenderer, render_dot};
use crate::tasks::{TaskSet, load_tasks};
use crate::types::CyclePolicy;

/// High-level entry point used by `main.rs`.
///
/// config -> task files -> graph -> diagram -> (optional) reachability report
pub fn run(args: CliArgs) -> Result<()> {
    let fs = RealFileSystem;
    let cfg = load_or_default(&args.config)?;

    info!(input = %args.input, "reading task files");
    let tasks = load_tasks(&fs, Path::new(&args.input), &cfg)?;
    let graph = LineageGraph::from_tasks(&tasks);

    if args.dry_run {
        print_dry_run(&graph);
        return Ok(());
    }

    let opts = DotOptions {
        group: args.group,
        color: args.color,
        size: args.size,
    };
    let dot = render_dot(&graph, &cfg, &opts);
    GraphvizRenderer::default().render(
        &fs,
        &dot,
        args.format,
        args.layout,
        Path::new(&args.output),
    )?;

    if args.no_reach {
        info!("skipping reachability analysis");
    } else {
        let report = analyse(&graph, cfg.analysis.on_cycle)?;
        write_report(&fs, Path::new(&args.reach), &report)?;
    }

    info!("done");
    Ok(())
}

/// Build the graph for `tasks` and compute the full reachability report.
pub fn analyse_tasks(tasks: &TaskSet, policy: CyclePolicy) -> errors::Result<Report> {
    analyse(&LineageGraph::from_tasks(tasks), policy)
}

/// Compute the reachability report of every node in `graph`.
pub fn analyse(graph: &LineageGraph, policy: CyclePolicy) -> errors::Result<Report> {
    info!("analysing graph reachability");
    let mut engine = ReachabilityEngine::new(graph, policy);
    build_report(&mut engine)
}

/// Print nodes and their direct dependencies without writing anything.
fn print_dry_run(graph: &LineageGraph) {
    println!("tld dry-run");
    println!(
        "  {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    if let Some(node) = graph.find_cycle() {
        println!("  warning: cycle involving '{node}'");
    }
    println!();

    for node in graph.nodes() {
        match node.level.as_deref() {
            Some(level) => println!("  - {} [{level}]", node.id),
            None => println!("  - {}", node.id),
        }
        if !node.parents.is_empty() {
            let parents: Vec<&str> = graph.ids(&node.parents).collect();
            println!("      after: {:?}", parents);
        }
    }
}
