// src/render/dot.rs

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::config::model::ConfigFile;
use crate::dag::graph::{LineageGraph, Node};
use crate::types::PageSize;

const BACKGROUND_COLOR: &str = "#323237";
const FONT_COLOR: &str = "#F3F3F3";
const EDGE_COLOR: &str = "#737D82";

/// Presentation switches for [`render_dot`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DotOptions {
    /// Keep nodes of the same level together (`clusterrank=local`).
    pub group: bool,
    /// Colour nodes by level.
    pub color: bool,
    pub size: PageSize,
}

/// Render the graph as Graphviz DOT text.
///
/// Nodes with a level are placed in a `cluster_<level>` subgraph. Node ids
/// are task identifiers and edge ids are edge identifiers, so a rendered SVG
/// can be cross-referenced with the reachability report.
pub fn render_dot(graph: &LineageGraph, cfg: &ConfigFile, opts: &DotOptions) -> String {
    let mut out = String::new();

    out.push_str("digraph \"RootGraph\" {\n");
    write_graph_attrs(&mut out, opts);

    let mut clusters: BTreeMap<&str, Vec<&Node>> = BTreeMap::new();
    let mut loose = Vec::new();
    for node in graph.nodes() {
        match node.level.as_deref() {
            Some(level) => clusters.entry(level).or_default().push(node),
            None => loose.push(node),
        }
    }

    for (level, nodes) in &clusters {
        let _ = writeln!(out, "  subgraph {} {{", quote(&format!("cluster_{level}")));
        let _ = writeln!(out, "    id={};", quote(level));
        out.push_str("    peripheries=0;\n");
        for node in nodes {
            write_node(&mut out, "    ", node, cfg, opts);
        }
        out.push_str("  }\n");
    }
    for node in loose {
        write_node(&mut out, "  ", node, cfg, opts);
    }

    for edge in graph.edges() {
        let source = &graph.node(edge.source).id;
        let target = &graph.node(edge.target).id;
        let mut attrs = vec![
            ("id", quote(&edge.id)),
            ("tooltip", quote(&format!("{source}->{target}"))),
        ];
        if opts.color {
            attrs.push(("color", quote(EDGE_COLOR)));
        }
        let _ = writeln!(
            out,
            "  {} -> {} [{}];",
            quote(source),
            quote(target),
            join_attrs(&attrs)
        );
    }

    out.push_str("}\n");
    out
}

fn write_graph_attrs(out: &mut String, opts: &DotOptions) {
    let mut attrs = vec![
        ("id", quote("RootGraph")),
        ("label", quote("Task Lineage Diagram")),
        ("labelloc", quote("t")),
        ("labeljust", quote("r")),
        ("fontsize", "120".to_string()),
        ("fontname", quote("Arial")),
        ("rankdir", quote("LR")),
        ("ranksep", "4".to_string()),
        ("pad", "3".to_string()),
        ("overlap", "false".to_string()),
        ("center", "true".to_string()),
        ("smoothing", quote("graph_dist")),
        ("outputorder", quote("edgesfirst")),
        ("notranslate", "true".to_string()),
        ("size", quote(&opts.size.to_string())),
        (
            "clusterrank",
            quote(if opts.group { "local" } else { "global" }),
        ),
    ];
    if opts.color {
        attrs.push(("bgcolor", quote(BACKGROUND_COLOR)));
        attrs.push(("fontcolor", quote(FONT_COLOR)));
    }
    let _ = writeln!(out, "  graph [{}];", join_attrs(&attrs));
}

fn write_node(out: &mut String, indent: &str, node: &Node, cfg: &ConfigFile, opts: &DotOptions) {
    let mut attrs = vec![
        ("id", quote(&node.id)),
        ("label", quote(&node.label)),
        ("shape", quote("box")),
        ("style", quote("rounded")),
        ("fontsize", "20".to_string()),
        ("fontname", quote("Arial")),
    ];
    if let Some(level) = node.level.as_deref() {
        attrs.push(("xlabel", quote(level)));
    }
    if opts.color {
        let color = cfg.color_for_level(node.level.as_deref().unwrap_or(""));
        attrs.push(("color", quote(color)));
        attrs.push(("fontcolor", quote(color)));
    }
    let _ = writeln!(out, "{indent}{} [{}];", quote(&node.id), join_attrs(&attrs));
}

fn join_attrs(attrs: &[(&str, String)]) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Quote a DOT identifier, escaping `"` and `\`.
fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
