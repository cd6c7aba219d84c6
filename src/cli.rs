// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::{Layout, OutputFormat, PageSize};

/// Command-line arguments for `tld`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tld",
    version,
    about = "Render task lineage diagrams and analyse DAG reachability.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML). Defaults are used if it does not exist.
    #[arg(short = 'k', long, value_name = "PATH", default_value = "Lineage.toml")]
    pub config: String,

    /// Root directory for task YAML files.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub input: String,

    /// Output file path for the rendered diagram.
    #[arg(short, long, value_name = "PATH", default_value = "graph")]
    pub output: String,

    /// Output file path for the reachability report.
    #[arg(short, long, value_name = "PATH", default_value = "reachability.json")]
    pub reach: String,

    /// Skip the reachability analysis.
    #[arg(short, long)]
    pub no_reach: bool,

    /// Output file format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Graphviz layout engine.
    #[arg(short, long, value_enum, default_value_t = Layout::Dot)]
    pub layout: Layout,

    /// Group nodes of the same level next to each other where possible.
    #[arg(short, long)]
    pub group: bool,

    /// Colour nodes by level using the `[colors]` config section.
    #[arg(short, long)]
    pub color: bool,

    /// Diagram page size.
    #[arg(short, long, value_enum, default_value_t = PageSize::Fhd)]
    pub size: PageSize,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TLD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load tasks and build the graph, print it, but don't write any files.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
