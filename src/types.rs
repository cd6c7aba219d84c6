use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

/// Behaviour when the reachability traversal re-enters a node whose closure
/// is still being computed (i.e. the graph contains a cycle).
///
/// - `Reject`: fail with [`LineageError::DagCycle`](crate::errors::LineageError)
///   naming the re-entered node (default).
/// - `Tolerate`: treat the in-progress node as reaching nothing and carry on,
///   which yields a partial closure for nodes on the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    #[default]
    Reject,
    Tolerate,
}

impl FromStr for CyclePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(CyclePolicy::Reject),
            "tolerate" => Ok(CyclePolicy::Tolerate),
            other => Err(format!(
                "invalid on_cycle: {other} (expected \"reject\" or \"tolerate\")"
            )),
        }
    }
}

/// What to do when two task files declare the same `task_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// The file visited later in walk order replaces the earlier one.
    #[default]
    Overwrite,
    /// Abort loading with a `DuplicateTask` error.
    Reject,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overwrite" => Ok(DuplicatePolicy::Overwrite),
            "reject" => Ok(DuplicatePolicy::Reject),
            other => Err(format!(
                "invalid on_duplicate: {other} (expected \"overwrite\" or \"reject\")"
            )),
        }
    }
}

/// Output file format for the rendered diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Svg,
    Dot,
    Png,
    Jpg,
}

impl OutputFormat {
    /// Value passed to Graphviz as `-T<format>`.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Dot => "dot",
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
        }
    }
}

/// Graphviz layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Layout {
    Circo,
    #[default]
    Dot,
    Fdp,
    Neato,
    Osage,
    Patchwork,
    Sfdp,
    Twopi,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Circo => "circo",
            Layout::Dot => "dot",
            Layout::Fdp => "fdp",
            Layout::Neato => "neato",
            Layout::Osage => "osage",
            Layout::Patchwork => "patchwork",
            Layout::Sfdp => "sfdp",
            Layout::Twopi => "twopi",
        }
    }
}

/// Page size of the rendered diagram, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum PageSize {
    /// Full HD aspect (20 x 11.25).
    #[default]
    Fhd,
    /// A3 portrait (11.7 x 16.5).
    A3,
}

impl PageSize {
    pub fn inches(self) -> (f64, f64) {
        match self {
            PageSize::Fhd => (20.0, 11.25),
            PageSize::A3 => (11.7, 16.5),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.inches();
        write!(f, "{w},{h}")
    }
}
