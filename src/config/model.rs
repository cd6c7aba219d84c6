// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::{CyclePolicy, DuplicatePolicy};

/// Fallback node colour when neither a level prefix nor `default` matches.
pub const FALLBACK_COLOR: &str = "#FFFFFF";

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [analysis]
/// on_cycle = "reject"
/// on_duplicate = "overwrite"
///
/// [discovery]
/// include = ["**/*.yml", "**/*.yaml"]
/// exclude = ["**/_*", "**/.*", "**/_*/*"]
///
/// [colors]
/// default = "#FFFFFF"
/// raw = "#E6A23C"
/// ```
///
/// All sections are optional.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub analysis: AnalysisSection,

    #[serde(default)]
    pub discovery: DiscoverySection,

    /// Level prefix -> colour. The key `default` is used when no prefix matches.
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

/// Validated configuration. Construct through `ConfigFile::try_from(raw)`
/// or `ConfigFile::default()`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub analysis: AnalysisSection,
    pub discovery: DiscoverySection,
    pub colors: BTreeMap<String, String>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        analysis: AnalysisSection,
        discovery: DiscoverySection,
        colors: BTreeMap<String, String>,
    ) -> Self {
        Self {
            analysis,
            discovery,
            colors,
        }
    }

    /// Colour for a node on the given level.
    ///
    /// The longest key that is a prefix of `level` wins; otherwise
    /// `colors.default`, otherwise white.
    pub fn color_for_level(&self, level: &str) -> &str {
        self.colors
            .iter()
            .filter(|(key, _)| key.as_str() != "default" && level.starts_with(key.as_str()))
            .max_by_key(|(key, _)| key.len())
            .map(|(_, color)| color.as_str())
            .or_else(|| self.colors.get("default").map(String::as_str))
            .unwrap_or(FALLBACK_COLOR)
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        let mut colors = BTreeMap::new();
        colors.insert("default".to_string(), FALLBACK_COLOR.to_string());
        Self::new_unchecked(AnalysisSection::default(), DiscoverySection::default(), colors)
    }
}

/// `[analysis]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AnalysisSection {
    /// `"reject"` (default) or `"tolerate"`.
    #[serde(default)]
    pub on_cycle: CyclePolicy,

    /// `"overwrite"` (default) or `"reject"`.
    #[serde(default)]
    pub on_duplicate: DuplicatePolicy,
}

/// `[discovery]` section: which files under the input root are task files.
///
/// Patterns are matched against paths relative to the input root, with `/`
/// separators.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverySection {
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

fn default_include() -> Vec<String> {
    vec!["**/*.yml".to_string(), "**/*.yaml".to_string()]
}

// Hidden files, `_`-prefixed files, and files whose parent directory is
// `_`-prefixed.
fn default_exclude() -> Vec<String> {
    vec![
        "**/_*".to_string(),
        "**/.*".to_string(),
        "**/_*/*".to_string(),
    ]
}

impl Default for DiscoverySection {
    fn default() -> Self {
        Self {
            include: default_include(),
            exclude: default_exclude(),
        }
    }
}
