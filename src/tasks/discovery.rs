// src/tasks/discovery.rs

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::config::model::DiscoverySection;
use crate::fs::FileSystem;

/// Compiled include/exclude patterns deciding which files are task files.
///
/// Patterns are matched against the path relative to the input root, with
/// `/` separators. `*` does not cross a `/`.
#[derive(Clone)]
pub struct TaskFileFilter {
    include: GlobSet,
    exclude: GlobSet,
}

impl fmt::Debug for TaskFileFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskFileFilter")
            .field("include", &self.include.len())
            .field("exclude", &self.exclude.len())
            .finish()
    }
}

impl TaskFileFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(Self {
            include: build_globset(include).context("building include globset")?,
            exclude: build_globset(exclude).context("building exclude globset")?,
        })
    }

    pub fn from_config(discovery: &DiscoverySection) -> Result<Self> {
        Self::new(&discovery.include, &discovery.exclude)
    }

    pub fn matches(&self, rel_path: &str) -> bool {
        self.include.is_match(rel_path) && !self.exclude.is_match(rel_path)
    }
}

/// Build a GlobSet from simple string patterns.
pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = GlobBuilder::new(pat)
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

/// Collect every file under `root` accepted by `filter`, sorted by path.
pub fn discover_task_files(
    fs: &dyn FileSystem,
    root: &Path,
    filter: &TaskFileFilter,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        for path in fs.read_dir(&dir)? {
            if fs.is_dir(&path) {
                stack.push(path);
            } else if fs.is_file(&path) {
                if let Ok(rel) = path.strip_prefix(root) {
                    let rel_str = rel.to_string_lossy().replace('\\', "/");
                    if filter.matches(&rel_str) {
                        files.push(path);
                    }
                }
            }
        }
    }

    files.sort();
    Ok(files)
}
