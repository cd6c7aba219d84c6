// src/tasks/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Task records keyed by `task_id`, iterated in sorted order.
pub type TaskSet = BTreeMap<String, TaskRecord>;

/// One task definition file.
///
/// ```yaml
/// task: "Load orders"
/// task_id: "load_orders"
/// level: "raw"
/// dependency:
///   - task_id: "extract_orders"
/// ```
///
/// Only `task_id` and `dependency[].task_id` matter for the graph; `task` and
/// `level` are used by the renderer. The scheduling fields are carried along
/// so that a task file round-trips through the model without losing data.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TaskRecord {
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub frequency: Option<i64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub queue: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub runtime: Option<Runtime>,
    #[serde(default)]
    pub dependency: Option<Vec<Dependency>>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Runtime {
    #[serde(default)]
    pub directory: Option<String>,
    #[serde(default)]
    pub executable: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
}

/// Upstream dependency declared by a task.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Dependency {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub storage: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub frequency: Option<i64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl TaskRecord {
    /// Minimal record with an id and dependency ids.
    pub fn new<I, S>(id: impl Into<String>, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            task_id: Some(id.into()),
            dependency: Some(
                deps.into_iter()
                    .map(|d| Dependency {
                        task_id: Some(d.into()),
                        ..Dependency::default()
                    })
                    .collect(),
            ),
            ..Self::default()
        }
    }

    /// The task identifier, or `""` if missing.
    pub fn id(&self) -> &str {
        self.task_id.as_deref().unwrap_or("")
    }

    /// Display label: the `task` field, falling back to the id.
    pub fn label(&self) -> &str {
        match self.task.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => self.id(),
        }
    }

    /// Grouping key, if present and non-empty.
    pub fn level(&self) -> Option<&str> {
        self.level.as_deref().filter(|l| !l.is_empty())
    }

    /// Declared dependency ids in declaration order, duplicates included.
    pub fn dependency_ids(&self) -> impl Iterator<Item = &str> {
        self.dependency
            .iter()
            .flatten()
            .map(|dep| dep.task_id.as_deref().unwrap_or(""))
    }
}
