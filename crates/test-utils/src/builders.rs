#![allow(dead_code)]

use tasklineage::dag::LineageGraph;
use tasklineage::tasks::{Dependency, TaskRecord, TaskSet};

/// Builder for `TaskSet` to simplify test setup.
#[derive(Default)]
pub struct TaskSetBuilder {
    tasks: TaskSet,
}

impl TaskSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task with the given dependencies.
    pub fn task(mut self, id: &str, deps: &[&str]) -> Self {
        self.tasks
            .insert(id.to_string(), TaskRecord::new(id, deps.iter().copied()));
        self
    }

    /// Add a fully specified record under its own id.
    pub fn record(mut self, record: TaskRecord) -> Self {
        self.tasks.insert(record.id().to_string(), record);
        self
    }

    /// Chain `ids[0] -> ids[1] -> ...`: each task depends on the previous one.
    pub fn chain(mut self, ids: &[&str]) -> Self {
        for (i, id) in ids.iter().enumerate() {
            let deps: Vec<&str> = if i == 0 { vec![] } else { vec![ids[i - 1]] };
            self = self.task(id, &deps);
        }
        self
    }

    pub fn build(self) -> TaskSet {
        self.tasks
    }

    pub fn graph(self) -> LineageGraph {
        LineageGraph::from_tasks(&self.tasks)
    }
}

/// Builder for `TaskRecord`.
pub struct TaskRecordBuilder {
    record: TaskRecord,
}

impl TaskRecordBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            record: TaskRecord {
                task_id: Some(id.to_string()),
                ..TaskRecord::default()
            },
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.record.task = Some(label.to_string());
        self
    }

    pub fn level(mut self, level: &str) -> Self {
        self.record.level = Some(level.to_string());
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.record
            .dependency
            .get_or_insert_with(Vec::new)
            .push(Dependency {
                task_id: Some(dep.to_string()),
                ..Dependency::default()
            });
        self
    }

    pub fn build(self) -> TaskRecord {
        self.record
    }
}
