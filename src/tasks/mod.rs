// src/tasks/mod.rs

//! Task definitions: the YAML data model, file discovery, and the loader
//! that turns a directory of task files into a [`TaskSet`].

pub mod discovery;
pub mod loader;
pub mod model;

pub use discovery::{TaskFileFilter, discover_task_files};
pub use loader::{load_tasks, parse_task_file};
pub use model::{Dependency, Runtime, TaskRecord, TaskSet};
