// src/tasks/loader.rs

use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::model::ConfigFile;
use crate::errors::{LineageError, Result};
use crate::fs::FileSystem;
use crate::tasks::discovery::{TaskFileFilter, discover_task_files};
use crate::tasks::model::{TaskRecord, TaskSet};
use crate::types::DuplicatePolicy;

/// Read every task file under `root` into a [`TaskSet`].
///
/// Files are visited in sorted path order. Records without a `task_id` are
/// skipped with a warning; duplicate ids follow `[analysis].on_duplicate`.
/// An unreadable or malformed file aborts the load.
pub fn load_tasks(fs: &dyn FileSystem, root: &Path, cfg: &ConfigFile) -> Result<TaskSet> {
    let filter = TaskFileFilter::from_config(&cfg.discovery)?;
    let paths = discover_task_files(fs, root, &filter)?;
    info!(root = %root.display(), files = paths.len(), "discovered task files");

    let mut tasks = TaskSet::new();

    for path in paths {
        debug!(path = %path.display(), "found task file");

        let Some(record) = parse_task_file(fs, &path)? else {
            warn!(path = %path.display(), "cannot get task_id, skipping file");
            continue;
        };

        let id = record.id().to_string();
        if tasks.contains_key(&id) {
            match cfg.analysis.on_duplicate {
                DuplicatePolicy::Reject => {
                    return Err(LineageError::DuplicateTask { id, path });
                }
                DuplicatePolicy::Overwrite => {
                    warn!(task = %id, path = %path.display(), "duplicate task_id, overwriting earlier definition");
                }
            }
        }
        tasks.insert(id, record);
    }

    info!(tasks = tasks.len(), "loaded tasks");
    Ok(tasks)
}

/// Parse one YAML task file.
///
/// Returns `Ok(None)` for an empty document or a record without `task_id`.
pub fn parse_task_file(fs: &dyn FileSystem, path: &Path) -> Result<Option<TaskRecord>> {
    let contents = fs.read_to_string(path).map_err(|e| LineageError::TaskParse {
        path: path.to_path_buf(),
        message: format!("{e:#}"),
    })?;

    if contents.trim().is_empty() {
        return Ok(None);
    }

    let record: TaskRecord =
        serde_yaml::from_str(&contents).map_err(|e| LineageError::TaskParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if record.id().is_empty() {
        return Ok(None);
    }
    Ok(Some(record))
}
