// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LineageError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Cannot parse task file {path:?}: {message}")]
    TaskParse { path: PathBuf, message: String },

    #[error("Duplicate task_id '{id}' in {path:?}")]
    DuplicateTask { id: String, path: PathBuf },

    #[error("Node not found: {0}")]
    UnknownNode(String),

    #[error("Cycle detected in DAG: {0}")]
    DagCycle(String),

    #[error("Path count from '{from}' to '{to}' overflows u64")]
    PathCountOverflow { from: String, to: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, LineageError>;
