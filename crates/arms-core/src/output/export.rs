//! JSON Export
//!
//! Writes finished reports for other tools to pick up.

use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("could not write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes `value` as pretty JSON, creating parent directories as needed.
pub fn write_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), OutputError> {
    let path = path.as_ref();
    let io_error = |source| OutputError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(io_error)
}
