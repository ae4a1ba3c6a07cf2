//! Storage error types for cpmodel-storage.
//!
//! [`StorageError`] covers the three failure families of a build run:
//! structural (files, directories, extensions), referential (recovering an
//! entry that is not there) and encoding (serde failures, or a core model
//! error surfaced while persisting).

use std::path::PathBuf;

use cpmodel_core::{CoreError, PatternKey};
use thiserror::Error;

/// Errors produced by dictionary and persistence operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization or deserialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A core model operation failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file does not exist.
    #[error("file not found: {0}")]
    MissingFile(PathBuf),

    /// The directory an output would be written to does not exist.
    #[error("directory not found: {0}")]
    MissingDirectory(PathBuf),

    /// The same output file was named twice in one run.
    #[error("duplicate output file: {0}")]
    DuplicateOutput(PathBuf),

    /// An output path has no usable file extension.
    #[error("malformed extension on output file: {0}")]
    MalformedExtension(PathBuf),

    /// No entry with this key in the dictionary.
    #[error("{kind} not found: {key}")]
    EntryNotFound { kind: &'static str, key: PatternKey },

    /// An entry with this key already exists and the add policy rejects it.
    #[error("{kind} already present: {key}")]
    DuplicateEntry { kind: &'static str, key: PatternKey },
}

impl StorageError {
    /// Returns `true` for failures of the filesystem rather than the model.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            StorageError::Io { .. }
                | StorageError::MissingFile(_)
                | StorageError::MissingDirectory(_)
                | StorageError::DuplicateOutput(_)
                | StorageError::MalformedExtension(_)
        )
    }
}
