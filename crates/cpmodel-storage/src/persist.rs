//! Whole-file persistence.
//!
//! Files are read and written in one piece. The encoding of each file is
//! chosen from its own extension by [`Format::from_path`].

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use cpmodel_core::Format;

use crate::error::StorageError;

/// Serializes `value` to `path`, returning the format used.
///
/// The parent directory must already exist.
pub fn write_to<T: Serialize>(path: &Path, value: &T) -> Result<Format, StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(StorageError::MissingDirectory(parent.to_path_buf()));
        }
    }

    let format = Format::from_path(path);
    let text = match format {
        Format::Yaml => serde_yaml::to_string(value)?,
        Format::Json => serde_json::to_string_pretty(value)?,
    };
    fs::write(path, text).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), %format, "wrote file");
    Ok(format)
}

/// Reads and deserializes `path`.
pub fn read_from<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => StorageError::MissingFile(path.to_path_buf()),
        _ => StorageError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let value = match Format::from_path(path) {
        Format::Yaml => serde_yaml::from_str(&text)?,
        Format::Json => serde_json::from_str(&text)?,
    };
    Ok(value)
}
