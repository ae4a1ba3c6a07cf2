//! Output planning.
//!
//! A run registers every file it intends to write with an [`OutputPlan`]
//! before writing any of them, so structural mistakes (a missing
//! directory, the same file named twice, a path with no extension) abort
//! the run while nothing is on disk yet.

use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// The set of output files of one run, resolved against a base directory.
#[derive(Debug, Clone)]
pub struct OutputPlan {
    base_dir: PathBuf,
    outputs: Vec<PathBuf>,
}

impl OutputPlan {
    /// Creates a plan rooted at `base_dir`, which must exist.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_dir = base_dir.into();
        if !base_dir.is_dir() {
            return Err(StorageError::MissingDirectory(base_dir));
        }
        Ok(OutputPlan {
            base_dir,
            outputs: Vec::new(),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolves `path` against the base directory and registers it.
    ///
    /// Fails if the file has no extension, its directory does not exist, or
    /// it was already registered.
    pub fn register(&mut self, path: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
        let path = path.as_ref();
        let resolved = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        };

        let has_ext = resolved
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| !e.is_empty());
        if !has_ext || resolved.file_stem().is_none() {
            return Err(StorageError::MalformedExtension(resolved));
        }

        let parent = resolved
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.base_dir.clone());
        if !parent.is_dir() {
            return Err(StorageError::MissingDirectory(parent));
        }

        let canonical = canonical_output(&resolved);
        if self.outputs.iter().any(|p| canonical_output(p) == canonical) {
            return Err(StorageError::DuplicateOutput(resolved));
        }

        self.outputs.push(resolved.clone());
        Ok(resolved)
    }

    pub fn outputs(&self) -> &[PathBuf] {
        &self.outputs
    }
}

/// Canonical form for duplicate detection: the canonical parent directory
/// joined with the file name (the file itself need not exist yet).
fn canonical_output(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .unwrap_or_else(|_| parent.to_path_buf())
            .join(name),
        _ => path.to_path_buf(),
    }
}
