//! CLI error type and its exit-code mapping.

use cpmodel_check::WalkError;
use cpmodel_core::CoreError;
use cpmodel_storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error("function '{label}' has no self-loop to set a period on")]
    NoSelfLoop { label: String },

    #[error("no selected pattern has a function '{label}'")]
    UnknownLabel { label: String },

    #[error("failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// 3 for filesystem failures, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Storage(e) if e.is_io() => 3,
            _ => 1,
        }
    }
}
