//! Core error types for cpmodel-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering the
//! failure modes of model construction and table encoding.

use thiserror::Error;

use crate::format::Format;
use crate::function::Discipline;

/// Core errors produced by the cpmodel-core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An execution discipline string outside {static, stateful, random}.
    #[error("unknown execution discipline: '{value}'")]
    UnknownDiscipline { value: String },

    /// A function label already names a different node in the pattern.
    #[error("duplicate function label '{label}': already defined as {existing}, got {incoming}")]
    DuplicateFunction {
        label: String,
        existing: String,
        incoming: String,
    },

    /// A table operation does not apply to the function's discipline.
    #[error("function '{label}' is {declared}, operation requires {required}")]
    DisciplineMismatch {
        label: String,
        declared: Discipline,
        required: Discipline,
    },

    /// A message type name was registered twice with different lengths.
    #[error("message type '{name}' already registered with different lengths")]
    DuplicateMessage { name: String },

    /// Parameters for a label were added twice with different content.
    #[error("divergent parameters for function '{label}'")]
    DivergentParams { label: String },

    /// No parameters are stored for the label.
    #[error("no parameters for function '{label}'")]
    ParamsNotFound { label: String },

    /// A response index does not exist under the inbound identity.
    #[error("no response #{index} for inbound {inbound}")]
    ResponseNotFound { inbound: String, index: usize },

    /// The table's discipline has no such component (e.g. periods on a
    /// random table, state on a static one).
    #[error("{discipline} tables have no {what}")]
    NotApplicable {
        discipline: Discipline,
        what: &'static str,
    },

    /// Periods must be finite and non-negative.
    #[error("invalid period {period} for inbound {inbound}")]
    InvalidPeriod { inbound: String, period: f64 },

    /// A pattern key string is not of the form `type/instance`.
    #[error("malformed pattern key '{value}', expected TYPE/INSTANCE")]
    MalformedKey { value: String },

    /// A state block value failed to parse as the requested type.
    #[error("state key '{key}' has value '{value}' which is not a valid {expected}")]
    StateValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    /// A table of this discipline cannot be written in the requested format.
    #[error("{discipline} tables cannot be encoded as {format}")]
    UnsupportedFormat {
        discipline: Discipline,
        format: Format,
    },

    /// Serialization to the given format failed.
    #[error("{format} encoding failed: {source}")]
    Encode {
        format: Format,
        #[source]
        source: FormatError,
    },

    /// Deserialization from the given format failed.
    #[error("{format} decoding failed: {source}")]
    Decode {
        format: Format,
        #[source]
        source: FormatError,
    },
}

/// Underlying serde failure of one wire format.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
