//! Validation diagnostics with context fields.
//!
//! Every [`Diagnostic`] names the function label (where one applies) and the
//! inbound identity or action involved, so a report can be acted on without
//! re-reading the files. Diagnostics serialize with a `kind` tag for
//! machine-readable output.

use cpmodel_core::{Discipline, InboundId, OutboundAction, PatternKey};
use serde::{Deserialize, Serialize};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A problem found in a pattern or its initialization bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// An edge endpoint names no function of the pattern.
    #[error("edge {src_label} -> {dst_label} ({msg_type}) references unknown function '{missing}'")]
    DanglingEdge {
        src_label: String,
        dst_label: String,
        msg_type: String,
        /// The endpoint label that does not resolve.
        missing: String,
    },

    /// A required name is empty.
    #[error("empty {field} on {owner}")]
    EmptyName {
        /// Which field is empty (function label, function type, message type).
        field: String,
        /// The function label or edge the field belongs to.
        owner: String,
    },

    /// Pattern and bundle do not share a key.
    #[error("bundle {bundle} does not belong to pattern {pattern}")]
    KeyMismatch {
        pattern: PatternKey,
        bundle: PatternKey,
    },

    /// Parameters are stored for a label the pattern does not define.
    #[error("parameters for unknown function '{label}'")]
    UnknownFunction { label: String },

    /// The stored table's discipline differs from the function's.
    #[error("function '{label}' is {declared} but its table is {stored}")]
    DisciplineConflict {
        label: String,
        declared: Discipline,
        stored: Discipline,
    },

    /// A function of the pattern has no stored table.
    #[error("function '{label}' has no parameters")]
    MissingParams { label: String },

    /// A stored table failed to decode.
    #[error("table for '{label}' does not decode: {reason}")]
    UndecodableTable { label: String, reason: String },

    /// The table reacts to an inbound identity no edge delivers.
    #[error("function '{label}' responds to {inbound} but no edge delivers it")]
    UnmatchedInbound { label: String, inbound: InboundId },

    /// The table emits an action no outgoing edge carries.
    #[error("function '{label}' emits {action} but no outgoing edge carries it")]
    UnmatchedOutbound { label: String, action: OutboundAction },

    /// A message type used by the pattern is not in the catalog.
    #[error("message type '{msg_type}' used by '{label}' is not in the catalog")]
    UnknownMessage { label: String, msg_type: String },

    /// A stateful inbound identity has responses but no select/cost code.
    #[error("stateful function '{label}' has no action descriptor for {inbound}")]
    MissingActionDescriptor { label: String, inbound: InboundId },

    /// The state block lacks a key the select code requires.
    #[error("state of '{label}' lacks key '{key}' required by select code '{select}'")]
    MissingStateKey {
        label: String,
        select: String,
        key: String,
    },

    /// The bundle's published state differs from the table's state block.
    #[error("state snapshot for '{label}' is out of date")]
    StaleSnapshot { label: String },

    /// A random distribution has a negative weight.
    #[error("negative weight {weight} for {action} under {inbound} in '{label}'")]
    NegativeWeight {
        label: String,
        inbound: InboundId,
        action: OutboundAction,
        weight: f64,
    },

    /// A random distribution's weights do not sum to one.
    #[error("weights under {inbound} in '{label}' sum to {total}, not 1")]
    WeightSum {
        label: String,
        inbound: InboundId,
        total: f64,
    },

    /// A period is negative or not finite.
    #[error("invalid period {period} under {inbound} in '{label}'")]
    InvalidPeriod {
        label: String,
        inbound: InboundId,
        period: f64,
    },

    /// A positive period on an inbound identity that is not a self-loop.
    #[error("period {period} under reactive inbound {inbound} in '{label}' is ignored")]
    ReactivePeriod {
        label: String,
        inbound: InboundId,
        period: f64,
    },

    /// No self-initiating function reaches this one.
    #[error("function '{label}' is unreachable from any self-initiating function")]
    Unreachable { label: String },

    /// The pattern has no self-loop, so nothing ever starts.
    #[error("pattern {pattern} has no self-initiating function")]
    NoSelfInitiation { pattern: PatternKey },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::WeightSum { .. }
            | Diagnostic::ReactivePeriod { .. }
            | Diagnostic::Unreachable { .. }
            | Diagnostic::NoSelfInitiation { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}
