//! Validation and dry runs for computation patterns.
//!
//! Provides two kinds of checking:
//! - [`validate`]: static checks of a pattern against its initialization
//!   bundle, collected into a [`Report`] of [`Diagnostic`]s.
//! - [`walk`]: a seeded dry run of the routing tables from every
//!   self-initiating function.
//!
//! Both are pure: they read the model but never modify it.

pub mod bundle;
pub mod diagnostics;
pub mod pattern;
pub mod reach;
pub mod schema;
pub mod walk;

pub use bundle::validate_bundle;
pub use diagnostics::{Diagnostic, Severity};
pub use pattern::validate_pattern;
pub use reach::{check_reachability, pattern_graph};
pub use schema::StateSchemas;
pub use walk::{walk, WalkConfig, WalkError, WalkStep};

use cpmodel_core::{CompPattern, InitBundle, PatternKey};
use serde::Serialize;

/// All diagnostics for one pattern instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub key: PatternKey,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == severity)
            .count()
    }
}

/// Runs every check on `pattern` and, when present, its `bundle`.
pub fn validate(
    pattern: &CompPattern,
    bundle: Option<&InitBundle>,
    schemas: &StateSchemas,
) -> Report {
    let mut diagnostics = validate_pattern(pattern);
    diagnostics.extend(check_reachability(pattern));
    if let Some(bundle) = bundle {
        diagnostics.extend(validate_bundle(pattern, bundle, schemas));
    }
    Report {
        key: pattern.key(),
        diagnostics,
    }
}
