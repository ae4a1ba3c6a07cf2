//! Composite dictionary keys.
//!
//! Patterns and bundles are addressed by the pair (pattern type, instance
//! name). Both halves take part in equality, so two patterns that share an
//! instance name but differ in type never collide.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Key of a [`CompPattern`](crate::CompPattern) or
/// [`InitBundle`](crate::InitBundle) within its dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatternKey {
    /// Pattern type name, e.g. `RSAChain`.
    pub pattern_type: String,
    /// Instance name, e.g. `simple-RSA-chain`.
    pub instance: String,
}

impl PatternKey {
    pub fn new(pattern_type: impl Into<String>, instance: impl Into<String>) -> Self {
        PatternKey {
            pattern_type: pattern_type.into(),
            instance: instance.into(),
        }
    }
}

impl fmt::Display for PatternKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.pattern_type, self.instance)
    }
}

impl FromStr for PatternKey {
    type Err = CoreError;

    /// Parses `TYPE/INSTANCE`. The instance may itself contain `/`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((ty, instance)) if !ty.is_empty() && !instance.is_empty() => {
                Ok(PatternKey::new(ty, instance))
            }
            _ => Err(CoreError::MalformedKey {
                value: s.to_string(),
            }),
        }
    }
}
