//! State schemas: which state keys each select code reads.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Registry from select-code name to the state keys it requires.
///
/// Select codes without an entry are not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateSchemas {
    required: HashMap<String, Vec<String>>,
}

impl StateSchemas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the keys `select` requires, replacing any earlier declaration.
    pub fn require<I, S>(&mut self, select: &str, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required
            .insert(select.to_string(), keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn required_for(&self, select: &str) -> &[String] {
        self.required.get(select).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }
}
