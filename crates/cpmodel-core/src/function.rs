//! Function nodes and their execution disciplines.
//!
//! A [`FunctionNode`] is a labeled processing unit inside one computation
//! pattern. Its [`Discipline`] decides which shape of response table it
//! carries and how the external engine selects among candidate responses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::format::Format;

/// How a function selects outbound messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    /// Fixed candidate responses per inbound identity.
    Static,
    /// Candidate responses plus select/cost code and a mutable state block.
    Stateful,
    /// Probability-weighted response selection.
    Random,
}

impl Discipline {
    pub fn as_str(self) -> &'static str {
        match self {
            Discipline::Static => "static",
            Discipline::Stateful => "stateful",
            Discipline::Random => "random",
        }
    }

    /// Returns `true` if tables of this discipline can be encoded as `format`.
    ///
    /// Random tables are keyed by composite structs at both levels, which
    /// JSON object keys cannot carry, so they are YAML-only.
    pub fn supports(self, format: Format) -> bool {
        !(self == Discipline::Random && format == Format::Json)
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Discipline {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(Discipline::Static),
            "stateful" => Ok(Discipline::Stateful),
            "random" => Ok(Discipline::Random),
            _ => Err(CoreError::UnknownDiscipline {
                value: s.to_string(),
            }),
        }
    }
}

/// A labeled processing unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionNode {
    /// Behavioral category, e.g. `encrypt`. Descriptive only.
    pub func_type: String,
    /// Unique identifier within one pattern.
    pub label: String,
    pub discipline: Discipline,
}

impl FunctionNode {
    pub fn new(func_type: impl Into<String>, label: impl Into<String>, discipline: Discipline) -> Self {
        FunctionNode {
            func_type: func_type.into(),
            label: label.into(),
            discipline,
        }
    }
}

/// Creates a function node from a textual discipline, rejecting any value
/// outside {static, stateful, random}.
pub fn create_function(
    func_type: &str,
    label: &str,
    discipline: &str,
) -> Result<FunctionNode, CoreError> {
    let discipline: Discipline = discipline.parse()?;
    Ok(FunctionNode::new(func_type, label, discipline))
}
