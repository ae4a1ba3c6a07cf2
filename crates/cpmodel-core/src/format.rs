//! Wire format selection.
//!
//! Every output file picks its encoding from its own extension: `.yaml` and
//! `.yml` select YAML, anything else selects JSON. The choice is per file,
//! so a pattern dictionary and an initialization dictionary written by the
//! same run may use different formats.

use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, FormatError};

/// One of the two supported encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Selects the format for a file by its extension (case-insensitive).
    pub fn from_path(path: &Path) -> Format {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Format::Yaml
            }
            _ => Format::Json,
        }
    }

    /// Maps the builder-facing `use_yaml` flag onto a format.
    pub fn from_yaml_flag(use_yaml: bool) -> Format {
        if use_yaml {
            Format::Yaml
        } else {
            Format::Json
        }
    }

    pub fn is_yaml(self) -> bool {
        self == Format::Yaml
    }

    /// Canonical file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
        }
    }

    /// Serializes `value` in this format. JSON output is pretty-printed.
    pub fn encode<T: Serialize + ?Sized>(self, value: &T) -> Result<String, CoreError> {
        let result = match self {
            Format::Yaml => serde_yaml::to_string(value).map_err(FormatError::from),
            Format::Json => serde_json::to_string_pretty(value).map_err(FormatError::from),
        };
        result.map_err(|source| CoreError::Encode {
            format: self,
            source,
        })
    }

    /// Deserializes a value from text in this format.
    pub fn decode<T: DeserializeOwned>(self, text: &str) -> Result<T, CoreError> {
        let result = match self {
            Format::Yaml => serde_yaml::from_str(text).map_err(FormatError::from),
            Format::Json => serde_json::from_str(text).map_err(FormatError::from),
        };
        result.map_err(|source| CoreError::Decode {
            format: self,
            source,
        })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Yaml => write!(f, "YAML"),
            Format::Json => write!(f, "JSON"),
        }
    }
}
