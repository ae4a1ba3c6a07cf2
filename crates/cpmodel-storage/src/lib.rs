//! Dictionaries of computation patterns and initialization bundles.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`dictionary`]: generic name-keyed [`Dictionary`] and its two aliases
//! - [`persist`]: whole-file read/write, format chosen by extension
//! - [`plan`]: [`OutputPlan`], structural checks on output paths before
//!   anything is written

pub mod dictionary;
pub mod error;
pub mod persist;
pub mod plan;

// Re-export key types for ergonomic use.
pub use dictionary::{AddPolicy, Dictionary, InitDictionary, Keyed, PatternDictionary};
pub use error::StorageError;
pub use persist::{read_from, write_to};
pub use plan::OutputPlan;
