//! Computation-pattern graphs and per-function response tables.
//!
//! A [`CompPattern`] is a graph of [`FunctionNode`]s joined by labeled
//! message [`Edge`]s. Each function carries a [`ResponseTable`] describing
//! what it emits for every inbound (source label, message type) pair. The
//! tables, together with the message catalog, are packaged into an
//! [`InitBundle`] that shares its key with the pattern it initializes.

pub mod bundle;
pub mod edge;
pub mod error;
pub mod format;
pub mod function;
pub mod key;
pub mod message;
pub mod pattern;
pub mod response;
pub mod state;

// Re-export commonly used types
pub use bundle::{FunctionParams, InitBundle};
pub use edge::Edge;
pub use error::{CoreError, FormatError};
pub use format::Format;
pub use function::{create_function, Discipline, FunctionNode};
pub use key::PatternKey;
pub use message::{MessageCatalog, MessageType};
pub use pattern::CompPattern;
pub use response::{
    ActionDesc, InboundId, OutboundAction, Pmf, RandomTable, Response, ResponseTable, Responses,
    StatefulTable, StaticTable, TableBuilder,
};
pub use state::StateBlock;
