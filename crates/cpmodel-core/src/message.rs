//! Message type catalog.
//!
//! A [`MessageType`] fixes the packet and message byte lengths for one kind
//! of message. The [`MessageCatalog`] keeps them by name in insertion order
//! and is written to the wire as a plain list.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A named message kind with fixed lengths in bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageType {
    pub name: String,
    /// Bytes per packet on the wire.
    pub packet_len: u32,
    /// Bytes in the whole message.
    pub msg_len: u32,
}

impl MessageType {
    pub fn new(name: impl Into<String>, packet_len: u32, msg_len: u32) -> Self {
        MessageType {
            name: name.into(),
            packet_len,
            msg_len,
        }
    }

    /// Number of packets needed to carry one message. Zero when the packet
    /// length is zero.
    pub fn packet_count(&self) -> u32 {
        if self.packet_len == 0 {
            0
        } else {
            self.msg_len.div_ceil(self.packet_len)
        }
    }
}

/// Message types of one bundle, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MessageType>", into = "Vec<MessageType>")]
pub struct MessageCatalog {
    messages: IndexMap<String, MessageType>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a message type.
    ///
    /// Re-adding an identical entry is a no-op; re-adding a name with
    /// different lengths fails with [`CoreError::DuplicateMessage`].
    pub fn add(&mut self, msg: MessageType) -> Result<(), CoreError> {
        match self.messages.get(&msg.name) {
            Some(existing) if *existing == msg => Ok(()),
            Some(_) => Err(CoreError::DuplicateMessage { name: msg.name }),
            None => {
                self.messages.insert(msg.name.clone(), msg);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&MessageType> {
        self.messages.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.messages.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageType> {
        self.messages.values()
    }
}

impl TryFrom<Vec<MessageType>> for MessageCatalog {
    type Error = CoreError;

    fn try_from(list: Vec<MessageType>) -> Result<Self, Self::Error> {
        let mut catalog = MessageCatalog::new();
        for msg in list {
            catalog.add(msg)?;
        }
        Ok(catalog)
    }
}

impl From<MessageCatalog> for Vec<MessageType> {
    fn from(catalog: MessageCatalog) -> Self {
        catalog.messages.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_readd_is_idempotent() {
        let mut catalog = MessageCatalog::new();
        catalog.add(MessageType::new("data", 1500, 15000)).unwrap();
        catalog.add(MessageType::new("data", 1500, 15000)).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn divergent_readd_is_rejected() {
        let mut catalog = MessageCatalog::new();
        catalog.add(MessageType::new("data", 1500, 15000)).unwrap();
        let err = catalog.add(MessageType::new("data", 1000, 15000)).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateMessage { name } if name == "data"));
        assert_eq!(catalog.get("data").unwrap().packet_len, 1500);
    }

    #[test]
    fn packet_count_rounds_up() {
        assert_eq!(MessageType::new("m", 1500, 15000).packet_count(), 10);
        assert_eq!(MessageType::new("m", 1500, 1501).packet_count(), 2);
        assert_eq!(MessageType::new("m", 0, 100).packet_count(), 0);
    }

    #[test]
    fn wire_form_is_a_list_in_insertion_order() {
        let mut catalog = MessageCatalog::new();
        catalog.add(MessageType::new("initiate", 64, 64)).unwrap();
        catalog.add(MessageType::new("data", 1500, 15000)).unwrap();

        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json[0]["name"], "initiate");
        assert_eq!(json[1]["msg_len"], 15000);

        let back: MessageCatalog = serde_json::from_value(json).unwrap();
        assert_eq!(back, catalog);
    }

    #[test]
    fn wire_form_rejects_divergent_duplicates() {
        let text = r#"[
            {"name": "data", "packet_len": 1, "msg_len": 2},
            {"name": "data", "packet_len": 3, "msg_len": 4}
        ]"#;
        assert!(serde_json::from_str::<MessageCatalog>(text).is_err());
    }
}
