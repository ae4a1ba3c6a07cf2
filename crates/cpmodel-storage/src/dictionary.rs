//! Name-keyed dictionaries of patterns and bundles.
//!
//! [`Dictionary`] is generic over any [`Keyed`] entry. The two dictionaries
//! the tooling works with are aliases:
//!
//! - [`PatternDictionary`]: `Dictionary<CompPattern>`
//! - [`InitDictionary`]: `Dictionary<InitBundle>`
//!
//! Entries are keyed by [`PatternKey`] (pattern type + instance name) and
//! kept in insertion order. On the wire a dictionary is `{name, entries}`
//! with entries as a list; keys are rebuilt from the entries on load and
//! duplicate keys are rejected.
//!
//! Lifecycle: a builder run creates an empty dictionary, fills it and writes
//! it once. A consumer run reads a dictionary, recovers the entries it
//! wants, mutates them and writes a new, usually smaller, dictionary.

use std::path::Path;

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use cpmodel_core::{CompPattern, InitBundle, PatternKey};

use crate::error::StorageError;
use crate::persist;

/// An entry that knows its own dictionary key.
pub trait Keyed {
    /// Entry kind, used in diagnostics.
    const KIND: &'static str;

    fn key(&self) -> PatternKey;
}

impl Keyed for CompPattern {
    const KIND: &'static str = "pattern";

    fn key(&self) -> PatternKey {
        CompPattern::key(self)
    }
}

impl Keyed for InitBundle {
    const KIND: &'static str = "init bundle";

    fn key(&self) -> PatternKey {
        InitBundle::key(self)
    }
}

/// What [`Dictionary::add`] does when the key is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddPolicy {
    /// Fail with [`StorageError::DuplicateEntry`].
    Reject,
    /// Replace the existing entry.
    Overwrite,
}

/// A persistable, name-keyed container.
#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary<T> {
    name: String,
    entries: IndexMap<PatternKey, T>,
}

pub type PatternDictionary = Dictionary<CompPattern>;
pub type InitDictionary = Dictionary<InitBundle>;

impl<T: Keyed> Dictionary<T> {
    /// Creates an empty dictionary.
    pub fn new(name: impl Into<String>) -> Self {
        Dictionary {
            name: name.into(),
            entries: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds `entry` under its own key. Returns the replaced entry when the
    /// policy is [`AddPolicy::Overwrite`] and the key was present.
    pub fn add(&mut self, entry: T, policy: AddPolicy) -> Result<Option<T>, StorageError> {
        let key = entry.key();
        if policy == AddPolicy::Reject && self.entries.contains_key(&key) {
            return Err(StorageError::DuplicateEntry { kind: T::KIND, key });
        }
        Ok(self.entries.insert(key, entry))
    }

    /// Looks up an entry by pattern type and instance name. Both must match.
    pub fn recover(&self, pattern_type: &str, instance: &str) -> Option<&T> {
        self.entries.get(&PatternKey::new(pattern_type, instance))
    }

    pub fn recover_mut(&mut self, pattern_type: &str, instance: &str) -> Option<&mut T> {
        self.entries.get_mut(&PatternKey::new(pattern_type, instance))
    }

    /// Like [`recover`](Self::recover), treating absence as an error.
    pub fn recover_or_err(&self, key: &PatternKey) -> Result<&T, StorageError> {
        self.entries
            .get(key)
            .ok_or_else(|| StorageError::EntryNotFound {
                kind: T::KIND,
                key: key.clone(),
            })
    }

    pub fn get(&self, key: &PatternKey) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &PatternKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &PatternKey) -> Option<T> {
        self.entries.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &PatternKey> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PatternKey, &T)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Keyed + Serialize> Dictionary<T> {
    /// Writes the whole dictionary to `path` in the format its extension
    /// selects.
    pub fn write(&self, path: &Path) -> Result<(), StorageError> {
        let format = persist::write_to(path, self)?;
        tracing::info!(
            dictionary = %self.name,
            kind = T::KIND,
            entries = self.entries.len(),
            %format,
            path = %path.display(),
            "dictionary written"
        );
        Ok(())
    }
}

impl<T: Keyed + serde::de::DeserializeOwned> Dictionary<T> {
    /// Reads a whole dictionary from `path`.
    pub fn read(path: &Path) -> Result<Self, StorageError> {
        let dict: Self = persist::read_from(path)?;
        tracing::info!(
            dictionary = %dict.name,
            kind = T::KIND,
            entries = dict.entries.len(),
            path = %path.display(),
            "dictionary read"
        );
        Ok(dict)
    }
}

// ---------------------------------------------------------------------------
// Wire form
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DictionaryRef<'a, T> {
    name: &'a str,
    entries: Vec<&'a T>,
}

#[derive(Deserialize)]
struct DictionaryOwned<T> {
    name: String,
    #[serde(default = "Vec::new")]
    entries: Vec<T>,
}

impl<T: Keyed + Serialize> Serialize for Dictionary<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DictionaryRef {
            name: &self.name,
            entries: self.entries.values().collect(),
        }
        .serialize(serializer)
    }
}

impl<'de, T: Keyed + Deserialize<'de>> Deserialize<'de> for Dictionary<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let owned = DictionaryOwned::<T>::deserialize(deserializer)?;
        let mut entries = IndexMap::with_capacity(owned.entries.len());
        for entry in owned.entries {
            let key = entry.key();
            if entries.contains_key(&key) {
                return Err(D::Error::custom(format!(
                    "duplicate {} key {key}",
                    T::KIND
                )));
            }
            entries.insert(key, entry);
        }
        Ok(Dictionary {
            name: owned.name,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpmodel_core::Format;

    fn pattern(ty: &str, name: &str) -> CompPattern {
        CompPattern::new(ty, name)
    }

    #[test]
    fn key_isolation() {
        let mut dict = PatternDictionary::new("patterns");
        dict.add(pattern("RSAChain", "simple-AES-chain"), AddPolicy::Reject)
            .unwrap();
        assert!(dict.recover("AESChain", "simple-AES-chain").is_none());
        assert!(dict.recover("RSAChain", "simple-AES-chain").is_some());

        dict.add(pattern("AESChain", "simple-AES-chain"), AddPolicy::Reject)
            .unwrap();
        assert_eq!(
            dict.recover("AESChain", "simple-AES-chain").unwrap().pattern_type,
            "AESChain"
        );
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn add_policy() {
        let mut dict = PatternDictionary::new("patterns");
        dict.add(pattern("RSAChain", "a"), AddPolicy::Reject).unwrap();
        let err = dict
            .add(pattern("RSAChain", "a"), AddPolicy::Reject)
            .unwrap_err();
        assert!(matches!(err, StorageError::DuplicateEntry { kind: "pattern", .. }));

        let mut replacement = pattern("RSAChain", "a");
        replacement.add_edge("x", "x", "m", "m");
        let old = dict.add(replacement, AddPolicy::Overwrite).unwrap();
        assert_eq!(old.unwrap().edge_count(), 0);
        assert_eq!(dict.recover("RSAChain", "a").unwrap().edge_count(), 1);
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn recover_or_err_reports_key() {
        let dict = InitDictionary::new("inits");
        let key = PatternKey::new("RSAChain", "simple-RSA-chain");
        let err = dict.recover_or_err(&key).unwrap_err();
        assert_eq!(err.to_string(), "init bundle not found: RSAChain/simple-RSA-chain");
    }

    #[test]
    fn wire_form_rejects_duplicate_keys() {
        let text = r#"{
            "name": "patterns",
            "entries": [
                {"pattern_type": "T", "name": "a"},
                {"pattern_type": "T", "name": "a"}
            ]
        }"#;
        assert!(serde_json::from_str::<PatternDictionary>(text).is_err());
    }

    #[test]
    fn init_dictionary_roundtrip() {
        let mut dict = InitDictionary::new("inits");
        dict.add(InitBundle::new("RSAChain", "a", Format::Json), AddPolicy::Reject)
            .unwrap();
        dict.add(InitBundle::new("AESChain", "a", Format::Yaml), AddPolicy::Reject)
            .unwrap();
        let yaml = serde_yaml::to_string(&dict).unwrap();
        let back: InitDictionary = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, dict);
        let keys: Vec<String> = back.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["RSAChain/a", "AESChain/a"]);
    }
}
