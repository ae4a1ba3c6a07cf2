//! Mutable state blocks for stateful functions.
//!
//! The select code of a stateful function keeps counters, thresholds and
//! flags here between invocations. Keys and values are strings; typed access
//! goes through [`StateBlock::parse`]. Which keys a select code needs is a
//! schema contract checked by `cpmodel-check`, not by this type.

use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// String-keyed, string-valued persistent memory of one function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateBlock(IndexMap<String, String>);

impl StateBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Parses the value under `key`. A missing key yields `Ok(None)`.
    pub fn parse<T: FromStr>(&self, key: &str) -> Result<Option<T>, CoreError> {
        match self.0.get(key) {
            None => Ok(None),
            Some(value) => value.parse().map(Some).map_err(|_| CoreError::StateValue {
                key: key.to_string(),
                value: value.clone(),
                expected: std::any::type_name::<T>(),
            }),
        }
    }

    /// Returns the keys from `required` that are absent.
    pub fn missing<'a>(&self, required: &'a [String]) -> Vec<&'a str> {
        required
            .iter()
            .filter(|key| !self.0.contains_key(key.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StateBlock {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        StateBlock(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
