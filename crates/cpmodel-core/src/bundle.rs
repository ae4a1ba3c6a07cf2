//! Initialization bundles.
//!
//! An [`InitBundle`] is the persisted companion of one [`CompPattern`]
//! (same pattern type, same instance name). It carries the message catalog
//! and, per function label, the encoded response table tagged with its
//! discipline and the format it was encoded in.
//!
//! Tables are stored encoded so a bundle can travel through either wire
//! format untouched, but all edits go through typed tables: decode, mutate,
//! re-encode ([`InitBundle::update_table`]). Stateful tables also publish a
//! snapshot of their state block, refreshed on every write.
//!
//! [`CompPattern`]: crate::CompPattern

use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::format::Format;
use crate::function::Discipline;
use crate::key::PatternKey;
use crate::message::{MessageCatalog, MessageType};
use crate::response::ResponseTable;
use crate::state::StateBlock;

/// One function's stored response table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionParams {
    pub discipline: Discipline,
    /// Format the table text is actually encoded in.
    pub format: Format,
    pub encoded: String,
}

impl FunctionParams {
    /// Decodes the stored text into a typed table.
    pub fn decode(&self) -> Result<ResponseTable, CoreError> {
        ResponseTable::decode(self.discipline, &self.encoded, self.format)
    }
}

/// Message catalog plus per-function tables for one pattern instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitBundle {
    pub pattern_type: String,
    pub name: String,
    /// Preferred encoding for the tables of this bundle.
    pub format: Format,
    #[serde(default)]
    messages: MessageCatalog,
    #[serde(default, deserialize_with = "label_map")]
    params: IndexMap<String, FunctionParams>,
    #[serde(
        default,
        skip_serializing_if = "IndexMap::is_empty",
        deserialize_with = "label_map"
    )]
    states: IndexMap<String, StateBlock>,
}

/// Reads a label-keyed map, accepting a repeated label only when both
/// entries are identical.
fn label_map<'de, D, V>(deserializer: D) -> Result<IndexMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de> + PartialEq,
{
    struct LabelMap<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de> + PartialEq> Visitor<'de> for LabelMap<V> {
        type Value = IndexMap<String, V>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map keyed by function label")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut map = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((label, value)) = access.next_entry::<String, V>()? {
                match map.get(&label) {
                    Some(existing) if *existing == value => {}
                    Some(_) => {
                        return Err(de::Error::custom(format_args!(
                            "conflicting entries for function '{label}'"
                        )));
                    }
                    None => {
                        map.insert(label, value);
                    }
                }
            }
            Ok(map)
        }
    }

    deserializer.deserialize_map(LabelMap(PhantomData))
}

impl InitBundle {
    pub fn new(pattern_type: impl Into<String>, name: impl Into<String>, format: Format) -> Self {
        InitBundle {
            pattern_type: pattern_type.into(),
            name: name.into(),
            format,
            messages: MessageCatalog::new(),
            params: IndexMap::new(),
            states: IndexMap::new(),
        }
    }

    pub fn key(&self) -> PatternKey {
        PatternKey::new(&self.pattern_type, &self.name)
    }

    // -----------------------------------------------------------------------
    // Messages
    // -----------------------------------------------------------------------

    /// Registers a message type; see [`MessageCatalog::add`].
    pub fn add_msg(&mut self, msg: MessageType) -> Result<(), CoreError> {
        self.messages.add(msg)
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    // -----------------------------------------------------------------------
    // Parameters
    // -----------------------------------------------------------------------

    /// Stores already-encoded parameters for `label`.
    ///
    /// Adding the same parameters twice is a no-op; adding different
    /// parameters under an existing label fails with
    /// [`CoreError::DivergentParams`]. Use [`replace_table`](Self::replace_table)
    /// to overwrite deliberately.
    pub fn add_param(&mut self, label: &str, params: FunctionParams) -> Result<(), CoreError> {
        match self.params.get(label) {
            Some(existing) if *existing == params => Ok(()),
            Some(_) => Err(CoreError::DivergentParams {
                label: label.to_string(),
            }),
            None => {
                self.params.insert(label.to_string(), params);
                Ok(())
            }
        }
    }

    /// Encodes `table` in the bundle's format (random tables fall back to
    /// YAML) and adds it under `label` with [`add_param`](Self::add_param)
    /// semantics.
    pub fn add_table(&mut self, label: &str, table: &ResponseTable) -> Result<(), CoreError> {
        let params = self.encode(table)?;
        self.add_param(label, params)?;
        self.refresh_state(label, table);
        Ok(())
    }

    /// Encodes `table` and stores it under `label`, replacing whatever was
    /// there.
    pub fn replace_table(&mut self, label: &str, table: &ResponseTable) -> Result<(), CoreError> {
        let params = self.encode(table)?;
        self.params.insert(label.to_string(), params);
        self.refresh_state(label, table);
        Ok(())
    }

    /// Decodes the table for `label`, lets `edit` mutate it, and stores the
    /// re-encoded result. The discipline cannot change.
    pub fn update_table<F>(&mut self, label: &str, edit: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut ResponseTable) -> Result<(), CoreError>,
    {
        let mut table = self.table(label)?;
        let declared = table.discipline();
        edit(&mut table)?;
        if table.discipline() != declared {
            return Err(CoreError::DisciplineMismatch {
                label: label.to_string(),
                declared,
                required: table.discipline(),
            });
        }
        self.replace_table(label, &table)
    }

    pub fn params(&self, label: &str) -> Option<&FunctionParams> {
        self.params.get(label)
    }

    /// Stored parameters in insertion order.
    pub fn all_params(&self) -> impl Iterator<Item = (&str, &FunctionParams)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Decodes the table stored for `label`.
    pub fn table(&self, label: &str) -> Result<ResponseTable, CoreError> {
        self.params
            .get(label)
            .ok_or_else(|| CoreError::ParamsNotFound {
                label: label.to_string(),
            })?
            .decode()
    }

    /// Decodes every stored table.
    pub fn decode_all(&self) -> Result<IndexMap<String, ResponseTable>, CoreError> {
        self.params
            .iter()
            .map(|(label, p)| Ok((label.clone(), p.decode()?)))
            .collect()
    }

    // -----------------------------------------------------------------------
    // State snapshots
    // -----------------------------------------------------------------------

    /// Published state of a stateful function.
    pub fn state_snapshot(&self, label: &str) -> Option<&StateBlock> {
        self.states.get(label)
    }

    pub fn state_snapshots(&self) -> impl Iterator<Item = (&str, &StateBlock)> {
        self.states.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn encode(&self, table: &ResponseTable) -> Result<FunctionParams, CoreError> {
        let (format, encoded) = table.encode(self.format)?;
        Ok(FunctionParams {
            discipline: table.discipline(),
            format,
            encoded,
        })
    }

    fn refresh_state(&mut self, label: &str, table: &ResponseTable) {
        match table.state() {
            Some(state) => {
                self.states.insert(label.to_string(), state.clone());
            }
            None => {
                self.states.shift_remove(label);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::FunctionNode;
    use crate::response::{InboundId, OutboundAction, TableBuilder};

    fn branch_table() -> ResponseTable {
        let node = FunctionNode::new("branch", "branch", Discipline::Stateful);
        let inbound = InboundId::new("gen", "data");
        let mut b = TableBuilder::for_function(&node);
        b.add_response(inbound.clone(), OutboundAction::routed("consumer1", "data", "consumer1"), 0.0)
            .unwrap()
            .add_response(inbound.clone(), OutboundAction::routed("consumer2", "data", "consumer2"), 0.0)
            .unwrap()
            .add_action(inbound, "branch-select", "branch-select")
            .unwrap()
            .set_state("threshold", "0.5")
            .unwrap()
            .set_state("visits", "0")
            .unwrap();
        b.build()
    }

    fn mixer_table() -> ResponseTable {
        let node = FunctionNode::new("route", "router", Discipline::Random);
        let mut b = TableBuilder::for_function(&node);
        b.set_distribution(
            InboundId::new("genA", "data"),
            [
                (OutboundAction::new("sinkX", "data"), 0.25),
                (OutboundAction::new("sinkY", "data"), 0.75),
            ],
        )
        .unwrap();
        b.build()
    }

    #[test]
    fn loading_divergent_params_rejected() {
        let json = r#"{
            "pattern_type": "RSAChain",
            "name": "simple-RSA-chain",
            "format": "json",
            "params": {
                "enc": {"discipline": "static", "format": "json", "encoded": "[]"},
                "enc": {"discipline": "random", "format": "yaml", "encoded": "{}"}
            }
        }"#;
        let err = serde_json::from_str::<InitBundle>(json).unwrap_err();
        assert!(err.to_string().contains("conflicting entries for function 'enc'"), "{err}");
    }

    #[test]
    fn loading_repeated_identical_params_is_idempotent() {
        let json = r#"{
            "pattern_type": "T",
            "name": "t",
            "format": "json",
            "params": {
                "sink": {"discipline": "static", "format": "json", "encoded": "[]"},
                "sink": {"discipline": "static", "format": "json", "encoded": "[]"}
            }
        }"#;
        let bundle: InitBundle = serde_json::from_str(json).unwrap();
        assert_eq!(bundle.all_params().count(), 1);
        assert_eq!(bundle.params("sink").unwrap().discipline, Discipline::Static);
    }

    #[test]
    fn add_table_roundtrips_in_both_formats() {
        for format in [Format::Json, Format::Yaml] {
            let mut bundle = InitBundle::new("BranchChain", "simple-branch", format);
            let table = branch_table();
            bundle.add_table("branch", &table).unwrap();
            assert_eq!(bundle.params("branch").unwrap().format, format);
            assert_eq!(bundle.table("branch").unwrap(), table);
        }
    }

    #[test]
    fn random_table_forced_to_yaml_and_recorded() {
        let mut bundle = InitBundle::new("MixChain", "simple-mix", Format::Json);
        bundle.add_table("router", &mixer_table()).unwrap();
        let params = bundle.params("router").unwrap();
        assert_eq!(params.discipline, Discipline::Random);
        assert_eq!(params.format, Format::Yaml);
        assert_eq!(bundle.table("router").unwrap(), mixer_table());
    }

    #[test]
    fn duplicate_add_param_policy() {
        let mut bundle = InitBundle::new("BranchChain", "simple-branch", Format::Json);
        bundle.add_table("branch", &branch_table()).unwrap();
        // Identical re-add is idempotent.
        bundle.add_table("branch", &branch_table()).unwrap();
        assert_eq!(bundle.all_params().count(), 1);

        // Divergent re-add is an error and leaves the original in place.
        let mut other = branch_table();
        other.state_mut().unwrap().set("threshold", "0.9");
        assert!(matches!(
            bundle.add_table("branch", &other),
            Err(CoreError::DivergentParams { .. })
        ));
        assert_eq!(
            bundle.table("branch").unwrap().state().unwrap().get("threshold"),
            Some("0.5")
        );
    }

    #[test]
    fn update_table_rewrites_state_and_snapshot() {
        let mut bundle = InitBundle::new("BranchChain", "simple-branch", Format::Yaml);
        bundle.add_table("branch", &branch_table()).unwrap();
        assert_eq!(bundle.state_snapshot("branch").unwrap().get("visits"), Some("0"));

        bundle
            .update_table("branch", |t| {
                t.state_mut()?.set("visits", "7");
                Ok(())
            })
            .unwrap();

        let table = bundle.table("branch").unwrap();
        assert_eq!(table.state().unwrap().get("visits"), Some("7"));
        assert_eq!(bundle.state_snapshot("branch").unwrap().get("visits"), Some("7"));
    }

    #[test]
    fn update_table_cannot_change_discipline() {
        let mut bundle = InitBundle::new("MixChain", "simple-mix", Format::Yaml);
        bundle.add_table("router", &mixer_table()).unwrap();
        let err = bundle
            .update_table("router", |t| {
                *t = ResponseTable::empty(Discipline::Static);
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::DisciplineMismatch { .. }));
        assert_eq!(bundle.table("router").unwrap(), mixer_table());
    }

    #[test]
    fn missing_label() {
        let bundle = InitBundle::new("T", "t", Format::Json);
        assert!(matches!(
            bundle.table("nobody"),
            Err(CoreError::ParamsNotFound { .. })
        ));
    }

    #[test]
    fn bundle_serde_roundtrip() {
        let mut bundle = InitBundle::new("MixChain", "simple-mix", Format::Json);
        bundle.add_msg(MessageType::new("data", 1500, 15000)).unwrap();
        bundle.add_table("router", &mixer_table()).unwrap();
        bundle.add_table("branch", &branch_table()).unwrap();

        let json = serde_json::to_string(&bundle).unwrap();
        let back: InitBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bundle);
        assert_eq!(back.decode_all().unwrap().len(), 2);
    }
}
