//! Computation patterns: named graphs of function nodes and message edges.
//!
//! [`CompPattern`] is the unit stored in the pattern dictionary. It owns its
//! function nodes (label-keyed, insertion ordered) and an ordered edge list.
//! Construction does not check that edges reference existing functions;
//! `cpmodel-check` runs that pass before a pattern is handed to the engine.
//!
//! On the wire the function nodes are a plain list. Loading replays the list
//! through [`CompPattern::add_function`], so a file cannot smuggle in two
//! definitions of one label.

use indexmap::IndexMap;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::edge::Edge;
use crate::error::CoreError;
use crate::function::FunctionNode;
use crate::key::PatternKey;

/// A named directed graph of function nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompPattern {
    /// Pattern type name, e.g. `RSAChain`.
    pub pattern_type: String,
    /// Instance name, e.g. `simple-RSA-chain`.
    pub name: String,
    functions: IndexMap<String, FunctionNode>,
    edges: Vec<Edge>,
}

#[derive(Serialize)]
struct PatternOut<'a> {
    pattern_type: &'a str,
    name: &'a str,
    functions: Vec<&'a FunctionNode>,
    edges: &'a [Edge],
}

#[derive(Deserialize)]
struct PatternIn {
    pattern_type: String,
    name: String,
    #[serde(default)]
    functions: Vec<FunctionNode>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl Serialize for CompPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PatternOut {
            pattern_type: &self.pattern_type,
            name: &self.name,
            functions: self.functions.values().collect(),
            edges: &self.edges,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CompPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = PatternIn::deserialize(deserializer)?;
        let mut cp = CompPattern::new(wire.pattern_type, wire.name);
        for node in wire.functions {
            cp.add_function(node).map_err(de::Error::custom)?;
        }
        cp.edges = wire.edges;
        Ok(cp)
    }
}

impl CompPattern {
    pub fn new(pattern_type: impl Into<String>, name: impl Into<String>) -> Self {
        CompPattern {
            pattern_type: pattern_type.into(),
            name: name.into(),
            functions: IndexMap::new(),
            edges: Vec::new(),
        }
    }

    pub fn key(&self) -> PatternKey {
        PatternKey::new(&self.pattern_type, &self.name)
    }

    // -----------------------------------------------------------------------
    // Functions
    // -----------------------------------------------------------------------

    /// Adds a function node.
    ///
    /// Re-adding an identical node is a no-op. A node whose label is taken
    /// by a node with a different type or discipline is rejected, so a
    /// pattern never holds two definitions of one label.
    pub fn add_function(&mut self, node: FunctionNode) -> Result<(), CoreError> {
        match self.functions.get(&node.label) {
            Some(existing) if *existing == node => Ok(()),
            Some(existing) => Err(CoreError::DuplicateFunction {
                label: node.label.clone(),
                existing: format!("{} ({})", existing.func_type, existing.discipline),
                incoming: format!("{} ({})", node.func_type, node.discipline),
            }),
            None => {
                self.functions.insert(node.label.clone(), node);
                Ok(())
            }
        }
    }

    pub fn function(&self, label: &str) -> Option<&FunctionNode> {
        self.functions.get(label)
    }

    pub fn contains_function(&self, label: &str) -> bool {
        self.functions.contains_key(label)
    }

    /// Function nodes in insertion order, with the key each is stored under.
    pub fn functions(&self) -> impl Iterator<Item = (&str, &FunctionNode)> {
        self.functions.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    // -----------------------------------------------------------------------
    // Edges
    // -----------------------------------------------------------------------

    /// Appends an edge. Endpoint labels are not checked here.
    pub fn add_edge(
        &mut self,
        src_label: &str,
        dst_label: &str,
        msg_type: &str,
        edge_label: &str,
    ) {
        self.edges
            .push(Edge::new(src_label, dst_label, msg_type, edge_label));
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges whose destination is `label` (self-loops included).
    pub fn edges_into<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.dst_label == label)
    }

    /// Edges whose source is `label` (self-loops included).
    pub fn edges_out_of<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.src_label == label)
    }

    /// Self-loop edges, i.e. the points where work is initiated.
    pub fn self_loops(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| e.is_self_loop())
    }
}
