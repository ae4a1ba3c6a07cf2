//! Per-function response tables.
//!
//! A response table is a lookup keyed by [`InboundId`] (the prior hop's label
//! plus the message type). What it yields depends on the function's
//! discipline:
//!
//! - [`StaticTable`]: an ordered candidate list of ([`OutboundAction`], period).
//! - [`StatefulTable`]: the same candidates, plus one [`ActionDesc`] per
//!   inbound identity naming the select and cost code, plus a [`StateBlock`].
//! - [`RandomTable`]: a probability mass function over outbound actions.
//!
//! Static and stateful tables hold *candidate sets*: when several actions sit
//! under one inbound identity the function's select code chooses among them,
//! usually by routing label. Only random tables resolve ambiguity themselves.
//!
//! [`ResponseTable`] tags the three shapes so bundle and dictionary code can
//! handle them uniformly, and [`TableBuilder`] enforces that every call
//! matches the function's declared discipline.

use std::fmt;

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

use crate::error::CoreError;
use crate::format::Format;
use crate::function::{Discipline, FunctionNode};
use crate::state::StateBlock;

// ---------------------------------------------------------------------------
// Keys and actions
// ---------------------------------------------------------------------------

/// Routing key of a response table: who sent the message and what it is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InboundId {
    pub src_label: String,
    pub msg_type: String,
}

impl InboundId {
    pub fn new(src_label: impl Into<String>, msg_type: impl Into<String>) -> Self {
        InboundId {
            src_label: src_label.into(),
            msg_type: msg_type.into(),
        }
    }
}

impl fmt::Display for InboundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.src_label, self.msg_type)
    }
}

/// One message a function may emit.
///
/// Empty destination and message type together form the terminal sentinel:
/// the function consumes the message and emits nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OutboundAction {
    pub dst_label: String,
    pub msg_type: String,
    /// Routing label of the edge to travel; empty matches any.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub edge_label: String,
}

impl OutboundAction {
    pub fn new(dst_label: impl Into<String>, msg_type: impl Into<String>) -> Self {
        Self::routed(dst_label, msg_type, "")
    }

    pub fn routed(
        dst_label: impl Into<String>,
        msg_type: impl Into<String>,
        edge_label: impl Into<String>,
    ) -> Self {
        OutboundAction {
            dst_label: dst_label.into(),
            msg_type: msg_type.into(),
            edge_label: edge_label.into(),
        }
    }

    /// The "emit nothing" sentinel.
    pub fn terminal() -> Self {
        Self::new("", "")
    }

    pub fn is_terminal(&self) -> bool {
        self.dst_label.is_empty() && self.msg_type.is_empty()
    }
}

impl fmt::Display for OutboundAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_terminal() {
            return f.write_str("(terminal)");
        }
        write!(f, "({}, {}", self.dst_label, self.msg_type)?;
        if !self.edge_label.is_empty() {
            write!(f, " via {}", self.edge_label)?;
        }
        f.write_str(")")
    }
}

/// A candidate response: an action and the delay before it fires.
///
/// On a self-loop inbound identity a positive period means "repeat every
/// `period` time units"; a zero period is an immediate, single reaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub action: OutboundAction,
    pub period: f64,
}

/// Candidate responses registered under one inbound identity, in order.
pub type Candidates = SmallVec<[Response; 2]>;

/// Probability mass over outbound actions. Weights are stored as given.
pub type Pmf = IndexMap<OutboundAction, f64>;

fn check_period(inbound: &InboundId, period: f64) -> Result<(), CoreError> {
    if period.is_finite() && period >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidPeriod {
            inbound: inbound.to_string(),
            period,
        })
    }
}

// ---------------------------------------------------------------------------
// Candidate responses (shared by static and stateful)
// ---------------------------------------------------------------------------

/// Ordered map from inbound identity to candidate responses.
///
/// On the wire this is a list of `{inbound, responses}` entries so that it
/// stays representable in JSON, whose object keys must be strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Responses {
    map: IndexMap<InboundId, Candidates>,
}

impl Responses {
    /// Appends a candidate under `inbound`. Existing candidates are kept.
    pub fn add(
        &mut self,
        inbound: InboundId,
        action: OutboundAction,
        period: f64,
    ) -> Result<(), CoreError> {
        check_period(&inbound, period)?;
        self.map
            .entry(inbound)
            .or_default()
            .push(Response { action, period });
        Ok(())
    }

    /// Candidates under `inbound`, empty if none are registered.
    pub fn candidates(&self, inbound: &InboundId) -> &[Response] {
        self.map.get(inbound).map(|c| c.as_slice()).unwrap_or(&[])
    }

    /// Changes the period of the `index`-th candidate under `inbound`.
    pub fn set_period(
        &mut self,
        inbound: &InboundId,
        index: usize,
        period: f64,
    ) -> Result<(), CoreError> {
        check_period(inbound, period)?;
        let response = self
            .map
            .get_mut(inbound)
            .and_then(|c| c.get_mut(index))
            .ok_or_else(|| CoreError::ResponseNotFound {
                inbound: inbound.to_string(),
                index,
            })?;
        response.period = period;
        Ok(())
    }

    pub fn inbounds(&self) -> impl Iterator<Item = &InboundId> {
        self.map.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&InboundId, &[Response])> {
        self.map.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[derive(Serialize)]
struct EntryRef<'a> {
    inbound: &'a InboundId,
    responses: &'a Candidates,
}

#[derive(Deserialize)]
struct Entry {
    inbound: InboundId,
    responses: Candidates,
}

impl Serialize for Responses {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(
            self.map
                .iter()
                .map(|(inbound, responses)| EntryRef { inbound, responses }),
        )
    }
}

impl<'de> Deserialize<'de> for Responses {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<Entry>::deserialize(deserializer)?;
        let mut map = IndexMap::with_capacity(entries.len());
        for entry in entries {
            let key = entry.inbound.clone();
            if map.insert(entry.inbound, entry.responses).is_some() {
                return Err(D::Error::custom(format!(
                    "duplicate inbound identity {key}"
                )));
            }
        }
        Ok(Responses { map })
    }
}

// ---------------------------------------------------------------------------
// The three table shapes
// ---------------------------------------------------------------------------

/// Response table of a static function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticTable {
    pub responses: Responses,
}

/// Names the code the external engine runs for one inbound identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDesc {
    pub inbound: InboundId,
    /// Select code: picks among candidates, may read and write state.
    pub select: String,
    /// Cost code: timing model hook.
    pub cost: String,
}

/// Response table of a stateful function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatefulTable {
    pub responses: Responses,
    #[serde(default)]
    pub actions: Vec<ActionDesc>,
    #[serde(default)]
    pub state: StateBlock,
}

impl StatefulTable {
    /// Records the select/cost code for `inbound`, replacing any earlier
    /// descriptor for the same identity in place.
    pub fn add_action(
        &mut self,
        inbound: InboundId,
        select: impl Into<String>,
        cost: impl Into<String>,
    ) {
        let desc = ActionDesc {
            inbound,
            select: select.into(),
            cost: cost.into(),
        };
        match self.actions.iter_mut().find(|a| a.inbound == desc.inbound) {
            Some(existing) => *existing = desc,
            None => self.actions.push(desc),
        }
    }

    pub fn action_for(&self, inbound: &InboundId) -> Option<&ActionDesc> {
        self.actions.iter().find(|a| &a.inbound == inbound)
    }

    /// Sets one state entry, returning the previous value.
    pub fn set_state(&mut self, key: &str, value: &str) -> Option<String> {
        self.state.set(key, value)
    }
}

/// Response table of a random function.
///
/// Keys at both levels are composite structs, so the wire form is YAML only
/// (see [`Discipline::supports`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RandomTable {
    pub distributions: IndexMap<InboundId, Pmf>,
}

impl RandomTable {
    /// Establishes or replaces the full distribution for `inbound`.
    pub fn set_distribution(&mut self, inbound: InboundId, pmf: Pmf) -> Option<Pmf> {
        self.distributions.insert(inbound, pmf)
    }

    pub fn distribution(&self, inbound: &InboundId) -> Option<&Pmf> {
        self.distributions.get(inbound)
    }

    /// Picks an action for `inbound` given a uniform draw `u` in `[0, 1)`.
    ///
    /// Weights are scaled by their total at draw time; the stored weights are
    /// never renormalized. Returns `None` when there is no distribution or
    /// its total weight is not positive.
    pub fn choose(&self, inbound: &InboundId, u: f64) -> Option<&OutboundAction> {
        let pmf = self.distributions.get(inbound)?;
        let total: f64 = pmf.values().filter(|w| **w > 0.0).sum();
        if !(total > 0.0) {
            return None;
        }
        let target = u.clamp(0.0, 1.0) * total;
        let mut acc = 0.0;
        let mut last = None;
        for (action, &weight) in pmf.iter().filter(|(_, w)| **w > 0.0) {
            acc += weight;
            last = Some(action);
            if target < acc {
                return Some(action);
            }
        }
        last
    }
}

// ---------------------------------------------------------------------------
// Tagged table
// ---------------------------------------------------------------------------

/// A response table of any discipline.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseTable {
    Static(StaticTable),
    Stateful(StatefulTable),
    Random(RandomTable),
}

impl ResponseTable {
    /// An empty table of the given discipline.
    pub fn empty(discipline: Discipline) -> Self {
        match discipline {
            Discipline::Static => ResponseTable::Static(StaticTable::default()),
            Discipline::Stateful => ResponseTable::Stateful(StatefulTable::default()),
            Discipline::Random => ResponseTable::Random(RandomTable::default()),
        }
    }

    pub fn discipline(&self) -> Discipline {
        match self {
            ResponseTable::Static(_) => Discipline::Static,
            ResponseTable::Stateful(_) => Discipline::Stateful,
            ResponseTable::Random(_) => Discipline::Random,
        }
    }

    /// Capability query: can this table honor `format` exactly?
    pub fn supports(&self, format: Format) -> bool {
        self.discipline().supports(format)
    }

    /// The format [`encode`](Self::encode) will actually use when asked for
    /// `requested`. Random tables always resolve to YAML.
    pub fn encoding_for(&self, requested: Format) -> Format {
        if self.supports(requested) {
            requested
        } else {
            Format::Yaml
        }
    }

    /// Encodes the table, falling back to YAML where `requested` cannot
    /// represent it. Returns the format used alongside the text so callers
    /// can record it.
    pub fn encode(&self, requested: Format) -> Result<(Format, String), CoreError> {
        let format = self.encoding_for(requested);
        let text = match self {
            ResponseTable::Static(t) => format.encode(t)?,
            ResponseTable::Stateful(t) => format.encode(t)?,
            ResponseTable::Random(t) => format.encode(t)?,
        };
        Ok((format, text))
    }

    /// Encodes the table in exactly `format`, failing if it cannot.
    pub fn encode_strict(&self, format: Format) -> Result<String, CoreError> {
        if !self.supports(format) {
            return Err(CoreError::UnsupportedFormat {
                discipline: self.discipline(),
                format,
            });
        }
        self.encode(format).map(|(_, text)| text)
    }

    /// Rebuilds a typed table from its encoded text.
    pub fn decode(discipline: Discipline, text: &str, format: Format) -> Result<Self, CoreError> {
        if !discipline.supports(format) {
            return Err(CoreError::UnsupportedFormat { discipline, format });
        }
        Ok(match discipline {
            Discipline::Static => ResponseTable::Static(format.decode(text)?),
            Discipline::Stateful => ResponseTable::Stateful(format.decode(text)?),
            Discipline::Random => ResponseTable::Random(format.decode(text)?),
        })
    }

    /// All inbound identities this table reacts to, in table order.
    pub fn inbounds(&self) -> Vec<&InboundId> {
        match self {
            ResponseTable::Static(t) => t.responses.inbounds().collect(),
            ResponseTable::Stateful(t) => t.responses.inbounds().collect(),
            ResponseTable::Random(t) => t.distributions.keys().collect(),
        }
    }

    /// Every action the table may emit for `inbound`.
    pub fn actions_for(&self, inbound: &InboundId) -> Vec<&OutboundAction> {
        match self {
            ResponseTable::Static(_) | ResponseTable::Stateful(_) => self
                .responses()
                .map(|r| r.candidates(inbound).iter().map(|c| &c.action).collect())
                .unwrap_or_default(),
            ResponseTable::Random(t) => t
                .distribution(inbound)
                .map(|pmf| pmf.keys().collect())
                .unwrap_or_default(),
        }
    }

    /// Candidate responses, for disciplines that have them.
    pub fn responses(&self) -> Option<&Responses> {
        match self {
            ResponseTable::Static(t) => Some(&t.responses),
            ResponseTable::Stateful(t) => Some(&t.responses),
            ResponseTable::Random(_) => None,
        }
    }

    /// Changes one candidate's period. Random tables carry no periods.
    pub fn set_period(
        &mut self,
        inbound: &InboundId,
        index: usize,
        period: f64,
    ) -> Result<(), CoreError> {
        match self {
            ResponseTable::Static(t) => t.responses.set_period(inbound, index, period),
            ResponseTable::Stateful(t) => t.responses.set_period(inbound, index, period),
            ResponseTable::Random(_) => Err(CoreError::NotApplicable {
                discipline: Discipline::Random,
                what: "periods",
            }),
        }
    }

    pub fn state(&self) -> Option<&StateBlock> {
        match self {
            ResponseTable::Stateful(t) => Some(&t.state),
            _ => None,
        }
    }

    /// Mutable state block; fails for non-stateful tables.
    pub fn state_mut(&mut self) -> Result<&mut StateBlock, CoreError> {
        match self {
            ResponseTable::Stateful(t) => Ok(&mut t.state),
            other => Err(CoreError::NotApplicable {
                discipline: other.discipline(),
                what: "state block",
            }),
        }
    }

    pub fn as_static(&self) -> Option<&StaticTable> {
        match self {
            ResponseTable::Static(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_stateful(&self) -> Option<&StatefulTable> {
        match self {
            ResponseTable::Stateful(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_random(&self) -> Option<&RandomTable> {
        match self {
            ResponseTable::Random(t) => Some(t),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

fn mismatch(label: &str, declared: Discipline, required: Discipline) -> CoreError {
    CoreError::DisciplineMismatch {
        label: label.to_string(),
        declared,
        required,
    }
}

/// Builds the response table for one function, rejecting any call that does
/// not fit the function's declared discipline.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    label: String,
    table: ResponseTable,
}

impl TableBuilder {
    pub fn for_function(node: &FunctionNode) -> Self {
        TableBuilder {
            label: node.label.clone(),
            table: ResponseTable::empty(node.discipline),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }


    /// Appends a candidate response (static and stateful functions).
    pub fn add_response(
        &mut self,
        inbound: InboundId,
        action: OutboundAction,
        period: f64,
    ) -> Result<&mut Self, CoreError> {
        match &mut self.table {
            ResponseTable::Static(t) => t.responses.add(inbound, action, period)?,
            ResponseTable::Stateful(t) => t.responses.add(inbound, action, period)?,
            other => return Err(mismatch(&self.label, other.discipline(), Discipline::Static)),
        }
        Ok(self)
    }

    /// Sets the whole distribution for `inbound` (random functions).
    pub fn set_distribution(
        &mut self,
        inbound: InboundId,
        pmf: impl IntoIterator<Item = (OutboundAction, f64)>,
    ) -> Result<&mut Self, CoreError> {
        match &mut self.table {
            ResponseTable::Random(t) => {
                t.set_distribution(inbound, pmf.into_iter().collect());
            }
            other => return Err(mismatch(&self.label, other.discipline(), Discipline::Random)),
        }
        Ok(self)
    }

    /// Names the select and cost code for `inbound` (stateful functions).
    pub fn add_action(
        &mut self,
        inbound: InboundId,
        select: &str,
        cost: &str,
    ) -> Result<&mut Self, CoreError> {
        match &mut self.table {
            ResponseTable::Stateful(t) => t.add_action(inbound, select, cost),
            other => {
                return Err(mismatch(&self.label, other.discipline(), Discipline::Stateful))
            }
        }
        Ok(self)
    }

    /// Seeds one state entry (stateful functions).
    pub fn set_state(&mut self, key: &str, value: &str) -> Result<&mut Self, CoreError> {
        match &mut self.table {
            ResponseTable::Stateful(t) => {
                t.set_state(key, value);
            }
            other => {
                return Err(mismatch(&self.label, other.discipline(), Discipline::Stateful))
            }
        }
        Ok(self)
    }

    pub fn build(self) -> ResponseTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch_node() -> FunctionNode {
        FunctionNode::new("branch", "branch", Discipline::Stateful)
    }

    #[test]
    fn terminal_sentinel() {
        assert!(OutboundAction::terminal().is_terminal());
        assert!(!OutboundAction::new("sink", "data").is_terminal());
        assert_eq!(OutboundAction::terminal().to_string(), "(terminal)");
    }

    #[test]
    fn candidates_keep_registration_order() {
        let mut b = TableBuilder::for_function(&branch_node());
        let inbound = InboundId::new("gen", "data");
        b.add_response(inbound.clone(), OutboundAction::routed("consumer1", "data", "consumer1"), 0.0)
            .unwrap()
            .add_response(inbound.clone(), OutboundAction::routed("consumer2", "data", "consumer2"), 0.0)
            .unwrap();
        let table = b.build();
        let actions = table.actions_for(&inbound);
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].dst_label, "consumer1");
        assert_eq!(actions[1].dst_label, "consumer2");
    }

    #[test]
    fn builder_rejects_wrong_discipline() {
        let node = FunctionNode::new("encrypt", "encrypt", Discipline::Static);
        let mut b = TableBuilder::for_function(&node);
        let err = b
            .set_distribution(InboundId::new("src", "data"), [(OutboundAction::new("x", "y"), 1.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::DisciplineMismatch {
                declared: Discipline::Static,
                required: Discipline::Random,
                ..
            }
        ));
        assert!(b.add_action(InboundId::new("src", "data"), "sel", "sel").is_err());
        assert!(b.set_state("k", "v").is_err());

        let node = FunctionNode::new("router", "router", Discipline::Random);
        let mut b = TableBuilder::for_function(&node);
        assert!(b
            .add_response(InboundId::new("a", "data"), OutboundAction::new("b", "data"), 0.0)
            .is_err());
    }

    #[test]
    fn negative_or_nan_period_rejected() {
        let node = FunctionNode::new("src", "src", Discipline::Static);
        let mut b = TableBuilder::for_function(&node);
        let inbound = InboundId::new("src", "initiate");
        assert!(matches!(
            b.add_response(inbound.clone(), OutboundAction::new("e", "data"), -1.0),
            Err(CoreError::InvalidPeriod { .. })
        ));
        assert!(b
            .add_response(inbound, OutboundAction::new("e", "data"), f64::NAN)
            .is_err());
    }

    #[test]
    fn set_period_in_place() {
        let node = FunctionNode::new("src", "src", Discipline::Static);
        let mut b = TableBuilder::for_function(&node);
        let inbound = InboundId::new("src", "initiate");
        b.add_response(inbound.clone(), OutboundAction::new("encrypt", "data"), 1.0)
            .unwrap();
        let mut table = b.build();
        table.set_period(&inbound, 0, 2.5).unwrap();
        assert_eq!(table.responses().unwrap().candidates(&inbound)[0].period, 2.5);
        assert!(matches!(
            table.set_period(&inbound, 1, 2.5),
            Err(CoreError::ResponseNotFound { index: 1, .. })
        ));
    }

    #[test]
    fn stateful_action_replaced_not_duplicated() {
        let mut t = StatefulTable::default();
        let inbound = InboundId::new("gen", "data");
        t.add_action(inbound.clone(), "branch-select", "branch-select");
        t.add_action(inbound.clone(), "branch-select-v2", "branch-cost");
        assert_eq!(t.actions.len(), 1);
        assert_eq!(t.action_for(&inbound).unwrap().select, "branch-select-v2");
    }

    #[test]
    fn random_choose_follows_weights() {
        let inbound = InboundId::new("genA", "data");
        let mut t = RandomTable::default();
        t.set_distribution(
            inbound.clone(),
            [
                (OutboundAction::new("sinkX", "data"), 0.25),
                (OutboundAction::new("sinkY", "data"), 0.75),
            ]
            .into_iter()
            .collect(),
        );
        assert_eq!(t.choose(&inbound, 0.0).unwrap().dst_label, "sinkX");
        assert_eq!(t.choose(&inbound, 0.2).unwrap().dst_label, "sinkX");
        assert_eq!(t.choose(&inbound, 0.3).unwrap().dst_label, "sinkY");
        assert_eq!(t.choose(&inbound, 0.999).unwrap().dst_label, "sinkY");
        assert!(t.choose(&InboundId::new("genB", "data"), 0.5).is_none());
    }

    #[test]
    fn random_table_refuses_json() {
        let mut t = RandomTable::default();
        t.set_distribution(
            InboundId::new("genA", "data"),
            [(OutboundAction::new("sinkX", "data"), 1.0)].into_iter().collect(),
        );
        // Composite map keys are not JSON object keys.
        assert!(serde_json::to_string(&t).is_err());

        let table = ResponseTable::Random(t);
        assert!(!table.supports(Format::Json));
        assert_eq!(table.encoding_for(Format::Json), Format::Yaml);
        assert!(matches!(
            table.encode_strict(Format::Json),
            Err(CoreError::UnsupportedFormat { .. })
        ));
        let (format, _) = table.encode(Format::Json).unwrap();
        assert_eq!(format, Format::Yaml);
    }

    #[test]
    fn responses_wire_form_is_entry_list() {
        let mut r = Responses::default();
        r.add(InboundId::new("src", "initiate"), OutboundAction::new("encrypt", "data"), 1.0)
            .unwrap();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json[0]["inbound"]["src_label"], "src");
        assert_eq!(json[0]["responses"][0]["action"]["dst_label"], "encrypt");
        assert_eq!(json[0]["responses"][0]["period"], 1.0);
        // Empty routing label is omitted.
        assert!(json[0]["responses"][0]["action"].get("edge_label").is_none());
    }

    #[test]
    fn responses_reject_duplicate_inbound_on_decode() {
        let text = r#"[
            {"inbound": {"src_label": "a", "msg_type": "m"}, "responses": []},
            {"inbound": {"src_label": "a", "msg_type": "m"}, "responses": []}
        ]"#;
        assert!(serde_json::from_str::<Responses>(text).is_err());
    }
}
