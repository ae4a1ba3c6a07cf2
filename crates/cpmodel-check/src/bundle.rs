//! Cross-checks between a pattern and its initialization bundle.
//!
//! The pattern is the source of truth for which functions and edges exist.
//! Each stored table is decoded and every inbound identity, outbound action
//! and message type it mentions is matched against the pattern and the
//! message catalog.

use cpmodel_core::{
    CompPattern, InboundId, InitBundle, OutboundAction, Pmf, ResponseTable, Responses,
    StatefulTable,
};

use crate::diagnostics::Diagnostic;
use crate::schema::StateSchemas;

/// Tolerance for the weight-sum warning.
const WEIGHT_EPSILON: f64 = 1e-9;

/// Checks `bundle` against `pattern`.
///
/// A key mismatch is reported and nothing further is checked.
pub fn validate_bundle(
    pattern: &CompPattern,
    bundle: &InitBundle,
    schemas: &StateSchemas,
) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    if pattern.key() != bundle.key() {
        out.push(Diagnostic::KeyMismatch {
            pattern: pattern.key(),
            bundle: bundle.key(),
        });
        return out;
    }

    for edge in pattern.edges() {
        if !edge.msg_type.is_empty() && !bundle.messages().contains(&edge.msg_type) {
            out.push(Diagnostic::UnknownMessage {
                label: edge.src_label.clone(),
                msg_type: edge.msg_type.clone(),
            });
        }
    }

    for (label, _) in pattern.functions() {
        if bundle.params(label).is_none() {
            out.push(Diagnostic::MissingParams {
                label: label.to_string(),
            });
        }
    }

    for (label, params) in bundle.all_params() {
        let Some(node) = pattern.function(label) else {
            out.push(Diagnostic::UnknownFunction {
                label: label.to_string(),
            });
            continue;
        };
        if node.discipline != params.discipline {
            out.push(Diagnostic::DisciplineConflict {
                label: label.to_string(),
                declared: node.discipline,
                stored: params.discipline,
            });
            continue;
        }
        let table = match params.decode() {
            Ok(table) => table,
            Err(e) => {
                out.push(Diagnostic::UndecodableTable {
                    label: label.to_string(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let mut check = TableCheck {
            pattern,
            bundle,
            label,
            out: &mut out,
        };
        check.routing(&table);
        match &table {
            ResponseTable::Static(t) => check.periods(&t.responses),
            ResponseTable::Stateful(t) => {
                check.periods(&t.responses);
                check.stateful(t, schemas);
            }
            ResponseTable::Random(t) => {
                for (inbound, pmf) in &t.distributions {
                    check.weights(inbound, pmf);
                }
            }
        }

        if bundle.state_snapshot(label) != table.state() {
            out.push(Diagnostic::StaleSnapshot {
                label: label.to_string(),
            });
        }
    }

    out
}

/// Per-table checks; pushes into the shared diagnostic list.
struct TableCheck<'a> {
    pattern: &'a CompPattern,
    bundle: &'a InitBundle,
    label: &'a str,
    out: &'a mut Vec<Diagnostic>,
}

impl TableCheck<'_> {
    fn push(&mut self, d: Diagnostic) {
        self.out.push(d);
    }

    fn routing(&mut self, table: &ResponseTable) {
        for inbound in table.inbounds() {
            let delivered = self
                .pattern
                .edges_into(self.label)
                .any(|e| e.inbound() == *inbound);
            if !delivered {
                self.push(Diagnostic::UnmatchedInbound {
                    label: self.label.to_string(),
                    inbound: inbound.clone(),
                });
            }
            self.message(&inbound.msg_type);

            for action in table.actions_for(inbound) {
                self.outbound(action);
            }
        }
    }

    fn outbound(&mut self, action: &OutboundAction) {
        if action.is_terminal() {
            return;
        }
        let carried = self
            .pattern
            .edges_out_of(self.label)
            .any(|e| e.carries(action));
        if !carried {
            self.push(Diagnostic::UnmatchedOutbound {
                label: self.label.to_string(),
                action: action.clone(),
            });
        }
        self.message(&action.msg_type);
    }

    fn message(&mut self, msg_type: &str) {
        // Edges already report their own unknown messages; only report here
        // for names no edge uses.
        let on_edge = self.pattern.edges().iter().any(|e| e.msg_type == msg_type);
        if !on_edge && !self.bundle.messages().contains(msg_type) {
            self.push(Diagnostic::UnknownMessage {
                label: self.label.to_string(),
                msg_type: msg_type.to_string(),
            });
        }
    }

    fn periods(&mut self, responses: &Responses) {
        for (inbound, candidates) in responses.iter() {
            for response in candidates {
                let period = response.period;
                if !period.is_finite() || period < 0.0 {
                    self.push(Diagnostic::InvalidPeriod {
                        label: self.label.to_string(),
                        inbound: inbound.clone(),
                        period,
                    });
                } else if period > 0.0 && inbound.src_label != self.label {
                    self.push(Diagnostic::ReactivePeriod {
                        label: self.label.to_string(),
                        inbound: inbound.clone(),
                        period,
                    });
                }
            }
        }
    }

    fn stateful(&mut self, table: &StatefulTable, schemas: &StateSchemas) {
        for (inbound, candidates) in table.responses.iter() {
            if !candidates.is_empty() && table.action_for(inbound).is_none() {
                self.push(Diagnostic::MissingActionDescriptor {
                    label: self.label.to_string(),
                    inbound: inbound.clone(),
                });
            }
        }
        for desc in &table.actions {
            for key in table.state.missing(schemas.required_for(&desc.select)) {
                self.push(Diagnostic::MissingStateKey {
                    label: self.label.to_string(),
                    select: desc.select.clone(),
                    key: key.to_string(),
                });
            }
        }
    }

    fn weights(&mut self, inbound: &InboundId, pmf: &Pmf) {
        for (action, &weight) in pmf {
            if weight < 0.0 || !weight.is_finite() {
                self.push(Diagnostic::NegativeWeight {
                    label: self.label.to_string(),
                    inbound: inbound.clone(),
                    action: action.clone(),
                    weight,
                });
            }
        }
        let total: f64 = pmf.values().sum();
        if (total - 1.0).abs() > WEIGHT_EPSILON {
            self.push(Diagnostic::WeightSum {
                label: self.label.to_string(),
                inbound: inbound.clone(),
                total,
            });
        }
    }
}
