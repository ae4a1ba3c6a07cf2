//! Directed message edges between function nodes.
//!
//! An [`Edge`] names its endpoints by function label and carries a message
//! type plus a routing label. The routing label lets parallel edges between
//! the same two functions, carrying the same message type, be told apart by
//! the receiving function's select code. A self-loop (source == destination)
//! marks a function that initiates work on its own.

use serde::{Deserialize, Serialize};

use crate::response::{InboundId, OutboundAction};

/// A directed, labeled connection within one computation pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub src_label: String,
    pub dst_label: String,
    pub msg_type: String,
    /// Routing label. Need not equal the message type.
    pub edge_label: String,
}

impl Edge {
    pub fn new(
        src_label: impl Into<String>,
        dst_label: impl Into<String>,
        msg_type: impl Into<String>,
        edge_label: impl Into<String>,
    ) -> Self {
        Edge {
            src_label: src_label.into(),
            dst_label: dst_label.into(),
            msg_type: msg_type.into(),
            edge_label: edge_label.into(),
        }
    }

    /// Returns `true` if this edge expresses self-initiation.
    pub fn is_self_loop(&self) -> bool {
        self.src_label == self.dst_label
    }

    /// The identity under which the destination's table sees this edge.
    pub fn inbound(&self) -> InboundId {
        InboundId::new(&self.src_label, &self.msg_type)
    }

    /// The action the source emits when it sends along this edge.
    pub fn outbound(&self) -> OutboundAction {
        OutboundAction::routed(&self.dst_label, &self.msg_type, &self.edge_label)
    }

    /// Returns `true` if `action`, emitted by this edge's source, travels
    /// along this edge. An action with an empty routing label matches any
    /// routing label.
    pub fn carries(&self, action: &OutboundAction) -> bool {
        self.dst_label == action.dst_label
            && self.msg_type == action.msg_type
            && (action.edge_label.is_empty() || action.edge_label == self.edge_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_loop_detection() {
        assert!(Edge::new("src", "src", "initiate", "initiate").is_self_loop());
        assert!(!Edge::new("src", "encrypt", "data", "data").is_self_loop());
    }

    #[test]
    fn inbound_and_outbound_views() {
        let e = Edge::new("branch", "consumer1", "data", "consumer1");
        assert_eq!(e.inbound(), InboundId::new("branch", "data"));
        let out = e.outbound();
        assert_eq!(out.dst_label, "consumer1");
        assert_eq!(out.edge_label, "consumer1");
    }

    #[test]
    fn carries_respects_routing_label() {
        let e = Edge::new("branch", "consumer1", "data", "consumer1");
        assert!(e.carries(&OutboundAction::new("consumer1", "data")));
        assert!(e.carries(&OutboundAction::routed("consumer1", "data", "consumer1")));
        assert!(!e.carries(&OutboundAction::routed("consumer1", "data", "consumer2")));
        assert!(!e.carries(&OutboundAction::new("consumer2", "data")));
    }
}
