//! Structural checks on a pattern alone.

use cpmodel_core::CompPattern;

use crate::diagnostics::Diagnostic;

/// Reports dangling edge endpoints and empty names.
pub fn validate_pattern(pattern: &CompPattern) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    for (label, node) in pattern.functions() {
        if label.is_empty() {
            out.push(Diagnostic::EmptyName {
                field: "function label".into(),
                owner: format!("function of type '{}'", node.func_type),
            });
        }
        if node.func_type.is_empty() {
            out.push(Diagnostic::EmptyName {
                field: "function type".into(),
                owner: format!("function '{label}'"),
            });
        }
    }

    for edge in pattern.edges() {
        for endpoint in [&edge.src_label, &edge.dst_label] {
            if !pattern.contains_function(endpoint) {
                out.push(Diagnostic::DanglingEdge {
                    src_label: edge.src_label.clone(),
                    dst_label: edge.dst_label.clone(),
                    msg_type: edge.msg_type.clone(),
                    missing: endpoint.clone(),
                });
                // A self-loop names its missing function once.
                if edge.is_self_loop() {
                    break;
                }
            }
        }
        if edge.msg_type.is_empty() {
            out.push(Diagnostic::EmptyName {
                field: "message type".into(),
                owner: format!("edge {} -> {}", edge.src_label, edge.dst_label),
            });
        }
    }

    out
}
