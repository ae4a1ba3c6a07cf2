//! Reachability from self-initiating functions.
//!
//! Work enters a pattern only through self-loops. A function no self-loop
//! function can reach along the pattern's edges never runs.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;

use cpmodel_core::CompPattern;

use crate::diagnostics::Diagnostic;

/// The pattern as a petgraph graph, plus the label → index map.
///
/// Node weights are function labels, edge weights message types. Edges with
/// an endpoint that is not a function are left out.
pub fn pattern_graph(pattern: &CompPattern) -> (DiGraph<&str, &str>, HashMap<&str, NodeIndex>) {
    let mut graph = DiGraph::new();
    let mut index = HashMap::new();
    for (label, _) in pattern.functions() {
        index.insert(label, graph.add_node(label));
    }
    for edge in pattern.edges() {
        if let (Some(&a), Some(&b)) = (
            index.get(edge.src_label.as_str()),
            index.get(edge.dst_label.as_str()),
        ) {
            graph.add_edge(a, b, edge.msg_type.as_str());
        }
    }
    (graph, index)
}

/// Warns about functions unreachable from every self-loop, or about a
/// pattern with no self-loop at all.
pub fn check_reachability(pattern: &CompPattern) -> Vec<Diagnostic> {
    if pattern.function_count() == 0 {
        return Vec::new();
    }

    let (graph, index) = pattern_graph(pattern);
    let starts: Vec<NodeIndex> = pattern
        .self_loops()
        .filter_map(|e| index.get(e.src_label.as_str()).copied())
        .collect();
    if starts.is_empty() {
        return vec![Diagnostic::NoSelfInitiation {
            pattern: pattern.key(),
        }];
    }

    let mut reached = HashSet::new();
    for start in starts {
        if reached.contains(&start) {
            continue;
        }
        let mut bfs = Bfs::new(&graph, start);
        while let Some(nx) = bfs.next(&graph) {
            reached.insert(nx);
        }
    }

    pattern
        .functions()
        .filter(|(label, _)| !reached.contains(&index[label]))
        .map(|(label, _)| Diagnostic::Unreachable {
            label: label.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpmodel_core::{Discipline, FunctionNode};

    fn with_functions(labels: &[&str]) -> CompPattern {
        let mut cp = CompPattern::new("T", "a");
        for label in labels {
            cp.add_function(FunctionNode::new("f", *label, Discipline::Static))
                .unwrap();
        }
        cp
    }

    #[test]
    fn graph_skips_dangling_edges() {
        let mut cp = with_functions(&["a", "b"]);
        cp.add_edge("a", "b", "m", "m");
        cp.add_edge("a", "ghost", "m", "m");
        let (graph, index) = pattern_graph(&cp);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph[index["b"]], "b");
    }

    #[test]
    fn unreachable_functions_warned() {
        let mut cp = with_functions(&["src", "mid", "sink", "island"]);
        cp.add_edge("src", "src", "initiate", "initiate");
        cp.add_edge("src", "mid", "data", "data");
        cp.add_edge("mid", "sink", "data", "data");
        cp.add_edge("island", "sink", "data", "data");

        let found = check_reachability(&cp);
        assert_eq!(
            found,
            vec![Diagnostic::Unreachable {
                label: "island".into()
            }]
        );
    }

    #[test]
    fn no_self_loop_warned_once() {
        let mut cp = with_functions(&["a", "b"]);
        cp.add_edge("a", "b", "m", "m");
        let found = check_reachability(&cp);
        assert_eq!(found.len(), 1);
        assert!(matches!(found[0], Diagnostic::NoSelfInitiation { .. }));
    }

    #[test]
    fn every_self_loop_is_a_start() {
        let mut cp = with_functions(&["genA", "genB", "router"]);
        cp.add_edge("genA", "genA", "initiate", "initiate");
        cp.add_edge("genB", "genB", "initiate", "initiate");
        cp.add_edge("genB", "router", "data", "data");
        assert!(check_reachability(&cp).is_empty());
    }
}
