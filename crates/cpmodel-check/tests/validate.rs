//! Whole-pair validation and walks over a branching stateful chain.

use cpmodel_check::{validate, walk, Diagnostic, Severity, StateSchemas, WalkConfig};
use cpmodel_core::{
    CompPattern, Discipline, Format, FunctionNode, InboundId, InitBundle, MessageType,
    OutboundAction, ResponseTable, TableBuilder,
};
use proptest::prelude::*;

/// gen (self-loop every 1.0) → branch (stateful) → c1 | c2 by routing label.
fn branch_chain() -> (CompPattern, InitBundle, StateSchemas) {
    let gen = FunctionNode::new("generate", "gen", Discipline::Static);
    let branch = FunctionNode::new("branch", "branch", Discipline::Stateful);
    let c1 = FunctionNode::new("consume", "c1", Discipline::Static);
    let c2 = FunctionNode::new("consume", "c2", Discipline::Static);

    let mut cp = CompPattern::new("BranchChain", "simple-branch");
    for node in [&gen, &branch, &c1, &c2] {
        cp.add_function(node.clone()).unwrap();
    }
    cp.add_edge("gen", "gen", "initiate", "initiate");
    cp.add_edge("gen", "branch", "data", "data");
    cp.add_edge("branch", "c1", "data", "c1");
    cp.add_edge("branch", "c2", "data", "c2");

    let mut bundle = InitBundle::new("BranchChain", "simple-branch", Format::Json);
    bundle.add_msg(MessageType::new("initiate", 64, 64)).unwrap();
    bundle.add_msg(MessageType::new("data", 1500, 15000)).unwrap();

    let mut b = TableBuilder::for_function(&gen);
    b.add_response(
        InboundId::new("gen", "initiate"),
        OutboundAction::new("branch", "data"),
        1.0,
    )
    .unwrap();
    bundle.add_table("gen", &b.build()).unwrap();

    let from_gen = InboundId::new("gen", "data");
    let mut b = TableBuilder::for_function(&branch);
    b.add_response(from_gen.clone(), OutboundAction::routed("c1", "data", "c1"), 0.0)
        .unwrap()
        .add_response(from_gen.clone(), OutboundAction::routed("c2", "data", "c2"), 0.0)
        .unwrap()
        .add_action(from_gen, "branch-select", "branch-select")
        .unwrap()
        .set_state("threshold", "0.5")
        .unwrap()
        .set_state("visits", "0")
        .unwrap();
    bundle.add_table("branch", &b.build()).unwrap();

    for (node, label) in [(&c1, "c1"), (&c2, "c2")] {
        let mut b = TableBuilder::for_function(node);
        b.add_response(
            InboundId::new("branch", "data"),
            OutboundAction::terminal(),
            0.0,
        )
        .unwrap();
        bundle.add_table(label, &b.build()).unwrap();
    }

    let mut schemas = StateSchemas::new();
    schemas.require("branch-select", ["threshold", "visits"]);
    (cp, bundle, schemas)
}

#[test]
fn branch_chain_is_clean() {
    let (cp, bundle, schemas) = branch_chain();
    let report = validate(&cp, Some(&bundle), &schemas);
    assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);
    assert!(!report.has_errors());
}

#[test]
fn pattern_only_validation_skips_bundle_checks() {
    let (cp, _, schemas) = branch_chain();
    let report = validate(&cp, None, &schemas);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn discipline_conflict_reported() {
    let (cp, mut bundle, schemas) = branch_chain();

    // Store c1 as stateful although the pattern declares it static.
    let as_stateful = FunctionNode::new("consume", "c1", Discipline::Stateful);
    bundle
        .replace_table("c1", &TableBuilder::for_function(&as_stateful).build())
        .unwrap();

    let report = validate(&cp, Some(&bundle), &schemas);
    assert!(report.has_errors());
    assert!(report.diagnostics.contains(&Diagnostic::DisciplineConflict {
        label: "c1".into(),
        declared: Discipline::Static,
        stored: Discipline::Stateful,
    }));
    assert_eq!(report.count(Severity::Warning), 0);
}

#[test]
fn state_edit_keeps_snapshot_current() {
    let (cp, mut bundle, schemas) = branch_chain();
    bundle
        .update_table("branch", |t| {
            t.state_mut()?.set("visits", "3");
            Ok(())
        })
        .unwrap();
    assert_eq!(
        bundle.state_snapshot("branch").unwrap().get("visits"),
        Some("3")
    );
    assert!(validate(&cp, Some(&bundle), &schemas).diagnostics.is_empty());

    let table = bundle.table("branch").unwrap();
    assert!(matches!(table, ResponseTable::Stateful(_)));
}

#[test]
fn walk_fans_out_to_both_consumers() {
    let (cp, bundle, _) = branch_chain();
    let steps = walk(&cp, &bundle, WalkConfig::default()).unwrap();

    let functions: Vec<&str> = steps.iter().map(|s| s.function.as_str()).collect();
    assert_eq!(functions, vec!["gen", "branch", "branch", "c1", "c2"]);
    assert!(steps[3..]
        .iter()
        .all(|s| s.action == Some(OutboundAction::terminal())));
}

proptest! {
    #[test]
    fn walks_are_bounded_and_repeatable(
        seed in any::<u64>(),
        hops in 0usize..6,
        max_steps in 0usize..6,
    ) {
        let (cp, bundle, _) = branch_chain();
        let config = WalkConfig { seed, max_hops: hops, max_steps };
        let a = walk(&cp, &bundle, config).unwrap();
        let b = walk(&cp, &bundle, config).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert!(a.iter().all(|s| s.hop <= hops));
        prop_assert!(a.len() <= max_steps);
    }
}
