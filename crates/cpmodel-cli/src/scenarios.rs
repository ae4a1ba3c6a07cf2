//! Reference patterns written by `cpmodel build`.
//!
//! - `RSAChain/simple-RSA-chain` and `AESChain/simple-AES-chain`: a
//!   self-initiating source feeding encrypt, decrypt and a sink.
//! - `BranchChain/simple-branch`: a stateful function routing to one of two
//!   consumers by edge label.
//! - `MixChain/simple-mix`: two sources feeding a random router.
//!
//! Every pattern comes with its initialization bundle, tables encoded in the
//! given format (random tables always YAML).

use cpmodel_check::StateSchemas;
use cpmodel_core::{
    create_function, CompPattern, CoreError, Format, InboundId, InitBundle, MessageType,
    OutboundAction, TableBuilder,
};

/// Select code of the branching function.
pub const BRANCH_SELECT: &str = "branch-select";

/// State keys each reference select code reads.
pub fn state_schemas() -> StateSchemas {
    let mut schemas = StateSchemas::new();
    schemas.require(BRANCH_SELECT, ["threshold", "visits"]);
    schemas
}

/// All reference pairs, in build order.
pub fn all(format: Format) -> Result<Vec<(CompPattern, InitBundle)>, CoreError> {
    Ok(vec![
        rsa_chain(format)?,
        aes_chain(format)?,
        branch_chain(format)?,
        mix_chain(format)?,
    ])
}

fn bulk_messages(bundle: &mut InitBundle, names: &[&str]) -> Result<(), CoreError> {
    bundle.add_msg(MessageType::new("initiate", 64, 64))?;
    for name in names {
        bundle.add_msg(MessageType::new(*name, 1500, 15000))?;
    }
    Ok(())
}

/// src → encrypt → decrypt → sink. `src` initiates every second.
fn cipher_chain(
    pattern_type: &str,
    name: &str,
    cipher: &str,
    format: Format,
) -> Result<(CompPattern, InitBundle), CoreError> {
    let src = create_function("generate", "src", "static")?;
    let encrypt = create_function(&format!("encrypt-{cipher}"), "encrypt", "static")?;
    let decrypt = create_function(&format!("decrypt-{cipher}"), "decrypt", "static")?;
    let sink = create_function("consume", "sink", "static")?;

    let mut cp = CompPattern::new(pattern_type, name);
    for node in [&src, &encrypt, &decrypt, &sink] {
        cp.add_function(node.clone())?;
    }
    cp.add_edge("src", "src", "initiate", "initiate");
    cp.add_edge("src", "encrypt", "data", "data");
    cp.add_edge("encrypt", "decrypt", "encrypted", "encrypted");
    cp.add_edge("decrypt", "sink", "decrypted", "decrypted");

    let mut bundle = InitBundle::new(pattern_type, name, format);
    bulk_messages(&mut bundle, &["data", "encrypted", "decrypted"])?;

    let hops = [
        (&src, ("src", "initiate"), OutboundAction::new("encrypt", "data"), 1.0),
        (&encrypt, ("src", "data"), OutboundAction::new("decrypt", "encrypted"), 0.0),
        (&decrypt, ("encrypt", "encrypted"), OutboundAction::new("sink", "decrypted"), 0.0),
        (&sink, ("decrypt", "decrypted"), OutboundAction::terminal(), 0.0),
    ];
    for (node, (from, msg), action, period) in hops {
        let mut b = TableBuilder::for_function(node);
        b.add_response(InboundId::new(from, msg), action, period)?;
        bundle.add_table(&node.label, &b.build())?;
    }
    Ok((cp, bundle))
}

pub fn rsa_chain(format: Format) -> Result<(CompPattern, InitBundle), CoreError> {
    cipher_chain("RSAChain", "simple-RSA-chain", "rsa", format)
}

pub fn aes_chain(format: Format) -> Result<(CompPattern, InitBundle), CoreError> {
    cipher_chain("AESChain", "simple-AES-chain", "aes", format)
}

/// gen → branch → consumer1 | consumer2. The two outgoing edges carry the
/// same message type and differ only by routing label.
pub fn branch_chain(format: Format) -> Result<(CompPattern, InitBundle), CoreError> {
    let gen = create_function("generate", "gen", "static")?;
    let branch = create_function("branch", "branch", "stateful")?;
    let consumers = [
        create_function("consume", "consumer1", "static")?,
        create_function("consume", "consumer2", "static")?,
    ];

    let mut cp = CompPattern::new("BranchChain", "simple-branch");
    cp.add_function(gen.clone())?;
    cp.add_function(branch.clone())?;
    for c in &consumers {
        cp.add_function(c.clone())?;
    }
    cp.add_edge("gen", "gen", "initiate", "initiate");
    cp.add_edge("gen", "branch", "data", "data");
    cp.add_edge("branch", "consumer1", "data", "consumer1");
    cp.add_edge("branch", "consumer2", "data", "consumer2");

    let mut bundle = InitBundle::new("BranchChain", "simple-branch", format);
    bulk_messages(&mut bundle, &["data"])?;

    let mut b = TableBuilder::for_function(&gen);
    b.add_response(
        InboundId::new("gen", "initiate"),
        OutboundAction::new("branch", "data"),
        1.0,
    )?;
    bundle.add_table("gen", &b.build())?;

    let from_gen = InboundId::new("gen", "data");
    let mut b = TableBuilder::for_function(&branch);
    for c in &consumers {
        b.add_response(
            from_gen.clone(),
            OutboundAction::routed(&c.label, "data", &c.label),
            0.0,
        )?;
    }
    b.add_action(from_gen, BRANCH_SELECT, BRANCH_SELECT)?
        .set_state("threshold", "0.5")?
        .set_state("visits", "0")?;
    bundle.add_table("branch", &b.build())?;

    for c in &consumers {
        let mut b = TableBuilder::for_function(c);
        b.add_response(
            InboundId::new("branch", "data"),
            OutboundAction::terminal(),
            0.0,
        )?;
        bundle.add_table(&c.label, &b.build())?;
    }
    Ok((cp, bundle))
}

/// genA, genB → router → sinkX | sinkY with per-source weights.
pub fn mix_chain(format: Format) -> Result<(CompPattern, InitBundle), CoreError> {
    let sources = [
        (create_function("generate", "genA", "static")?, 1.0, 0.25),
        (create_function("generate", "genB", "static")?, 2.0, 0.5),
    ];
    let router = create_function("route", "router", "random")?;
    let sinks = [
        create_function("consume", "sinkX", "static")?,
        create_function("consume", "sinkY", "static")?,
    ];

    let mut cp = CompPattern::new("MixChain", "simple-mix");
    for (src, _, _) in &sources {
        cp.add_function(src.clone())?;
        cp.add_edge(&src.label, &src.label, "initiate", "initiate");
        cp.add_edge(&src.label, "router", "data", "data");
    }
    cp.add_function(router.clone())?;
    for sink in &sinks {
        cp.add_function(sink.clone())?;
        cp.add_edge("router", &sink.label, "data", "data");
    }

    let mut bundle = InitBundle::new("MixChain", "simple-mix", format);
    bulk_messages(&mut bundle, &["data"])?;

    let mut rb = TableBuilder::for_function(&router);
    for (src, period, to_x) in &sources {
        let mut b = TableBuilder::for_function(src);
        b.add_response(
            InboundId::new(&src.label, "initiate"),
            OutboundAction::new("router", "data"),
            *period,
        )?;
        bundle.add_table(&src.label, &b.build())?;

        rb.set_distribution(
            InboundId::new(&src.label, "data"),
            [
                (OutboundAction::new("sinkX", "data"), *to_x),
                (OutboundAction::new("sinkY", "data"), 1.0 - *to_x),
            ],
        )?;
    }
    bundle.add_table("router", &rb.build())?;

    for sink in &sinks {
        let mut b = TableBuilder::for_function(sink);
        b.add_response(
            InboundId::new("router", "data"),
            OutboundAction::terminal(),
            0.0,
        )?;
        bundle.add_table(&sink.label, &b.build())?;
    }
    Ok((cp, bundle))
}
