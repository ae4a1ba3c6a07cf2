//! Dry-run walker over a pattern's response tables.
//!
//! Starting from every self-loop, the walker delivers messages hop by hop
//! and records what each function would emit. Static and stateful functions
//! fan out to all of their candidates, since the select code that picks
//! among them is not run here. Random functions sample one action with a
//! seeded [`ChaCha8Rng`], so a walk is deterministic for a given seed.
//! Periods are recorded but not simulated: a self-loop fires once.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use cpmodel_core::{
    CompPattern, CoreError, InboundId, InitBundle, OutboundAction, PatternKey, ResponseTable,
};

/// Configuration for [`walk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Seed for random-function sampling.
    pub seed: u64,
    /// Deliveries deeper than this are not followed.
    pub max_hops: usize,
    /// Hard cap on recorded steps, fan-out included.
    pub max_steps: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        WalkConfig {
            seed: 0,
            max_hops: 32,
            max_steps: 10_000,
        }
    }
}

/// One delivery and what the receiving function did with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkStep {
    /// Distance from the self-loop that started this chain (0 = the
    /// self-initiation itself).
    pub hop: usize,
    /// Function the message was delivered to.
    pub function: String,
    pub inbound: InboundId,
    /// Action taken; `None` when the table has no response for `inbound`.
    pub action: Option<OutboundAction>,
    /// Period of the chosen candidate (static and stateful only).
    pub period: Option<f64>,
}

/// Errors that abort a walk.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error("bundle {bundle} does not belong to pattern {pattern}")]
    KeyMismatch {
        pattern: PatternKey,
        bundle: PatternKey,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Walks `pattern` using the tables in `bundle`.
pub fn walk(
    pattern: &CompPattern,
    bundle: &InitBundle,
    config: WalkConfig,
) -> Result<Vec<WalkStep>, WalkError> {
    if pattern.key() != bundle.key() {
        return Err(WalkError::KeyMismatch {
            pattern: pattern.key(),
            bundle: bundle.key(),
        });
    }

    let tables = bundle.decode_all()?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut queue: VecDeque<(usize, String, InboundId)> = pattern
        .self_loops()
        .map(|e| (0, e.dst_label.clone(), e.inbound()))
        .collect();
    let mut steps = Vec::new();

    while let Some((hop, label, inbound)) = queue.pop_front() {
        if steps.len() >= config.max_steps {
            break;
        }
        let table = tables
            .get(label.as_str())
            .ok_or_else(|| CoreError::ParamsNotFound {
                label: label.clone(),
            })?;
        let emitted: Vec<(OutboundAction, Option<f64>)> = match table {
            ResponseTable::Static(_) | ResponseTable::Stateful(_) => table
                .responses()
                .map(|r| {
                    r.candidates(&inbound)
                        .iter()
                        .map(|c| (c.action.clone(), Some(c.period)))
                        .collect()
                })
                .unwrap_or_default(),
            ResponseTable::Random(t) => {
                let u: f64 = rng.gen();
                t.choose(&inbound, u)
                    .map(|a| vec![(a.clone(), None)])
                    .unwrap_or_default()
            }
        };

        if emitted.is_empty() {
            steps.push(WalkStep {
                hop,
                function: label,
                inbound,
                action: None,
                period: None,
            });
            continue;
        }

        for (action, period) in emitted {
            if steps.len() >= config.max_steps {
                break;
            }
            if !action.is_terminal() && hop < config.max_hops {
                queue.push_back((
                    hop + 1,
                    action.dst_label.clone(),
                    InboundId::new(&label, &action.msg_type),
                ));
            }
            steps.push(WalkStep {
                hop,
                function: label.clone(),
                inbound: inbound.clone(),
                action: Some(action),
                period,
            });
        }
    }

    Ok(steps)
}
