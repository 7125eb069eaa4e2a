//! MOCUS-style cut-set generation.
//!
//! A LIFO worklist of supersets is seeded with the top gate; each iteration
//! pops one superset, prunes it against the order bound, records it as a
//! candidate once no gates remain pending, or expands one pending gate and
//! splices the children back in. Pruning is safe because expansion is
//! monotone: a superset's literal count never decreases.

use std::collections::BTreeSet;

use tracing::debug;

use scram_tree::TreeIndex;

use crate::cancel::CancellationToken;
use crate::errors::AnalysisError;
use crate::expansion::expand_gate;
use crate::superset::Superset;

/// Output of the generation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    /// Deduplicated candidate cut sets in canonical order.
    pub cut_sets: Vec<BTreeSet<i32>>,
    /// Number of supersets discarded for exceeding the order bound.
    pub discarded: usize,
}

/// Generates all candidate cut sets of the top gate whose order stays
/// within `limit_order`.
pub fn generate_cut_sets(
    index: &TreeIndex,
    limit_order: usize,
    cancel: &CancellationToken,
) -> Result<Generation, AnalysisError> {
    let mut seed = Superset::new();
    seed.insert_gate(index.top_index())
        .expect("a fresh superset cannot conflict");

    let mut worklist = vec![seed];
    let mut unique: BTreeSet<BTreeSet<i32>> = BTreeSet::new();
    let mut discarded = 0usize;
    let mut iterations = 0usize;

    while let Some(mut set) = worklist.pop() {
        if cancel.is_cancelled() {
            return Err(AnalysisError::Cancelled);
        }
        iterations += 1;

        if set.num_literals() > limit_order {
            discarded += 1;
            continue;
        }
        let Some(gate) = set.pop_pending() else {
            unique.insert(set.into_literals());
            continue;
        };
        for child in expand_gate(index, gate)? {
            let mut next = set.clone();
            if next.merge(&child).is_err() {
                continue;
            }
            if next.num_literals() > limit_order {
                discarded += 1;
                continue;
            }
            worklist.push(next);
        }
    }

    debug!(
        iterations,
        candidates = unique.len(),
        discarded,
        "cut-set generation drained the worklist"
    );

    Ok(Generation {
        cut_sets: unique.into_iter().collect(),
        discarded,
    })
}
