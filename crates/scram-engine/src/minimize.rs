//! Reduction of candidate cut sets to minimal cut sets.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::cancel::CancellationToken;
use crate::errors::AnalysisError;

/// Filters `candidates` down to the inclusion-minimal cut sets.
///
/// Candidates are processed in ascending (size, lexicographic) order, so a
/// candidate only needs to be checked against already-accepted sets: if any
/// accepted MCS is a subset, the candidate is redundant. A literal-to-MCS
/// occurrence index keeps the subset test sublinear in the number of
/// accepted sets. The output keeps the processing order, which is the
/// stable result order.
pub fn minimal_cut_sets(
    mut candidates: Vec<BTreeSet<i32>>,
    cancel: &CancellationToken,
) -> Result<Vec<BTreeSet<i32>>, AnalysisError> {
    candidates.sort_by(|a, b| {
        a.len()
            .cmp(&b.len())
            .then_with(|| a.iter().cmp(b.iter()))
    });
    candidates.dedup();

    let total = candidates.len();
    let mut accepted: Vec<BTreeSet<i32>> = Vec::new();
    // literal -> indices of accepted sets containing it
    let mut occurrences: HashMap<i32, Vec<usize>> = HashMap::new();
    // scratch: accepted-set id -> number of its literals seen in the candidate
    let mut hits: HashMap<usize, usize> = HashMap::new();

    'candidates: for candidate in candidates {
        if cancel.is_cancelled() {
            return Err(AnalysisError::Cancelled);
        }
        // The empty cut set subsumes everything, including itself once
        // accepted; it can only be first in sorted order.
        hits.clear();
        for literal in &candidate {
            let Some(ids) = occurrences.get(literal) else {
                continue;
            };
            for &id in ids {
                let count = hits.entry(id).or_insert(0);
                *count += 1;
                if *count == accepted[id].len() {
                    continue 'candidates;
                }
            }
        }
        if accepted.first().is_some_and(BTreeSet::is_empty) {
            continue;
        }
        let id = accepted.len();
        for &literal in &candidate {
            occurrences.entry(literal).or_default().push(id);
        }
        accepted.push(candidate);
    }

    debug!(candidates = total, minimal = accepted.len(), "minimization finished");
    Ok(accepted)
}
