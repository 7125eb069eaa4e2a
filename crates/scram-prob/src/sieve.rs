//! Truncated inclusion-exclusion over a union of cut sets.
//!
//! `P(C1 | ... | Cn)` expands recursively: pick one cut set `E`, then
//! `P(E) + P(rest) - P(E & rest)`, where `E & rest` distributes `E` into
//! every remaining cut set. Each distribution step consumes one level of
//! the `nsums` budget, which truncates the alternating series.

use std::collections::BTreeSet;

use crate::product::{product_probability, ProbabilityError};

/// Probability of the union of `cut_sets`, by inclusion-exclusion truncated
/// at `nsums` terms.
///
/// An intersection that would contain a literal and its complement has
/// probability zero and is dropped. Input order does not matter: the sets
/// are brought into their canonical lexicographic order before the
/// recursion so the truncated value is deterministic.
pub fn union_probability(
    cut_sets: &[BTreeSet<i32>],
    probs: &[f64],
    nsums: usize,
) -> Result<f64, ProbabilityError> {
    let mut ordered: BTreeSet<BTreeSet<i32>> = cut_sets.iter().cloned().collect();
    prob_or(&mut ordered, probs, nsums)
}

fn prob_or(
    cut_sets: &mut BTreeSet<BTreeSet<i32>>,
    probs: &[f64],
    nsums: usize,
) -> Result<f64, ProbabilityError> {
    if cut_sets.is_empty() || nsums == 0 {
        return Ok(0.0);
    }
    if cut_sets.len() == 1 {
        return product_probability(cut_sets.iter().next().expect("non-empty"), probs);
    }

    let element = cut_sets.iter().next().expect("non-empty").clone();
    cut_sets.remove(&element);

    let mut combined = combine(&element, cut_sets);
    Ok(product_probability(&element, probs)? + prob_or(cut_sets, probs, nsums)?
        - prob_or(&mut combined, probs, nsums - 1)?)
}

/// Distributes `element` into every set of `cut_sets`, forming the cut sets
/// of `element & (S1 | S2 | ...)`. Unions containing a literal and its
/// complement denote impossible intersections and are skipped.
fn combine(element: &BTreeSet<i32>, cut_sets: &BTreeSet<BTreeSet<i32>>) -> BTreeSet<BTreeSet<i32>> {
    let mut combined = BTreeSet::new();
    'sets: for cut_set in cut_sets {
        let mut member = cut_set.clone();
        for &literal in element {
            if cut_set.contains(&-literal) {
                continue 'sets;
            }
            member.insert(literal);
        }
        combined.insert(member);
    }
    combined
}
