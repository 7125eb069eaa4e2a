use std::collections::BTreeSet;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProbabilityError {
    #[error("literal {literal} has no entry in the probability table (size {size})")]
    UnknownLiteral { literal: i32, size: usize },
}

/// Probability of a cut set: the product of `p` over positive literals and
/// `1 - p` over negative literals, assuming independence.
///
/// `probs` is the engine's table: slot `|i|` holds the probability of basic
/// event `i`, slot 0 is unused. The empty conjunction has probability 1.
pub fn product_probability(
    cut_set: &BTreeSet<i32>,
    probs: &[f64],
) -> Result<f64, ProbabilityError> {
    let mut product = 1.0;
    for &literal in cut_set {
        let slot = literal.unsigned_abs() as usize;
        if slot == 0 || slot >= probs.len() {
            return Err(ProbabilityError::UnknownLiteral {
                literal,
                size: probs.len(),
            });
        }
        if literal > 0 {
            product *= probs[slot];
        } else {
            product *= 1.0 - probs[slot];
        }
    }
    Ok(product)
}

/// Rare-event approximation: the plain sum of cut-set probabilities.
///
/// Accurate when every term is small; the caller is expected to warn when
/// any term exceeds 0.1.
pub fn rare_event(per_cut_set: &[f64]) -> f64 {
    per_cut_set.iter().sum()
}

/// Min Cut Upper Bound: `1 - prod(1 - P(C))`.
pub fn mcub(per_cut_set: &[f64]) -> f64 {
    1.0 - per_cut_set.iter().fold(1.0, |m, p| m * (1.0 - p))
}
