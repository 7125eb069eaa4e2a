//! Analysis orchestration.
//!
//! One invocation runs start to finish with no suspension points: indexing,
//! cut-set generation, minimization, and optionally probability and
//! importance analysis. The tree is read-only throughout and the result is
//! owned by the caller; independent analyses on disjoint models may run in
//! parallel without any synchronization here.

use std::collections::BTreeSet;
use std::time::Instant;

use sha2::{Digest, Sha256};
use tracing::info;

use scram_prob::{mcub, product_probability, rare_event, union_probability};
use scram_tree::{FaultTree, TreeIndex, ValidityError};

use crate::cancel::CancellationToken;
use crate::errors::{AnalysisError, LogicError};
use crate::generator::generate_cut_sets;
use crate::importance::importance;
use crate::minimize::minimal_cut_sets;
use crate::result::{
    AnalysisResult, AnalysisTimings, CutSet, Literal, ProbabilityResult,
};
use crate::settings::{Approximation, Settings};
use crate::visualization;

/// Runs the full analysis with a token that never cancels.
pub fn analyze(tree: &FaultTree, settings: &Settings) -> Result<AnalysisResult, AnalysisError> {
    analyze_with_cancellation(tree, settings, &CancellationToken::new())
}

/// Runs the full analysis. Settings and tree are validated before any work
/// starts; on any failure no partial result is surfaced.
pub fn analyze_with_cancellation(
    tree: &FaultTree,
    settings: &Settings,
    cancel: &CancellationToken,
) -> Result<AnalysisResult, AnalysisError> {
    settings.validate()?;
    tree.validate()?;
    let index = TreeIndex::new(tree, settings.probability)?;

    let mut warnings = Vec::new();
    for orphan in index.orphan_events() {
        warnings.push(format!("unused primary event: {orphan}"));
    }

    let started = Instant::now();
    let generation = generate_cut_sets(&index, settings.limit_order, cancel)?;
    let generation_ms = started.elapsed().as_millis();
    info!(
        candidates = generation.cut_sets.len(),
        discarded = generation.discarded,
        elapsed_ms = generation_ms,
        "cut-set generation finished"
    );
    if generation.discarded > 0 {
        warnings.push(format!(
            "{} cut sets beyond the order limit {} were discarded",
            generation.discarded, settings.limit_order
        ));
    }

    let minimize_started = Instant::now();
    let mcs_indices = minimal_cut_sets(generation.cut_sets, cancel)?;
    let minimization_ms = minimize_started.elapsed().as_millis();
    info!(
        mcs = mcs_indices.len(),
        elapsed_ms = minimization_ms,
        "minimization finished"
    );
    if mcs_indices.is_empty() {
        warnings.push(format!(
            "no cut sets for the limit order {}",
            settings.limit_order
        ));
    }

    let mut timings = AnalysisTimings {
        generation_ms,
        minimization_ms,
        ..AnalysisTimings::default()
    };

    let mcs = resolve_cut_sets(&index, &mcs_indices)?;
    let model_fingerprint = model_fingerprint(tree);

    if !settings.probability {
        return Ok(AnalysisResult {
            mcs,
            probability: None,
            importance: None,
            warnings,
            timings,
            model_fingerprint,
        });
    }

    let probability_started = Instant::now();
    let probability = compute_probability(&index, &mcs_indices, settings, &mut warnings)?;
    timings.probability_ms = probability_started.elapsed().as_millis();

    let importance_started = Instant::now();
    let importance_records = if mcs_indices.is_empty() {
        None
    } else {
        Some(importance(&index, &mcs_indices, &probability.per_mcs))
    };
    timings.importance_ms = importance_started.elapsed().as_millis();
    info!(
        total = probability.total,
        cut_sets_used = probability.cut_sets_used,
        "probability analysis finished"
    );

    Ok(AnalysisResult {
        mcs,
        probability: Some(probability),
        importance: importance_records,
        warnings,
        timings,
        model_fingerprint,
    })
}

/// Emits DOT graphing instructions for the tree. Pure formatting,
/// orthogonal to analysis; the caller owns all I/O.
pub fn graphing(tree: &FaultTree) -> Result<String, ValidityError> {
    tree.validate()?;
    Ok(visualization::render_dot(tree))
}

fn compute_probability(
    index: &TreeIndex,
    mcs: &[BTreeSet<i32>],
    settings: &Settings,
    warnings: &mut Vec<String>,
) -> Result<ProbabilityResult, AnalysisError> {
    let probs = index.probabilities();
    let per_mcs = mcs
        .iter()
        .map(|set| product_probability(set, probs).map_err(LogicError::from))
        .collect::<Result<Vec<f64>, _>>()?;

    // The cut-off filters the total only; the MCS list and per-set
    // probabilities always cover every minimal cut set.
    let used: Vec<usize> = (0..mcs.len())
        .filter(|&i| per_mcs[i] >= settings.cut_off)
        .collect();
    if used.len() < mcs.len() {
        warnings.push(format!(
            "{} cut sets below the probability cut-off {} were excluded from the total",
            mcs.len() - used.len(),
            settings.cut_off
        ));
    }

    let used_per_mcs: Vec<f64> = used.iter().map(|&i| per_mcs[i]).collect();
    let total = match settings.approximation {
        Approximation::None => {
            let used_sets: Vec<BTreeSet<i32>> = used.iter().map(|&i| mcs[i].clone()).collect();
            let nsums = settings.num_sums.min(used_sets.len());
            union_probability(&used_sets, probs, nsums).map_err(LogicError::from)?
        }
        Approximation::RareEvent => {
            warnings.push("using the rare-event approximation".into());
            if used_per_mcs.iter().any(|&p| p > 0.1) {
                warnings.push(
                    "the rare-event approximation may be inaccurate: a minimal cut set \
                     probability exceeds 0.1"
                        .into(),
                );
            }
            rare_event(&used_per_mcs)
        }
        Approximation::Mcub => {
            warnings.push("using the MCUB approximation".into());
            mcub(&used_per_mcs)
        }
    };

    Ok(ProbabilityResult {
        per_mcs,
        total,
        cut_sets_used: used.len(),
    })
}

fn resolve_cut_sets(
    index: &TreeIndex,
    mcs: &[BTreeSet<i32>],
) -> Result<Vec<CutSet>, AnalysisError> {
    mcs.iter()
        .map(|set| {
            let mut literals = set
                .iter()
                .map(|&literal| {
                    index
                        .basic_id(literal)
                        .map(|event| Literal {
                            event: event.to_string(),
                            complement: literal < 0,
                        })
                        .ok_or(LogicError::UnknownIndex {
                            index: literal,
                            limit: index.max_index(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            literals.sort();
            Ok(CutSet { literals })
        })
        .collect()
}

/// SHA-256 over the canonical entity listing, in insertion order. Two trees
/// with the same entities in the same order share a fingerprint.
fn model_fingerprint(tree: &FaultTree) -> String {
    let mut hasher = Sha256::new();
    hasher.update(tree.name().as_bytes());
    for event in tree.basic_events() {
        hasher.update(format!("\nbasic {} {}", event.id, event.probability));
    }
    for event in tree.house_events() {
        hasher.update(format!("\nhouse {} {}", event.id, event.state));
    }
    for gate in tree.gates() {
        hasher.update(format!("\ngate {} {}", gate.id, gate.connective));
        for child in &gate.children {
            hasher.update(format!(" {}", child.id()));
        }
    }
    format!("{:x}", hasher.finalize())
}
