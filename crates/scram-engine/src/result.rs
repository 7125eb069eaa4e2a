use std::fmt;

use serde::Serialize;

/// One signed literal of a cut set, resolved to its event identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Literal {
    /// Basic-event identifier.
    pub event: String,
    /// True for the complemented form ("the event does not occur").
    pub complement: bool,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.complement {
            write!(f, "not {}", self.event)
        } else {
            write!(f, "{}", self.event)
        }
    }
}

/// A minimal cut set: a conjunction of literals, sorted by event
/// identifier with the positive form before the complement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CutSet {
    pub literals: Vec<Literal>,
}

impl CutSet {
    /// The order of a cut set is its number of literals.
    pub fn order(&self) -> usize {
        self.literals.len()
    }
}

impl fmt::Display for CutSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literals.is_empty() {
            return write!(f, "{{ }}");
        }
        write!(f, "{{ ")?;
        for (i, literal) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{literal}")?;
        }
        write!(f, " }}")
    }
}

/// Probability analysis output: a probability per minimal cut set plus one
/// scalar total under the configured policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityResult {
    /// Cut-set probabilities, parallel to `AnalysisResult::mcs`. Policy
    /// independent.
    pub per_mcs: Vec<f64>,
    /// Total top-event probability under the configured policy.
    pub total: f64,
    /// Number of cut sets that entered the total after the cut-off filter.
    pub cut_sets_used: usize,
}

/// Positive and negative failure contributions of one basic event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportanceRecord {
    pub event: String,
    /// Sum of P(C) over minimal cut sets containing the positive literal.
    pub positive: f64,
    /// Sum of P(C) over minimal cut sets containing the complement.
    pub negative: f64,
}

/// Wall-clock milliseconds per analysis phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisTimings {
    pub generation_ms: u128,
    pub minimization_ms: u128,
    pub probability_ms: u128,
    pub importance_ms: u128,
}

/// The complete outcome of one analysis invocation. Owned by the caller;
/// the reporter reads it without re-ordering or rounding anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Minimal cut sets, ordered by size then lexicographically.
    pub mcs: Vec<CutSet>,
    /// Present iff probability analysis was requested.
    pub probability: Option<ProbabilityResult>,
    /// Present iff probability analysis ran and the MCS set is non-empty.
    pub importance: Option<Vec<ImportanceRecord>>,
    /// Non-fatal notes accumulated during the run, in emission order.
    pub warnings: Vec<String>,
    pub timings: AnalysisTimings,
    /// SHA-256 over the canonical entity listing of the analyzed tree,
    /// tying this result to the exact model revision.
    pub model_fingerprint: String,
}

impl AnalysisResult {
    /// Largest order among the minimal cut sets; 0 when there are none.
    pub fn max_order(&self) -> usize {
        self.mcs.iter().map(CutSet::order).max().unwrap_or(0)
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Minimal cut sets: {}", self.mcs.len())?;
        for (i, cut_set) in self.mcs.iter().enumerate() {
            if let Some(prob) = &self.probability {
                writeln!(f, "  {}) {cut_set}  {:.7}", i + 1, prob.per_mcs[i])?;
            } else {
                writeln!(f, "  {}) {cut_set}", i + 1)?;
            }
        }
        if let Some(prob) = &self.probability {
            writeln!(f, "Total probability: {:.7}", prob.total)?;
        }
        if let Some(importance) = &self.importance {
            writeln!(f, "Importance:")?;
            for record in importance {
                write!(f, "  {}: {:.7}", record.event, record.positive)?;
                if record.negative > 0.0 {
                    write!(f, " (not: {:.7})", record.negative)?;
                }
                writeln!(f)?;
            }
        }
        for warning in &self.warnings {
            writeln!(f, "warning: {warning}")?;
        }
        Ok(())
    }
}
