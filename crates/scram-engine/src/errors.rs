use thiserror::Error;

use scram_prob::ProbabilityError;
use scram_tree::ValidityError;

/// An internal invariant violation. Represents a bug in the analyzer, not
/// in the input; it aborts the analysis and is reported verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogicError {
    #[error("signed index {index} does not identify any entity (valid range 1..={limit})")]
    UnknownIndex { index: i32, limit: i32 },
    #[error("literal {literal} has no probability entry (table size {size})")]
    MissingProbability { literal: i32, size: usize },
}

impl From<ProbabilityError> for LogicError {
    fn from(err: ProbabilityError) -> Self {
        match err {
            ProbabilityError::UnknownLiteral { literal, size } => {
                LogicError::MissingProbability { literal, size }
            }
        }
    }
}

/// Error surface of one analysis invocation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("validation error: {0}")]
    Validity(#[from] ValidityError),
    #[error("internal invariant violated: {0}")]
    Logic(#[from] LogicError),
    #[error("analysis cancelled before completion")]
    Cancelled,
}
