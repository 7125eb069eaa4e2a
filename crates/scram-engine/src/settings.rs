use serde::Serialize;

use scram_tree::ValidityError;

/// Cut-set generation algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Top-down gate expansion over a superset worklist.
    #[default]
    Mocus,
}

/// Probability aggregation policy over the minimal cut sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Approximation {
    /// Exact truncated inclusion-exclusion.
    #[default]
    None,
    /// Sum of cut-set probabilities.
    RareEvent,
    /// Min Cut Upper Bound.
    Mcub,
}

impl Approximation {
    /// Label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Approximation::None => "none",
            Approximation::RareEvent => "rare-event",
            Approximation::Mcub => "mcub",
        }
    }
}

/// Analysis settings. All fields have defaults; `validate` runs before any
/// analysis work starts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub algorithm: Algorithm,
    pub approximation: Approximation,
    /// Maximum number of literals in any emitted cut set.
    pub limit_order: usize,
    /// Truncation depth of the exact inclusion-exclusion series.
    pub num_sums: usize,
    /// Enables probability and importance analysis.
    pub probability: bool,
    /// Cut sets whose probability falls below this are excluded from the
    /// total (never from the MCS list, never before minimization).
    pub cut_off: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Mocus,
            approximation: Approximation::None,
            limit_order: 20,
            num_sums: 7,
            probability: false,
            cut_off: 0.0,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ValidityError> {
        if self.limit_order < 1 {
            return Err(ValidityError::InvalidSetting {
                name: "limit_order",
                reason: "the limit on the order of minimal cut sets cannot be less than one"
                    .into(),
            });
        }
        if self.num_sums < 1 {
            return Err(ValidityError::InvalidSetting {
                name: "num_sums",
                reason: "the number of sums in the probability calculation cannot be less than one"
                    .into(),
            });
        }
        if !self.cut_off.is_finite() || !(0.0..=1.0).contains(&self.cut_off) {
            return Err(ValidityError::InvalidSetting {
                name: "cut_off",
                reason: format!("{} is outside [0, 1]", self.cut_off),
            });
        }
        if !self.probability && self.approximation != Approximation::None {
            return Err(ValidityError::InvalidSetting {
                name: "approximation",
                reason: "a probability approximation requires probability analysis".into(),
            });
        }
        if !self.probability && self.cut_off > 0.0 {
            return Err(ValidityError::InvalidSetting {
                name: "cut_off",
                reason: "a cut-off requires probability analysis".into(),
            });
        }
        Ok(())
    }
}
