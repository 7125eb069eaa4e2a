//! Cooperative cancellation for long analyses.
//!
//! The analyzer never installs signal handlers; the host owns process-level
//! concerns. Instead it polls a shared token once per worklist iteration
//! and once per minimizer candidate, and fails with
//! [`AnalysisError::Cancelled`](crate::errors::AnalysisError::Cancelled)
//! when the token has tripped. No partial result is surfaced.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag a host can trip to abort an in-flight analysis.
///
/// Cloning is cheap; all clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
