//! Caller-side limits on how many discs a front end will solve for.
//!
//! These bounds protect the caller's resources; the solver itself accepts any
//! count in `1..=63`.

use tracing::{instrument, warn};

use crate::error::HanoiError;
use crate::solver::minimum_moves;

/// Disc-count bounds applied before calling the solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscPolicy {
    /// Counts above this are rejected
    pub max_discs: u8,
    /// Counts above this are accepted with a warning
    pub warn_threshold: u8,
}

impl Default for DiscPolicy {
    fn default() -> Self {
        Self {
            max_discs: 10,
            warn_threshold: 10,
        }
    }
}

impl DiscPolicy {
    /// Accept `discs` if it lies in `1..=max_discs`.
    ///
    /// Rejection is reported as [`HanoiError::PolicyRejection`] so callers
    /// can tell it apart from a count the solver itself refuses.
    #[instrument]
    pub fn check(&self, discs: i64) -> Result<u8, HanoiError> {
        let accepted = match u8::try_from(discs) {
            Ok(n) if n >= 1 && n <= self.max_discs => n,
            _ => {
                return Err(HanoiError::PolicyRejection {
                    discs,
                    max: self.max_discs,
                })
            }
        };

        if self.needs_warning(accepted) {
            warn!(
                discs = accepted,
                moves = minimum_moves(accepted),
                "more than {} discs will require many moves",
                self.warn_threshold
            );
        }
        Ok(accepted)
    }

    /// Whether an accepted count is past the warning threshold
    pub fn needs_warning(&self, discs: u8) -> bool {
        discs > self.warn_threshold
    }
}
