//! Error types for solving and verifying.

use derive_more::{Display, Error};

use crate::puzzle::{DiscSize, Peg};

/// Everything that can go wrong while building, solving or replaying a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum HanoiError {
    /// Disc count outside `1..=max`. `max` is 63 for streamed moves and
    /// lower when every move keeps a snapshot.
    #[display(
        "invalid disc count {discs}: must be between 1 and {max} (MoveIter streams up to 63 discs)"
    )]
    InvalidInput { discs: i64, max: u8 },

    /// Disc count refused by a caller-imposed bound. Non-fatal.
    #[display("number of discs must be between 1 and {max}, got {discs}")]
    PolicyRejection { discs: i64, max: u8 },

    /// A move tried to take a disc from an empty peg.
    #[display("cannot move from empty peg {peg}")]
    EmptyPeg { peg: Peg },

    /// A move would put a larger disc on a smaller one.
    #[display("cannot place disc {disc} on smaller disc {onto} on peg {peg}")]
    IllegalMove {
        disc: DiscSize,
        onto: DiscSize,
        peg: Peg,
    },

    /// A recorded move disagrees with the state reached by replaying the log.
    #[display("move {move_number} does not match the replayed state")]
    RecordMismatch { move_number: u64 },
}

impl HanoiError {
    /// Whether this error is a broken puzzle invariant rather than a
    /// rejected disc count.
    ///
    /// `solve()` never produces these for an accepted disc count; seeing one
    /// from it means the move generator is broken.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            HanoiError::EmptyPeg { .. }
                | HanoiError::IllegalMove { .. }
                | HanoiError::RecordMismatch { .. }
        )
    }
}
