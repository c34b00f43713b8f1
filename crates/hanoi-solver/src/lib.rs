//! Tower of Hanoi solver library.
//!
//! This crate computes the optimal move sequence for moving a stack of
//! discs from peg `A` to peg `C`, recording the full puzzle state after
//! every move, and verifies move logs against the optimal solution.

pub mod error;
pub mod executor;
pub mod policy;
pub mod puzzle;
pub mod solver;

// Re-export main types
pub use error::HanoiError;
pub use executor::{apply_move, replay, verify, Transition, VerificationResult};
pub use policy::DiscPolicy;
pub use puzzle::{DiscSize, Move, MoveRecord, Peg, Tower, Towers, MAX_DISCS, MAX_SNAPSHOT_DISCS};
pub use solver::{
    minimum_moves, solve, validate_disc_count, validate_snapshot_disc_count, HanoiSolver, MoveIter,
    SolveResponse, SolveResult,
};
