//! Move application, log replay and solution verification.
//!
//! Applying a move never mutates its input: it takes a puzzle state and
//! returns the next one as a new value, which is what ends up in the move
//! record. Replay walks a whole log through the same step.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::error::HanoiError;
use crate::puzzle::{DiscSize, MoveRecord, Peg, Towers};
use crate::solver::minimum_moves;

/// Result of applying one move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub disc: DiscSize,
    pub towers: Towers,
}

/// Move the top disc of `from` onto `to`, returning the resulting state.
///
/// Fails on an empty source peg, or if the disc would land on a smaller one.
pub fn apply_move(state: &Towers, from: Peg, to: Peg) -> Result<Transition, HanoiError> {
    let disc = state
        .get(from)
        .top()
        .ok_or(HanoiError::EmptyPeg { peg: from })?;

    if let Some(onto) = state.get(to).top() {
        if onto < disc {
            return Err(HanoiError::IllegalMove { disc, onto, peg: to });
        }
    }

    let mut towers = state.clone();
    towers.get_mut(from).pop();
    towers.get_mut(to).push(disc);
    Ok(Transition { disc, towers })
}

/// Replay a move log from the initial state for `discs` discs.
///
/// Every record must be a legal move, carry the next move number, name the
/// disc actually moved and hold the exact state the move produces. Returns
/// the final state.
#[instrument(skip(moves), fields(count = moves.len()))]
pub fn replay(moves: &[MoveRecord], discs: u8) -> Result<Towers, HanoiError> {
    let mut state = Towers::initial(discs);

    for (i, record) in moves.iter().enumerate() {
        let expected_number = i as u64 + 1;
        let next = apply_move(&state, record.from, record.to)?;

        if record.move_number != expected_number
            || record.disc != next.disc
            || record.towers != next.towers
        {
            return Err(HanoiError::RecordMismatch {
                move_number: expected_number,
            });
        }

        trace!(move_number = expected_number, state = %next.towers, "replayed move");
        state = next.towers;
    }

    Ok(state)
}

/// Verdict of checking a move log against its disc count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Move count equals `2^n - 1`
    pub optimal: bool,
    /// Last recorded state has every disc on `C`, largest at the bottom
    pub correct_final_state: bool,
    pub expected_moves: u64,
    pub actual_moves: u64,
    /// `optimal && correct_final_state`
    pub valid: bool,
}

/// Check that `moves` is an optimal, complete solution for `discs` discs.
///
/// Only the count and the last snapshot are inspected; use [`replay`] to
/// check every step. An empty log is judged by the initial state.
#[instrument(skip(moves), fields(count = moves.len()))]
pub fn verify(moves: &[MoveRecord], discs: u8) -> VerificationResult {
    let expected_moves = minimum_moves(discs);
    let actual_moves = moves.len() as u64;

    let initial;
    let final_state = match moves.last() {
        Some(record) => &record.towers,
        None => {
            initial = Towers::initial(discs);
            &initial
        }
    };

    let optimal = actual_moves == expected_moves;
    let correct_final_state = final_state.is_solved(discs);

    debug!(optimal, correct_final_state, expected_moves, actual_moves, "verified move log");

    VerificationResult {
        optimal,
        correct_final_state,
        expected_moves,
        actual_moves,
        valid: optimal && correct_final_state,
    }
}
