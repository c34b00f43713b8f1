//! Recursive optimal solver and lazy move emitter.
//!
//! The solver moves every disc from `A` to `C` using `B` as the spare: the top
//! `n-1` discs go to the spare, the largest disc goes to the target, then the
//! `n-1` discs follow it. This produces exactly `2^n - 1` moves, which is the
//! minimum, and records the full state after each one.
//!
//! For disc counts where a snapshot per move is too much memory, [`MoveIter`]
//! yields the same moves one at a time without any state.

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::error::HanoiError;
use crate::executor::{apply_move, verify, Transition, VerificationResult};
use crate::puzzle::{Move, MoveRecord, Peg, Towers, MAX_DISCS, MAX_SNAPSHOT_DISCS};

/// Number of moves an optimal solution for `discs` discs takes: `2^n - 1`.
///
/// Saturates at `u64::MAX` for counts the solver can't represent.
pub fn minimum_moves(discs: u8) -> u64 {
    1u64.checked_shl(u32::from(discs))
        .map_or(u64::MAX, |total| total - 1)
}

/// Accept a raw disc count if moves can be generated for it (`1..=63`).
pub fn validate_disc_count(discs: i64) -> Result<u8, HanoiError> {
    check_range(discs, MAX_DISCS)
}

/// Accept a raw disc count if a full snapshot log fits (`1..=20`).
pub fn validate_snapshot_disc_count(discs: i64) -> Result<u8, HanoiError> {
    check_range(discs, MAX_SNAPSHOT_DISCS)
}

fn check_range(discs: i64, max: u8) -> Result<u8, HanoiError> {
    match u8::try_from(discs) {
        Ok(n) if (1..=max).contains(&n) => Ok(n),
        _ => Err(HanoiError::InvalidInput { discs, max }),
    }
}

/// Solver for a fixed number of discs.
///
/// Holds the current puzzle state and the move log of the last `solve()`.
#[derive(Debug, Clone)]
pub struct HanoiSolver {
    discs: u8,
    towers: Towers,
    moves: Vec<MoveRecord>,
}

impl HanoiSolver {
    /// Set up a solver with every disc on `A`.
    ///
    /// Counts above [`MAX_SNAPSHOT_DISCS`] are refused; stream those with
    /// [`MoveIter`].
    pub fn new(discs: i64) -> Result<Self, HanoiError> {
        let discs = validate_snapshot_disc_count(discs)?;
        Ok(Self {
            discs,
            towers: Towers::initial(discs),
            moves: Vec::new(),
        })
    }

    pub fn discs(&self) -> u8 {
        self.discs
    }

    /// Current puzzle state (solved after `solve()`)
    pub fn towers(&self) -> &Towers {
        &self.towers
    }

    /// Move log of the last `solve()`, empty before the first one
    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn minimum_moves(&self) -> u64 {
        minimum_moves(self.discs)
    }

    /// Solve from the initial state, replacing any previous log.
    ///
    /// Calling this again yields an identical log.
    #[instrument(skip(self), fields(discs = self.discs))]
    pub fn solve(&mut self) -> Result<&[MoveRecord], HanoiError> {
        self.moves.clear();
        self.towers = Towers::initial(self.discs);

        let mut log = Vec::with_capacity(self.capacity_hint());
        let start = Towers::initial(self.discs);
        let solved = transfer(self.discs, Peg::A, Peg::C, start, &mut log)?;

        debug!(moves = log.len(), "solved");
        self.towers = solved;
        self.moves = log;
        Ok(&self.moves)
    }

    /// Verify the current log
    pub fn verify(&self) -> VerificationResult {
        verify(&self.moves, self.discs)
    }

    /// Solve and hand over the log
    pub fn into_result(mut self) -> Result<SolveResult, HanoiError> {
        self.solve()?;
        Ok(SolveResult {
            discs: self.discs,
            minimum_moves: self.minimum_moves(),
            moves: self.moves,
        })
    }

    fn capacity_hint(&self) -> usize {
        self.minimum_moves() as usize
    }
}

/// Move `count` discs from `from` to `to` via the remaining peg, appending
/// each move to `log`. Takes the state before and returns the state after.
fn transfer(
    count: u8,
    from: Peg,
    to: Peg,
    state: Towers,
    log: &mut Vec<MoveRecord>,
) -> Result<Towers, HanoiError> {
    if count == 0 {
        return Ok(state);
    }
    let spare = from.third(to);

    let state = transfer(count - 1, from, spare, state, log)?;

    let Transition { disc, towers } = apply_move(&state, from, to)?;
    let move_number = log.len() as u64 + 1;
    trace!(move_number, disc, %from, %to, "move");
    log.push(MoveRecord {
        move_number,
        from,
        to,
        disc,
        towers: towers.clone(),
    });

    transfer(count - 1, spare, to, towers, log)
}

/// All moves for a disc count plus the optimal count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    pub discs: u8,
    pub moves: Vec<MoveRecord>,
    pub minimum_moves: u64,
}

impl SolveResult {
    pub fn total_moves(&self) -> u64 {
        self.moves.len() as u64
    }

    /// Final state, or the initial one for an empty log
    pub fn final_state(&self) -> Towers {
        self.moves
            .last()
            .map(|record| record.towers.clone())
            .unwrap_or_else(|| Towers::initial(self.discs))
    }

    pub fn verify(&self) -> VerificationResult {
        verify(&self.moves, self.discs)
    }
}

/// Solve for `discs` discs in one call
pub fn solve(discs: i64) -> Result<SolveResult, HanoiError> {
    HanoiSolver::new(discs)?.into_result()
}

/// Payload handed to front ends that render a solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResponse {
    pub success: bool,
    pub moves: Vec<MoveRecord>,
    pub total_moves: u64,
    pub minimum_moves: u64,
    pub initial_state: Towers,
}

impl From<SolveResult> for SolveResponse {
    fn from(result: SolveResult) -> Self {
        Self {
            success: true,
            total_moves: result.total_moves(),
            minimum_moves: result.minimum_moves,
            initial_state: Towers::initial(result.discs),
            moves: result.moves,
        }
    }
}

/// Lazily yields the optimal moves from `A` to `C`, one at a time.
///
/// Produces the same sequence as [`HanoiSolver::solve`] without snapshots.
/// Move `k` (1-based) always moves disc `trailing_zeros(k) + 1`; the pegs
/// follow from the bits of `k`. Finite and not restartable.
#[derive(Debug, Clone)]
pub struct MoveIter {
    even: bool,
    next: u64,
    total: u64,
}

impl MoveIter {
    pub fn new(discs: i64) -> Result<Self, HanoiError> {
        let discs = validate_disc_count(discs)?;
        Ok(Self {
            even: discs % 2 == 0,
            next: 1,
            total: minimum_moves(discs),
        })
    }

    fn peg(&self, index: u64) -> Peg {
        // The bit schedule targets C for odd counts and B for even ones;
        // swapping B and C retargets the even case onto C.
        let peg = Peg::from_index((index % 3) as usize);
        match (self.even, peg) {
            (true, Peg::B) => Peg::C,
            (true, Peg::C) => Peg::B,
            (_, peg) => peg,
        }
    }
}

impl Iterator for MoveIter {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        if self.next > self.total {
            return None;
        }
        let k = self.next;
        self.next += 1;

        Some(Move {
            from: self.peg(k & (k - 1)),
            to: self.peg((k | (k - 1)) + 1),
            disc: (k.trailing_zeros() + 1) as u8,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total + 1 - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MoveIter {}

impl FusedIterator for MoveIter {}
