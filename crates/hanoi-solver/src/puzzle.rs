//! Puzzle representation types that match the solver's JSON format.
//!
//! A puzzle state is three pegs, each holding a stack of discs. Discs are
//! identified by size, `1` being the smallest. These types serialize directly
//! into the `{"A": [...], "B": [...], "C": [...]}` shape front ends consume.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Size of a disc, in `1..=n`. Larger value = larger disc.
pub type DiscSize = u8;

/// Largest disc count whose move total `2^n - 1` fits in a `u64`.
pub const MAX_DISCS: u8 = 63;

/// Largest disc count [`HanoiSolver`](crate::HanoiSolver) will record
/// snapshots for. Past this the log outgrows memory; use
/// [`MoveIter`](crate::MoveIter) instead.
pub const MAX_SNAPSHOT_DISCS: u8 = 20;

/// Peg label. `A` is the source, `B` the spare and `C` the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Peg {
    A,
    B,
    C,
}

impl Peg {
    pub const ALL: [Peg; 3] = [Peg::A, Peg::B, Peg::C];

    /// Position of the peg, `A` = 0
    pub fn index(self) -> usize {
        match self {
            Peg::A => 0,
            Peg::B => 1,
            Peg::C => 2,
        }
    }

    /// Peg at `index % 3`
    pub fn from_index(index: usize) -> Peg {
        match index % 3 {
            0 => Peg::A,
            1 => Peg::B,
            _ => Peg::C,
        }
    }

    /// The peg that is neither `self` nor `other`.
    ///
    /// Only meaningful for two distinct pegs.
    pub fn third(self, other: Peg) -> Peg {
        Peg::from_index(6 - self.index() - other.index())
    }
}

impl fmt::Display for Peg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Peg::A => "A",
            Peg::B => "B",
            Peg::C => "C",
        };
        write!(f, "{}", s)
    }
}

/// A single peg's stack, bottom first. The top disc is the last element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tower(SmallVec<[DiscSize; 16]>);

impl Tower {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tower holding `n, n-1, ..., 1` from bottom to top
    pub fn full(discs: u8) -> Self {
        Self((1..=discs).rev().collect())
    }

    pub fn discs(&self) -> &[DiscSize] {
        &self.0
    }

    pub fn top(&self) -> Option<DiscSize> {
        self.0.last().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check that sizes strictly decrease from bottom to top
    pub fn is_descending(&self) -> bool {
        self.0.windows(2).all(|pair| pair[0] > pair[1])
    }

    pub(crate) fn push(&mut self, disc: DiscSize) {
        self.0.push(disc);
    }

    pub(crate) fn pop(&mut self) -> Option<DiscSize> {
        self.0.pop()
    }
}

impl From<Vec<DiscSize>> for Tower {
    fn from(discs: Vec<DiscSize>) -> Self {
        Self(SmallVec::from_vec(discs))
    }
}

/// Full puzzle state: one tower per peg
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Towers {
    #[serde(rename = "A")]
    pub a: Tower,
    #[serde(rename = "B")]
    pub b: Tower,
    #[serde(rename = "C")]
    pub c: Tower,
}

impl Towers {
    /// Starting configuration: every disc on `A`, largest at the bottom
    pub fn initial(discs: u8) -> Self {
        Self {
            a: Tower::full(discs),
            b: Tower::new(),
            c: Tower::new(),
        }
    }

    pub fn get(&self, peg: Peg) -> &Tower {
        match peg {
            Peg::A => &self.a,
            Peg::B => &self.b,
            Peg::C => &self.c,
        }
    }

    pub(crate) fn get_mut(&mut self, peg: Peg) -> &mut Tower {
        match peg {
            Peg::A => &mut self.a,
            Peg::B => &mut self.b,
            Peg::C => &mut self.c,
        }
    }

    /// Total number of discs across all pegs
    pub fn disc_count(&self) -> usize {
        self.a.len() + self.b.len() + self.c.len()
    }

    /// Check whether all `discs` sit on `C` in sorted order
    pub fn is_solved(&self, discs: u8) -> bool {
        self.c == Tower::full(discs) && self.a.is_empty() && self.b.is_empty()
    }

    /// Check both puzzle invariants for `discs` discs: every tower is
    /// strictly descending, and each size in `1..=discs` appears exactly once.
    pub fn is_well_formed(&self, discs: u8) -> bool {
        if !Peg::ALL.iter().all(|&peg| self.get(peg).is_descending()) {
            return false;
        }

        let mut seen = vec![false; discs as usize + 1];
        for peg in Peg::ALL {
            for &disc in self.get(peg).discs() {
                if disc == 0 || disc > discs || seen[disc as usize] {
                    return false;
                }
                seen[disc as usize] = true;
            }
        }
        seen[1..].iter().all(|&s| s)
    }
}

impl fmt::Display for Towers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, peg) in Peg::ALL.iter().enumerate() {
            if i > 0 {
                write!(f, "  ")?;
            }
            let tower = self.get(*peg);
            if tower.is_empty() {
                write!(f, "{}: empty", peg)?;
            } else {
                write!(f, "{}: {:?}", peg, tower.discs())?;
            }
        }
        Ok(())
    }
}

/// A single disc relocation without a state snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Peg,
    pub to: Peg,
    pub disc: DiscSize,
}

/// One entry of the move log: the move and the state right after it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 1-based position in the log
    pub move_number: u64,
    pub from: Peg,
    pub to: Peg,
    pub disc: DiscSize,
    pub towers: Towers,
}

impl MoveRecord {
    /// The move without its snapshot
    pub fn as_move(&self) -> Move {
        Move {
            from: self.from,
            to: self.to,
            disc: self.disc,
        }
    }
}
