//! Move universe, tabu tenure memory, sampling, and candidate ranking.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rand::Rng;

use crate::error::QapError;

/// A pairwise-swap move: exchange the facilities at locations `i` and `j`.
///
/// Stored with `i < j`, so (3, 7) and (7, 3) are the same move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swap {
    /// Lower location index.
    pub i: usize,
    /// Upper location index.
    pub j: usize,
}

impl Swap {
    /// Creates a swap, normalizing the order of the endpoints.
    ///
    /// # Panics
    ///
    /// Panics if `a == b`.
    pub fn new(a: usize, b: usize) -> Self {
        assert!(a != b, "swap endpoints must be distinct");
        if a < b {
            Self { i: a, j: b }
        } else {
            Self { i: b, j: a }
        }
    }
}

/// The full C(n,2) universe of swap moves, with a tenure counter per move.
///
/// Tenure lives in a flat array indexed by a closed-form triangular index,
/// so lookups never hash. The universe is built once per run and never
/// resized: a tabu move is skipped during sampling but always stays in the
/// pool.
#[derive(Debug, Clone)]
pub struct MoveUniverse {
    n: usize,
    moves: Vec<Swap>,
    tenure: Vec<u32>,
}

impl MoveUniverse {
    /// Builds the move universe for `n` locations.
    ///
    /// # Errors
    ///
    /// [`QapError::InvalidSize`] if `n < 2` (no swap space).
    pub fn new(n: usize) -> Result<Self, QapError> {
        if n < 2 {
            return Err(QapError::InvalidSize { size: n });
        }
        let mut moves = Vec::with_capacity(n * (n - 1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                moves.push(Swap { i, j });
            }
        }
        let tenure = vec![0; moves.len()];
        Ok(Self { n, moves, tenure })
    }

    /// Number of moves in the universe: C(n, 2).
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Always `false`: the universe holds at least one move.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Triangular index of a swap in the lexicographic move list.
    fn index(&self, swap: Swap) -> usize {
        debug_assert!(swap.i < swap.j && swap.j < self.n);
        swap.i * (2 * self.n - swap.i - 1) / 2 + (swap.j - swap.i - 1)
    }

    /// Remaining tenure for a move; 0 means admissible.
    pub fn tenure_of(&self, swap: Swap) -> u32 {
        self.tenure[self.index(swap)]
    }

    /// Decrements every tenure by one, flooring at zero. Called exactly once
    /// per committed iteration, unconditionally.
    pub fn decay_all(&mut self) {
        for t in &mut self.tenure {
            *t = t.saturating_sub(1);
        }
    }

    /// Sets the tenure of the just-applied move. Called after
    /// [`decay_all`](Self::decay_all) in the same iteration, so a fresh
    /// tenure is not decremented by the iteration that set it.
    pub fn mark_tabu(&mut self, swap: Swap, tenure: u32) {
        let index = self.index(swap);
        self.tenure[index] = tenure;
    }

    /// Samples up to `sample_size` admissible (tenure 0) moves uniformly
    /// without replacement, via a partial Fisher–Yates shuffle of the
    /// admissible index list.
    ///
    /// `None`, or a request larger than the admissible pool, returns the
    /// whole admissible pool. Tabu moves are skipped for this round only.
    pub fn sample<R: Rng>(&self, rng: &mut R, sample_size: Option<usize>) -> Vec<Swap> {
        let mut admissible: Vec<usize> = (0..self.moves.len())
            .filter(|&m| self.tenure[m] == 0)
            .collect();
        let take = sample_size.unwrap_or(admissible.len()).min(admissible.len());
        for slot in 0..take {
            let pick = rng.random_range(slot..admissible.len());
            admissible.swap(slot, pick);
        }
        admissible.truncate(take);
        admissible.into_iter().map(|m| self.moves[m]).collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    delta: i64,
    seq: usize,
    swap: Swap,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.delta
            .cmp(&other.delta)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// A min-heap of candidate moves keyed by estimated delta cost.
///
/// Ties are broken by insertion order, so a fixed seed reproduces the same
/// pop sequence. Rebuilt from a fresh sample each iteration.
#[derive(Debug, Default)]
pub struct CandidateHeap {
    heap: BinaryHeap<Reverse<Candidate>>,
    next_seq: usize,
}

impl CandidateHeap {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a move with its delta cost.
    pub fn push(&mut self, swap: Swap, delta: i64) {
        let candidate = Candidate {
            delta,
            seq: self.next_seq,
            swap,
        };
        self.next_seq += 1;
        self.heap.push(Reverse(candidate));
    }

    /// Removes and returns the move with the lowest delta, or `None` when
    /// the heap is exhausted — a normal outcome, not an error.
    pub fn pop(&mut self) -> Option<(Swap, i64)> {
        self.heap.pop().map(|Reverse(c)| (c.swap, c.delta))
    }

    /// Number of candidates still in the heap.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if no candidates remain.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
