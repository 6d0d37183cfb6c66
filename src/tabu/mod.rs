//! Recency-based Tabu Search for the QAP.
//!
//! A single-solution trajectory metaheuristic: each iteration samples a
//! shortlist of pairwise-swap moves, ranks them by exact delta cost, commits
//! the best one even when it worsens the score, and forbids the applied move
//! for a decaying tenure period so the trajectory cannot immediately undo
//! itself. The best solution ever seen is tracked separately from the
//! (non-monotonic) current one.
//!
//! No aspiration criterion: tenure is always respected, even when a tabu
//! move would produce a new best.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.
//! - Taillard, É. (1991). "Robust taboo search for the quadratic assignment
//!   problem", *Parallel Computing* 17(4-5), 443-455.

mod config;
mod delta;
mod moves;
mod runner;

pub use config::TabuConfig;
pub use delta::{global_score, pair_contribution, swap_delta, swapped_contribution};
pub use moves::{CandidateHeap, MoveUniverse, Swap};
pub use runner::{TabuResult, TabuRunner, TerminationReason};
