//! Quadratic Assignment Problem (QAP) solver using recency-based Tabu Search.
//!
//! Given `n` facilities, an n×n distance matrix between locations, and an
//! n×n flow matrix between facilities, the solver looks for an assignment of
//! facilities to locations minimizing the total flow-weighted distance. QAP
//! is NP-hard; this crate solves it heuristically with a pairwise-swap Tabu
//! Search that forbids recently applied moves for a decaying tenure period,
//! letting the trajectory climb out of local optima.
//!
//! # Architecture
//!
//! The crate is a library-style computational core: no I/O inside the search
//! loop, no global state, deterministic given a seed. File loading beyond
//! delimited-text parsing, printing, and argument handling are left to
//! consumers.
//!
//! - [`matrix`]: dense square integer matrices with delimited-text parsing.
//! - [`instance`]: a validated distance/flow pair; all input errors are
//!   surfaced here, before any search starts.
//! - [`assignment`]: the location→facility permutation and its inverse.
//! - [`tabu`]: the search engine — configuration, delta-cost evaluation,
//!   move sampling and tenure memory, and the runner.
//!
//! # Example
//!
//! ```
//! use u_qap::instance::QapInstance;
//! use u_qap::matrix::SquareMatrix;
//! use u_qap::tabu::{TabuConfig, TabuRunner};
//!
//! let distance = SquareMatrix::from_rows(vec![
//!     vec![0, 2, 3],
//!     vec![2, 0, 1],
//!     vec![3, 1, 0],
//! ]).unwrap();
//! let flow = SquareMatrix::from_rows(vec![
//!     vec![0, 5, 1],
//!     vec![5, 0, 2],
//!     vec![1, 2, 0],
//! ]).unwrap();
//! let instance = QapInstance::new(distance, flow).unwrap();
//!
//! let config = TabuConfig::default().with_max_iterations(50).with_seed(42);
//! let result = TabuRunner::run(&instance, &config);
//! assert!(result.best_score <= 15); // score of the identity placement
//! ```

pub mod assignment;
pub mod error;
pub mod instance;
pub mod matrix;
pub mod tabu;
