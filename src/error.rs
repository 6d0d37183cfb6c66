//! Input validation errors.
//!
//! Every variant is fatal and detected before a search loop starts; nothing
//! in this crate retries. Heap exhaustion mid-run is deliberately *not* an
//! error — see [`TerminationReason`](crate::tabu::TerminationReason).

use std::fmt;

/// Errors raised while building a [`QapInstance`](crate::instance::QapInstance)
/// or parsing matrix text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QapError {
    /// A matrix is not square, or the distance and flow matrices differ in
    /// size.
    DimensionMismatch {
        /// Expected dimension (row count, or the distance matrix size).
        expected: usize,
        /// Dimension actually found.
        found: usize,
    },

    /// A matrix entry is negative.
    NegativeWeight {
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        col: usize,
        /// The negative value.
        value: i64,
    },

    /// A matrix entry differs from its transpose. The delta-cost formula is
    /// only exact for symmetric inputs, so asymmetry is rejected up front.
    Asymmetric {
        /// Row of the first mismatching entry.
        row: usize,
        /// Column of the first mismatching entry.
        col: usize,
    },

    /// Fewer than two locations: there is no swap to search over.
    InvalidSize {
        /// The rejected size.
        size: usize,
    },

    /// A field in delimited matrix text is not an integer.
    InvalidEntry {
        /// 1-based line number of the offending field.
        line: usize,
        /// The text that failed to parse.
        field: String,
    },
}

impl fmt::Display for QapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QapError::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            QapError::NegativeWeight { row, col, value } => {
                write!(f, "negative weight {value} at ({row}, {col})")
            }
            QapError::Asymmetric { row, col } => {
                write!(f, "matrix is not symmetric at ({row}, {col})")
            }
            QapError::InvalidSize { size } => {
                write!(f, "instance must have at least 2 locations, got {size}")
            }
            QapError::InvalidEntry { line, field } => {
                write!(f, "invalid matrix entry {field:?} on line {line}")
            }
        }
    }
}

impl std::error::Error for QapError {}
