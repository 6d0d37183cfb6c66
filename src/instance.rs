//! Validated problem instances.

use crate::error::QapError;
use crate::matrix::SquareMatrix;

/// A validated QAP instance: a distance matrix over locations and a flow
/// matrix over facilities, both n×n, symmetric, non-negative, n ≥ 2.
///
/// Both matrices are immutable for the lifetime of the instance; the search
/// composes them with a permutation instead of permuting the distance matrix
/// in place, so one instance can back any number of sequential runs.
///
/// # Examples
///
/// ```
/// use u_qap::instance::QapInstance;
/// use u_qap::matrix::SquareMatrix;
///
/// let distance = SquareMatrix::from_rows(vec![vec![0, 4], vec![4, 0]]).unwrap();
/// let flow = SquareMatrix::from_rows(vec![vec![0, 9], vec![9, 0]]).unwrap();
/// let instance = QapInstance::new(distance, flow).unwrap();
/// assert_eq!(instance.size(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QapInstance {
    distance: SquareMatrix,
    flow: SquareMatrix,
}

impl QapInstance {
    /// Builds an instance, validating both matrices up front.
    ///
    /// # Errors
    ///
    /// - [`QapError::DimensionMismatch`] if the matrices differ in size.
    /// - [`QapError::InvalidSize`] if there are fewer than two locations.
    /// - [`QapError::NegativeWeight`] on any negative entry.
    /// - [`QapError::Asymmetric`] on any entry differing from its transpose.
    pub fn new(distance: SquareMatrix, flow: SquareMatrix) -> Result<Self, QapError> {
        if distance.size() != flow.size() {
            return Err(QapError::DimensionMismatch {
                expected: distance.size(),
                found: flow.size(),
            });
        }
        if distance.size() < 2 {
            return Err(QapError::InvalidSize {
                size: distance.size(),
            });
        }
        validate_weights(&distance)?;
        validate_weights(&flow)?;
        Ok(Self { distance, flow })
    }

    /// Parses both matrices from delimited text and builds an instance.
    ///
    /// Accepts the same format as
    /// [`SquareMatrix::parse_delimited`]: one row per line, comma- or
    /// whitespace-separated integer fields.
    pub fn parse_delimited(distance: &str, flow: &str) -> Result<Self, QapError> {
        Self::new(
            SquareMatrix::parse_delimited(distance)?,
            SquareMatrix::parse_delimited(flow)?,
        )
    }

    /// Number of locations (= facilities).
    pub fn size(&self) -> usize {
        self.distance.size()
    }

    /// The inter-location distance matrix.
    pub fn distance(&self) -> &SquareMatrix {
        &self.distance
    }

    /// The inter-facility flow matrix.
    pub fn flow(&self) -> &SquareMatrix {
        &self.flow
    }
}

fn validate_weights(matrix: &SquareMatrix) -> Result<(), QapError> {
    if let Some((row, col, value)) = matrix.first_negative() {
        return Err(QapError::NegativeWeight { row, col, value });
    }
    if let Some((row, col)) = matrix.first_asymmetry() {
        return Err(QapError::Asymmetric { row, col });
    }
    Ok(())
}
