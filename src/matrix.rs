//! Dense square integer matrices.

use crate::error::QapError;

/// A dense n×n integer matrix stored in row-major order.
///
/// Distance and flow inputs are integer-valued; entries and all score
/// arithmetic in this crate use `i64`.
///
/// # Examples
///
/// ```
/// use u_qap::matrix::SquareMatrix;
///
/// let m = SquareMatrix::from_rows(vec![
///     vec![0, 3],
///     vec![3, 0],
/// ]).unwrap();
/// assert_eq!(m.size(), 2);
/// assert_eq!(m.get(0, 1), 3);
/// assert!(m.is_symmetric());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SquareMatrix {
    data: Vec<i64>,
    size: usize,
}

impl SquareMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size * size],
            size,
        }
    }

    /// Creates a matrix from explicit rows.
    ///
    /// Returns [`QapError::DimensionMismatch`] if any row's length differs
    /// from the number of rows.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, QapError> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for row in &rows {
            if row.len() != size {
                return Err(QapError::DimensionMismatch {
                    expected: size,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, size })
    }

    /// Parses a matrix from delimited text: one row per line, integer fields
    /// separated by commas or whitespace. Blank lines are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_qap::matrix::SquareMatrix;
    ///
    /// let comma = SquareMatrix::parse_delimited("0, 2\n2, 0").unwrap();
    /// let space = SquareMatrix::parse_delimited("0 2\n2 0").unwrap();
    /// assert_eq!(comma, space);
    /// ```
    pub fn parse_delimited(text: &str) -> Result<Self, QapError> {
        let mut rows = Vec::new();
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = if line.contains(',') {
                line.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
            } else {
                line.split_whitespace().collect()
            };
            let mut row = Vec::with_capacity(fields.len());
            for field in fields {
                let value = field.parse::<i64>().map_err(|_| QapError::InvalidEntry {
                    line: index + 1,
                    field: field.to_string(),
                })?;
                row.push(value);
            }
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// Returns the entry at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.size + col]
    }

    /// Sets the entry at (`row`, `col`).
    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        self.data[row * self.size + col] = value;
    }

    /// Number of rows (= columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix has no entries.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if the matrix equals its transpose.
    pub fn is_symmetric(&self) -> bool {
        self.first_asymmetry().is_none()
    }

    /// Returns the first (row, col) with `m[row][col] != m[col][row]`,
    /// scanning the upper triangle in row-major order.
    pub fn first_asymmetry(&self) -> Option<(usize, usize)> {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if self.get(i, j) != self.get(j, i) {
                    return Some((i, j));
                }
            }
        }
        None
    }

    /// Returns the first (row, col, value) with a negative entry, scanning in
    /// row-major order.
    pub fn first_negative(&self) -> Option<(usize, usize, i64)> {
        for i in 0..self.size {
            for j in 0..self.size {
                let v = self.get(i, j);
                if v < 0 {
                    return Some((i, j, v));
                }
            }
        }
        None
    }
}
