//! 2D numeric grids for matrix chart kinds

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Row and column labels for a matrix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatrixLabels {
    /// One label per row, or empty for unlabeled rows
    pub rows: Vec<String>,
    /// One label per column, or empty for unlabeled columns
    pub cols: Vec<String>,
}

/// A 2D numeric grid.
///
/// `dimensions` always matches the shape of `values`; this is enforced at
/// construction and the fields are private to keep it that way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixData {
    values: Vec<Vec<f64>>,
    dimensions: (usize, usize),
    labels: MatrixLabels,
}

impl MatrixData {
    /// Create a matrix, checking that all rows have the same width.
    pub fn new(values: Vec<Vec<f64>>) -> Result<Self> {
        Self::with_labels(values, MatrixLabels::default())
    }

    /// Create a labeled matrix
    pub fn with_labels(values: Vec<Vec<f64>>, labels: MatrixLabels) -> Result<Self> {
        let rows = values.len();
        let cols = values.first().map_or(0, Vec::len);
        for (i, row) in values.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::RaggedMatrix {
                    row: i,
                    expected: cols,
                    actual: row.len(),
                });
            }
        }
        if !labels.rows.is_empty() && labels.rows.len() != rows {
            return Err(Error::DimensionMismatch {
                rows,
                cols,
                actual_rows: labels.rows.len(),
            });
        }
        Ok(Self {
            values,
            dimensions: (rows, cols),
            labels,
        })
    }

    /// The value grid, row-major
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.dimensions
    }

    /// Row/column labels
    pub fn labels(&self) -> &MatrixLabels {
        &self.labels
    }

    /// Minimum and maximum finite values in the grid, or `None` if there
    /// are no finite values.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for row in &self.values {
            for &v in row {
                if !v.is_finite() {
                    continue;
                }
                range = Some(match range {
                    Some((lo, hi)) => (lo.min(v), hi.max(v)),
                    None => (v, v),
                });
            }
        }
        range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_dimensions() {
        let m = MatrixData::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.dimensions(), (2, 3));
    }

    #[test]
    fn test_matrix_ragged_rejected() {
        let err = MatrixData::new(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, Error::RaggedMatrix { row: 1, .. }));
    }

    #[test]
    fn test_value_range_skips_non_finite() {
        let m = MatrixData::new(vec![vec![f64::NAN, 2.0], vec![-1.0, f64::INFINITY]]).unwrap();
        assert_eq!(m.value_range(), Some((-1.0, 2.0)));
    }
}
