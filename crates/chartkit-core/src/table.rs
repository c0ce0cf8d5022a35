//! Rectangular column-oriented data

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A single named column of numeric values.
///
/// Missing values are represented as `NaN`; the validation and preprocess
/// stages decide what to do with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, unique within a table
    pub name: String,
    /// Values, one per row
    pub values: Vec<f64>,
}

impl Column {
    /// Create a new column
    pub fn new<S: Into<String>>(name: S, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no rows
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fraction of values that are NaN (0.0 for an empty column)
    pub fn nan_ratio(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let nans = self.values.iter().filter(|v| v.is_nan()).count();
        nans as f64 / self.values.len() as f64
    }
}

/// Rectangular table data: a set of equally long named columns.
///
/// Not deserializable on purpose: construction goes through [`TableData::new`]
/// so the rectangularity and name-uniqueness invariants always hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableData {
    columns: Vec<Column>,
}

impl TableData {
    /// Create a table, checking rectangularity and name uniqueness.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            for col in &columns {
                if col.len() != expected {
                    return Err(Error::RaggedColumns {
                        column: col.name.clone(),
                        expected,
                        actual: col.len(),
                    });
                }
            }
        }
        let mut seen = std::collections::BTreeSet::new();
        for col in &columns {
            if !seen.insert(col.name.as_str()) {
                return Err(Error::DuplicateColumn(col.name.clone()));
            }
        }
        Ok(Self { columns })
    }

    /// All columns, in insertion order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column names, in insertion order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of rows (0 for a table with no columns)
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// One row as a vector of values, or `None` if out of bounds
    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|c| c.values[index]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_table_rectangular() {
        let table = TableData::new(vec![
            Column::new("a", vec![1.0, 2.0]),
            Column::new("b", vec![3.0, 4.0]),
        ])
        .unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row(1), Some(vec![2.0, 4.0]));
    }

    #[test]
    fn test_table_ragged_rejected() {
        let err = TableData::new(vec![
            Column::new("a", vec![1.0, 2.0]),
            Column::new("b", vec![3.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::RaggedColumns { .. }));
    }

    #[test]
    fn test_table_duplicate_names_rejected() {
        let err = TableData::new(vec![
            Column::new("a", vec![1.0]),
            Column::new("a", vec![2.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateColumn(_)));
    }

    #[test]
    fn test_nan_ratio() {
        let col = Column::new("a", vec![1.0, f64::NAN, 3.0, f64::NAN]);
        assert_eq!(col.nan_ratio(), 0.5);
    }
}
