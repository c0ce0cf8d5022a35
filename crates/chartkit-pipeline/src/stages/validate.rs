//! Structural dataset validation

use crate::error::{PipelineError, PipelineResult};
use chartkit_core::{DataContent, DataSource, MAX_COLS, MAX_ROWS};

/// Structural rules a dataset must satisfy before any further stage runs
#[derive(Debug, Clone)]
pub struct ValidationRules {
    pub min_rows: usize,
    pub max_rows: usize,
    pub min_columns: usize,
    pub max_columns: usize,
    /// Maximum tolerated fraction of NaN values per column
    pub max_nan_ratio: f64,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_rows: 1,
            max_rows: MAX_ROWS,
            min_columns: 1,
            max_columns: MAX_COLS,
            max_nan_ratio: 0.5,
        }
    }
}

/// Check a dataset against the rules. Rectangularity and column-name
/// uniqueness are constructor invariants of the data types; what is
/// checked here are the configurable bounds.
pub fn validate_source(source: &DataSource, rules: &ValidationRules) -> PipelineResult<()> {
    let (rows, cols) = source.shape();

    if rows < rules.min_rows {
        return Err(PipelineError::Validation(format!(
            "{} rows, at least {} required",
            rows, rules.min_rows
        )));
    }
    if rows > rules.max_rows {
        return Err(PipelineError::Validation(format!(
            "{} rows, at most {} supported",
            rows, rules.max_rows
        )));
    }
    if cols < rules.min_columns {
        return Err(PipelineError::Validation(format!(
            "{} columns, at least {} required",
            cols, rules.min_columns
        )));
    }
    if cols > rules.max_columns {
        return Err(PipelineError::Validation(format!(
            "{} columns, at most {} supported",
            cols, rules.max_columns
        )));
    }

    if let DataContent::Table(table) = &source.content {
        for column in table.columns() {
            let ratio = column.nan_ratio();
            if ratio > rules.max_nan_ratio {
                return Err(PipelineError::Validation(format!(
                    "column '{}' is {:.0}% missing values, at most {:.0}% tolerated",
                    column.name,
                    ratio * 100.0,
                    rules.max_nan_ratio * 100.0
                )));
            }
        }
    }

    Ok(())
}
