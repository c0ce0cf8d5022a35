//! Dataset preprocessing
//!
//! Cleanup between validation and transform: dropping all-NaN rows and
//! columns, optional duplicate-row removal, optional missing-value fill.
//! Always produces a new `DataSource`; the input is never mutated. Matrix
//! datasets pass through unchanged — grid kinds tolerate missing cells.

use crate::error::PipelineResult;
use chartkit_core::{Column, DataContent, DataSource, TableData};

/// Missing-value fill strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillStrategy {
    /// Leave NaN in place
    #[default]
    None,
    /// Replace NaN with zero
    Zero,
    /// Replace NaN with the nearest earlier valid value, falling back to
    /// the nearest later one
    NearestValid,
}

/// Preprocessing options
#[derive(Debug, Clone)]
pub struct PreprocessOptions {
    pub drop_empty_rows: bool,
    pub drop_empty_columns: bool,
    pub drop_duplicate_rows: bool,
    pub fill: FillStrategy,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            drop_empty_rows: true,
            drop_empty_columns: true,
            drop_duplicate_rows: false,
            fill: FillStrategy::None,
        }
    }
}

/// Preprocess a dataset, producing a derived `DataSource`.
pub fn preprocess(source: &DataSource, options: &PreprocessOptions) -> PipelineResult<DataSource> {
    let table = match &source.content {
        DataContent::Table(t) => t,
        DataContent::Matrix(_) => {
            return Ok(DataSource::derived(
                source,
                source.content.clone(),
                "preprocess",
            ))
        }
    };

    let mut columns: Vec<Column> = table.columns().to_vec();

    if options.drop_empty_columns {
        columns.retain(|c| !c.values.is_empty() && c.nan_ratio() < 1.0);
    }

    if options.drop_empty_rows && !columns.is_empty() {
        let keep = row_mask(&columns, |row| !row.iter().all(|v| v.is_nan()));
        apply_mask(&mut columns, &keep);
    }

    if options.drop_duplicate_rows && !columns.is_empty() {
        let mut seen = std::collections::BTreeSet::new();
        let keep = row_mask(&columns, |row| {
            let key: Vec<u64> = row.iter().map(|v| v.to_bits()).collect();
            seen.insert(key)
        });
        apply_mask(&mut columns, &keep);
    }

    match options.fill {
        FillStrategy::None => {}
        FillStrategy::Zero => {
            for col in &mut columns {
                for v in &mut col.values {
                    if v.is_nan() {
                        *v = 0.0;
                    }
                }
            }
        }
        FillStrategy::NearestValid => {
            for col in &mut columns {
                fill_nearest(&mut col.values);
            }
        }
    }

    let dropped_rows = table.row_count() - columns.first().map_or(0, |c| c.values.len());
    let dropped_cols = table.column_count() - columns.len();
    if dropped_rows > 0 || dropped_cols > 0 {
        log::debug!(
            "preprocess dropped {} rows and {} columns from {}",
            dropped_rows,
            dropped_cols,
            source.id
        );
    }

    let content = DataContent::Table(TableData::new(columns)?);
    Ok(DataSource::derived(source, content, "preprocess"))
}

/// Evaluate `keep` over each row, in order
fn row_mask(columns: &[Column], mut keep: impl FnMut(&[f64]) -> bool) -> Vec<bool> {
    let rows = columns.first().map_or(0, |c| c.values.len());
    let mut row = vec![0.0; columns.len()];
    (0..rows)
        .map(|i| {
            for (j, col) in columns.iter().enumerate() {
                row[j] = col.values[i];
            }
            keep(&row)
        })
        .collect()
}

fn apply_mask(columns: &mut [Column], keep: &[bool]) {
    for col in columns.iter_mut() {
        let mut index = 0;
        col.values.retain(|_| {
            let kept = keep[index];
            index += 1;
            kept
        });
    }
}

fn fill_nearest(values: &mut [f64]) {
    let mut last_valid: Option<f64> = None;
    for v in values.iter_mut() {
        if v.is_nan() {
            if let Some(fill) = last_valid {
                *v = fill;
            }
        } else {
            last_valid = Some(*v);
        }
    }
    // Leading NaNs take the first valid value
    let mut next_valid: Option<f64> = None;
    for v in values.iter_mut().rev() {
        if v.is_nan() {
            if let Some(fill) = next_valid {
                *v = fill;
            }
        } else {
            next_valid = Some(*v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartkit_core::DataFormat;
    use pretty_assertions::assert_eq;

    fn source(columns: Vec<Column>) -> DataSource {
        DataSource::table(DataFormat::Manual, TableData::new(columns).unwrap())
    }

    fn column_values<'a>(data: &'a DataSource, name: &str) -> &'a [f64] {
        &data.as_table().unwrap().column(name).unwrap().values
    }

    #[test]
    fn test_drops_all_nan_rows() {
        let data = source(vec![
            Column::new("a", vec![1.0, f64::NAN, 3.0]),
            Column::new("b", vec![4.0, f64::NAN, 6.0]),
        ]);
        let out = preprocess(&data, &PreprocessOptions::default()).unwrap();
        assert_eq!(column_values(&out, "a"), &[1.0, 3.0]);
        assert_eq!(column_values(&out, "b"), &[4.0, 6.0]);
        assert_eq!(out.metadata.derived_from.as_ref(), Some(&data.id));
    }

    #[test]
    fn test_drops_all_nan_columns() {
        let data = source(vec![
            Column::new("a", vec![1.0, 2.0]),
            Column::new("dead", vec![f64::NAN, f64::NAN]),
        ]);
        let out = preprocess(&data, &PreprocessOptions::default()).unwrap();
        assert!(out.as_table().unwrap().column("dead").is_none());
    }

    #[test]
    fn test_partial_nan_row_kept() {
        let data = source(vec![
            Column::new("a", vec![1.0, f64::NAN]),
            Column::new("b", vec![2.0, 5.0]),
        ]);
        let out = preprocess(&data, &PreprocessOptions::default()).unwrap();
        assert_eq!(out.shape(), (2, 2));
    }

    #[test]
    fn test_dedupe_rows() {
        let data = source(vec![Column::new("a", vec![1.0, 1.0, 2.0])]);
        let options = PreprocessOptions {
            drop_duplicate_rows: true,
            ..PreprocessOptions::default()
        };
        let out = preprocess(&data, &options).unwrap();
        assert_eq!(column_values(&out, "a"), &[1.0, 2.0]);
    }

    #[test]
    fn test_fill_nearest() {
        let mut values = vec![f64::NAN, 1.0, f64::NAN, f64::NAN, 4.0];
        fill_nearest(&mut values);
        assert_eq!(values, vec![1.0, 1.0, 1.0, 1.0, 4.0]);
    }

    #[test]
    fn test_fill_zero() {
        let data = source(vec![Column::new("a", vec![1.0, f64::NAN])]);
        let options = PreprocessOptions {
            fill: FillStrategy::Zero,
            ..PreprocessOptions::default()
        };
        let out = preprocess(&data, &options).unwrap();
        assert_eq!(column_values(&out, "a"), &[1.0, 0.0]);
    }
}
