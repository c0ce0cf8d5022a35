//! Basic chart kinds: line, bar, scatter, pie

use super::{table_of, RenderSeries, SeriesData};
use crate::error::{ChartError, ChartResult};
use crate::kind::ChartKind;
use chartkit_core::DataSource;

/// Line and scatter: the first column is the x axis, every further column
/// becomes a series. A single-column table plots against the row index.
pub fn xy_series(kind: ChartKind, data: &DataSource) -> ChartResult<Vec<RenderSeries>> {
    let table = table_of(data, kind)?;
    let columns = table.columns();

    if columns.is_empty() {
        return Err(ChartError::InvalidData {
            kind: kind.as_str(),
            message: "requires at least one column".into(),
        });
    }

    if columns.len() == 1 {
        let col = &columns[0];
        let points = col
            .values
            .iter()
            .enumerate()
            .map(|(i, &y)| [i as f64, y])
            .collect();
        return Ok(vec![RenderSeries {
            label: col.name.clone(),
            data: SeriesData::Points(points),
        }]);
    }

    let x = &columns[0];
    let mut series = Vec::with_capacity(columns.len() - 1);
    for col in &columns[1..] {
        let points = x
            .values
            .iter()
            .zip(&col.values)
            .map(|(&x, &y)| [x, y])
            .collect();
        series.push(RenderSeries {
            label: col.name.clone(),
            data: SeriesData::Points(points),
        });
    }
    Ok(series)
}

/// Bar: every column becomes a series of (row index, value) bars
pub fn bar_series(data: &DataSource) -> ChartResult<Vec<RenderSeries>> {
    let table = table_of(data, ChartKind::Bar)?;
    if table.column_count() == 0 {
        return Err(ChartError::InvalidData {
            kind: "bar",
            message: "requires at least one column".into(),
        });
    }

    Ok(table
        .columns()
        .iter()
        .map(|col| RenderSeries {
            label: col.name.clone(),
            data: SeriesData::Points(
                col.values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| [i as f64, v])
                    .collect(),
            ),
        })
        .collect())
}

/// Pie: one series from the first column; each point is (slice index,
/// value). Negative and non-finite values are not sliceable.
pub fn pie_series(data: &DataSource) -> ChartResult<Vec<RenderSeries>> {
    let table = table_of(data, ChartKind::Pie)?;
    let col = table.columns().first().ok_or(ChartError::InvalidData {
        kind: "pie",
        message: "requires at least one column".into(),
    })?;

    if col.values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(ChartError::InvalidData {
            kind: "pie",
            message: "slice values must be finite and non-negative".into(),
        });
    }

    Ok(vec![RenderSeries {
        label: col.name.clone(),
        data: SeriesData::Points(
            col.values
                .iter()
                .enumerate()
                .map(|(i, &v)| [i as f64, v])
                .collect(),
        ),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartkit_core::{Column, DataFormat, TableData};

    fn source(columns: Vec<Column>) -> DataSource {
        DataSource::table(DataFormat::Manual, TableData::new(columns).unwrap())
    }

    #[test]
    fn test_single_column_uses_row_index() {
        let data = source(vec![Column::new("y", vec![5.0, 6.0])]);
        let series = xy_series(ChartKind::Line, &data).unwrap();
        assert_eq!(
            series[0].data,
            SeriesData::Points(vec![[0.0, 5.0], [1.0, 6.0]])
        );
    }

    #[test]
    fn test_pie_rejects_negative_values() {
        let data = source(vec![Column::new("share", vec![1.0, -2.0])]);
        assert!(pie_series(&data).is_err());
    }

    #[test]
    fn test_bar_one_series_per_column() {
        let data = source(vec![
            Column::new("a", vec![1.0]),
            Column::new("b", vec![2.0]),
        ]);
        assert_eq!(bar_series(&data).unwrap().len(), 2);
    }
}
