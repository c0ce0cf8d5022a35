//! Matrix chart kinds: heatmap, surface, contour

use super::{RenderSeries, SeriesData};
use crate::error::{ChartError, ChartResult};
use crate::kind::ChartKind;
use chartkit_core::{DataContent, DataSource};

/// Grid kinds render a single series carrying the value grid. A
/// table-backed dataset is viewed as a grid row by row.
pub fn grid_series(kind: ChartKind, data: &DataSource) -> ChartResult<Vec<RenderSeries>> {
    let grid = match &data.content {
        DataContent::Matrix(m) => m.values().to_vec(),
        DataContent::Table(t) => {
            if t.column_count() == 0 || t.row_count() == 0 {
                return Err(ChartError::InvalidData {
                    kind: kind.as_str(),
                    message: "requires a non-empty grid".into(),
                });
            }
            (0..t.row_count())
                .map(|i| t.row(i).expect("row index in range"))
                .collect()
        }
    };

    if grid.is_empty() || grid[0].is_empty() {
        return Err(ChartError::InvalidData {
            kind: kind.as_str(),
            message: "requires a non-empty grid".into(),
        });
    }

    Ok(vec![RenderSeries {
        label: "values".to_string(),
        data: SeriesData::Grid(grid),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartkit_core::{Column, DataFormat, MatrixData, TableData};

    #[test]
    fn test_matrix_passthrough() {
        let matrix = MatrixData::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let data = DataSource::matrix(DataFormat::Manual, matrix);
        let series = grid_series(ChartKind::Heatmap, &data).unwrap();
        assert_eq!(
            series[0].data,
            SeriesData::Grid(vec![vec![1.0, 2.0], vec![3.0, 4.0]])
        );
    }

    #[test]
    fn test_table_viewed_as_grid() {
        let table = TableData::new(vec![
            Column::new("a", vec![1.0, 3.0]),
            Column::new("b", vec![2.0, 4.0]),
        ])
        .unwrap();
        let data = DataSource::table(DataFormat::Manual, table);
        let series = grid_series(ChartKind::Contour, &data).unwrap();
        assert_eq!(
            series[0].data,
            SeriesData::Grid(vec![vec![1.0, 2.0], vec![3.0, 4.0]])
        );
    }

    #[test]
    fn test_empty_grid_rejected() {
        let data = DataSource::matrix(DataFormat::Manual, MatrixData::new(vec![]).unwrap());
        assert!(grid_series(ChartKind::Surface, &data).is_err());
    }
}
