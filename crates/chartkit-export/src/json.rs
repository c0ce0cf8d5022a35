//! The portable JSON chart-description
//!
//! The schema is the serialized [`RenderedChart`]:
//! `{type, config: {title, xAxisLabel, yAxisLabel, width, height, style},
//! series: [{label, points | grid}]}`. It is the lossless interchange
//! encoding: `import_json(to_bytes(chart))` is identity.

use crate::error::ExportResult;
use chartkit_chart::RenderedChart;

/// Serialize a rendered chart to pretty-printed JSON bytes
pub fn to_bytes(chart: &RenderedChart) -> ExportResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(chart)?)
}

/// Re-import a portable JSON chart-description
pub fn import_json(bytes: &[u8]) -> ExportResult<RenderedChart> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartkit_chart::{render, ChartConfig, ChartKind};
    use chartkit_core::{Column, DataFormat, DataSource, MatrixData, TableData};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_points() {
        let table = TableData::new(vec![
            Column::new("x", vec![0.0, 1.0]),
            Column::new("y", vec![2.0, 4.0]),
        ])
        .unwrap();
        let data = DataSource::table(DataFormat::Manual, table);
        let rendered = render(
            ChartKind::Scatter,
            &ChartConfig::default().with_title("scatter"),
            &data,
        )
        .unwrap();

        let bytes = to_bytes(&rendered).unwrap();
        assert_eq!(import_json(&bytes).unwrap(), rendered);
    }

    #[test]
    fn test_round_trip_grid() {
        let matrix = MatrixData::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let data = DataSource::matrix(DataFormat::Manual, matrix);
        let rendered = render(ChartKind::Heatmap, &ChartConfig::default(), &data).unwrap();

        let bytes = to_bytes(&rendered).unwrap();
        assert_eq!(import_json(&bytes).unwrap(), rendered);
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(import_json(b"{not json").is_err());
    }
}
