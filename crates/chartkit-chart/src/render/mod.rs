//! Declarative chart rendering
//!
//! Rendering turns a chart kind, a config and a dataset into a
//! [`RenderedChart`]: plain series data plus the config it was rendered
//! with. Nothing here touches pixels — the structure is the portable JSON
//! chart-description of the boundary, and rasterization is the exporter's
//! job.

pub mod basic;
pub mod matrix;
pub mod statistical;
pub mod time;

use crate::config::ChartConfig;
use crate::error::{ChartError, ChartResult};
use crate::kind::ChartKind;
use chartkit_core::{DataSource, TableData};
use serde::{Deserialize, Serialize};

/// A rendered, backend-agnostic chart description.
///
/// Serializing this struct yields the portable JSON chart-description;
/// deserializing that JSON and rendering it again reproduces the identical
/// structure (the export round-trip law).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedChart {
    /// Chart kind (wire name)
    #[serde(rename = "type")]
    pub kind: ChartKind,
    /// Config the chart was rendered with
    pub config: ChartConfig,
    /// Series in palette order
    pub series: Vec<RenderSeries>,
}

/// One rendered series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSeries {
    /// Display label
    pub label: String,
    /// Point or grid payload
    #[serde(flatten)]
    pub data: SeriesData,
}

/// Series payload: xy points for table-backed kinds, a value grid for
/// matrix kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesData {
    Points(Vec<[f64; 2]>),
    Grid(Vec<Vec<f64>>),
}

/// Render a dataset as the given chart kind.
///
/// The match is exhaustive over the closed kind set; adding a kind without
/// a renderer is a compile error.
pub fn render(
    kind: ChartKind,
    config: &ChartConfig,
    data: &DataSource,
) -> ChartResult<RenderedChart> {
    config.validate()?;

    let series = match kind {
        ChartKind::Line | ChartKind::Scatter => basic::xy_series(kind, data)?,
        ChartKind::Bar => basic::bar_series(data)?,
        ChartKind::Pie => basic::pie_series(data)?,
        ChartKind::Histogram => statistical::histogram_series(data)?,
        ChartKind::BoxPlot => statistical::box_series(data)?,
        ChartKind::ViolinPlot => statistical::violin_series(data)?,
        ChartKind::Heatmap | ChartKind::Surface | ChartKind::Contour => {
            matrix::grid_series(kind, data)?
        }
        ChartKind::TimeSeries => time::time_series(data)?,
        ChartKind::Candlestick => time::candlestick_series(data)?,
    };

    Ok(RenderedChart {
        kind,
        config: config.clone(),
        series,
    })
}

/// Borrow the table payload, or fail with an `InvalidData` naming the kind
pub(crate) fn table_of<'a>(data: &'a DataSource, kind: ChartKind) -> ChartResult<&'a TableData> {
    data.as_table().ok_or_else(|| ChartError::InvalidData {
        kind: kind.as_str(),
        message: "requires tabular data, got a matrix".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartkit_core::{Column, DataFormat, MatrixData};
    use pretty_assertions::assert_eq;

    fn table_source(columns: Vec<Column>) -> DataSource {
        DataSource::table(DataFormat::Manual, TableData::new(columns).unwrap())
    }

    #[test]
    fn test_line_render_shape() {
        let data = table_source(vec![
            Column::new("t", vec![0.0, 1.0, 2.0]),
            Column::new("a", vec![1.0, 2.0, 3.0]),
            Column::new("b", vec![3.0, 2.0, 1.0]),
        ]);
        let rendered = render(ChartKind::Line, &ChartConfig::default(), &data).unwrap();
        assert_eq!(rendered.series.len(), 2);
        assert_eq!(rendered.series[0].label, "a");
        assert_eq!(
            rendered.series[0].data,
            SeriesData::Points(vec![[0.0, 1.0], [1.0, 2.0], [2.0, 3.0]])
        );
    }

    #[test]
    fn test_grid_kind_accepts_matrix() {
        let matrix = MatrixData::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let data = DataSource::matrix(DataFormat::Manual, matrix);
        let rendered = render(ChartKind::Heatmap, &ChartConfig::default(), &data).unwrap();
        assert_eq!(rendered.series.len(), 1);
        assert!(matches!(rendered.series[0].data, SeriesData::Grid(_)));
    }

    #[test]
    fn test_json_schema_field_names() {
        let data = table_source(vec![Column::new("y", vec![1.0, 2.0])]);
        let rendered = render(ChartKind::Line, &ChartConfig::default(), &data).unwrap();
        let json = serde_json::to_value(&rendered).unwrap();
        assert_eq!(json["type"], "line");
        assert!(json["series"][0].get("points").is_some());
        assert!(json["series"][0].get("label").is_some());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let data = table_source(vec![Column::new("y", vec![1.0])]);
        let config = ChartConfig::default().with_size(0, 0);
        assert!(render(ChartKind::Line, &config, &data).is_err());
    }
}
