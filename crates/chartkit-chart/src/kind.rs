//! The closed set of chart kinds

use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Chart kinds.
///
/// This is a closed sum type: every renderer and exporter matches it
/// exhaustively, and an unknown type name fails at the boundary with
/// `UnsupportedChartType` rather than falling back to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    // Basic
    #[serde(rename = "line")]
    Line,
    #[serde(rename = "bar")]
    Bar,
    #[serde(rename = "scatter")]
    Scatter,
    #[serde(rename = "pie")]
    Pie,

    // Statistical
    #[serde(rename = "histogram")]
    Histogram,
    #[serde(rename = "box_plot")]
    BoxPlot,
    #[serde(rename = "violin_plot")]
    ViolinPlot,

    // Matrix
    #[serde(rename = "heatmap")]
    Heatmap,
    #[serde(rename = "3d_surface")]
    Surface,
    #[serde(rename = "contour")]
    Contour,

    // Time-indexed
    #[serde(rename = "time_series")]
    TimeSeries,
    #[serde(rename = "candlestick")]
    Candlestick,
}

/// All kinds, in declaration order
pub const ALL_KINDS: [ChartKind; 12] = [
    ChartKind::Line,
    ChartKind::Bar,
    ChartKind::Scatter,
    ChartKind::Pie,
    ChartKind::Histogram,
    ChartKind::BoxPlot,
    ChartKind::ViolinPlot,
    ChartKind::Heatmap,
    ChartKind::Surface,
    ChartKind::Contour,
    ChartKind::TimeSeries,
    ChartKind::Candlestick,
];

impl ChartKind {
    /// The wire name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Scatter => "scatter",
            ChartKind::Pie => "pie",
            ChartKind::Histogram => "histogram",
            ChartKind::BoxPlot => "box_plot",
            ChartKind::ViolinPlot => "violin_plot",
            ChartKind::Heatmap => "heatmap",
            ChartKind::Surface => "3d_surface",
            ChartKind::Contour => "contour",
            ChartKind::TimeSeries => "time_series",
            ChartKind::Candlestick => "candlestick",
        }
    }

    /// Whether this kind renders from a 2D grid rather than a table
    pub fn requires_grid(&self) -> bool {
        matches!(
            self,
            ChartKind::Heatmap | ChartKind::Surface | ChartKind::Contour
        )
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> ChartResult<Self> {
        ALL_KINDS
            .iter()
            .find(|kind| kind.as_str() == s)
            .copied()
            .ok_or_else(|| ChartError::UnsupportedType {
                requested: s.to_string(),
                supported: ALL_KINDS
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for kind in ALL_KINDS {
            assert_eq!(kind.as_str().parse::<ChartKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = "quadrant_radar".parse::<ChartKind>().unwrap_err();
        assert!(matches!(err, ChartError::UnsupportedType { .. }));
        assert_eq!(err.kind(), chartkit_core::ErrorKind::UnsupportedChartType);
    }

    #[test]
    fn test_grid_kinds() {
        assert!(ChartKind::Heatmap.requires_grid());
        assert!(!ChartKind::Line.requires_grid());
    }
}
