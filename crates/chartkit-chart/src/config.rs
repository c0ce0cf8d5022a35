//! Chart configuration

use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};

/// Visual configuration of a chart.
///
/// This struct is the `config` object of the portable JSON
/// chart-description, so the field names are fixed wire vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    /// Chart title
    pub title: String,
    /// X axis label
    pub x_axis_label: String,
    /// Y axis label
    pub y_axis_label: String,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Style descriptors
    pub style: ChartStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_axis_label: String::new(),
            y_axis_label: String::new(),
            width: 800,
            height: 600,
            style: ChartStyle::default(),
        }
    }
}

impl ChartConfig {
    /// Set the title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    /// Set both axis labels
    pub fn with_axis_labels<S: Into<String>>(mut self, x: S, y: S) -> Self {
        self.x_axis_label = x.into();
        self.y_axis_label = y.into();
        self
    }

    /// Set the canvas size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Check invariants (positive canvas, non-empty palette)
    pub fn validate(&self) -> ChartResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ChartError::InvalidConfig(format!(
                "canvas size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.style.colors.is_empty() {
            return Err(ChartError::InvalidConfig(
                "style.colors must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Style descriptors applied by whatever backend draws the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartStyle {
    /// Series color palette, hex strings, cycled per series
    pub colors: Vec<String>,
    /// Whether to draw a legend
    pub show_legend: bool,
    /// Whether to draw grid lines
    pub show_grid: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            colors: default_palette(),
            show_legend: true,
            show_grid: true,
        }
    }
}

/// The default series palette
fn default_palette() -> Vec<String> {
    [
        "#409EFF", "#67C23A", "#E6A23C", "#F56C6C", "#909399", "#C71585", "#20B2AA", "#FF69B4",
        "#8A2BE2", "#00CED1",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        ChartConfig::default().validate().unwrap();
    }

    #[test]
    fn test_zero_size_rejected() {
        let config = ChartConfig::default().with_size(0, 600);
        assert!(matches!(
            config.validate(),
            Err(ChartError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(ChartConfig::default()).unwrap();
        assert!(json.get("xAxisLabel").is_some());
        assert!(json.get("yAxisLabel").is_some());
        assert!(json["style"].get("showLegend").is_some());
    }
}
