//! # chartkit-export
//!
//! Serializes rendered chart definitions into portable or displayable
//! encodings:
//!
//! - **json** — the portable chart-description. Lossless: re-importing the
//!   bytes reproduces the rendered definition exactly.
//! - **svg** — a vector image. Visually faithful, lossy w.r.t. later edits.
//! - **png** — a raster image encoded from an internal scanline canvas.
//!
//! ## Example
//!
//! ```rust
//! use chartkit_chart::{render, ChartConfig, ChartKind};
//! use chartkit_core::{Column, DataFormat, DataSource, TableData};
//! use chartkit_export::{export, import_json, ExportFormat};
//!
//! let table = TableData::new(vec![Column::new("y", vec![1.0, 3.0, 2.0])]).unwrap();
//! let data = DataSource::table(DataFormat::Manual, table);
//! let rendered = render(ChartKind::Line, &ChartConfig::default(), &data).unwrap();
//!
//! let bytes = export(&rendered, ExportFormat::Json).unwrap();
//! assert_eq!(import_json(&bytes).unwrap(), rendered);
//! ```

pub mod error;
pub mod format;
pub mod json;
pub mod png_backend;
pub mod raster;
pub mod scene;
pub mod svg;

pub use error::{ExportError, ExportResult};
pub use format::ExportFormat;
pub use json::import_json;

use chartkit_chart::RenderedChart;

/// Export a rendered chart in the requested format.
pub fn export(chart: &RenderedChart, format: ExportFormat) -> ExportResult<Vec<u8>> {
    match format {
        ExportFormat::Json => json::to_bytes(chart),
        ExportFormat::Svg => Ok(svg::to_svg(chart).into_bytes()),
        ExportFormat::Png => png_backend::to_png(chart),
    }
}
