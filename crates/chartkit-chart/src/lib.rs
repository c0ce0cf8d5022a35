//! # chartkit-chart
//!
//! Chart definitions, declarative rendering and the chart registry.
//!
//! A chart is described, never drawn, in this crate: rendering produces a
//! [`RenderedChart`] — series, axis labels and style descriptors — that any
//! backend can draw. Rasterization lives in `chartkit-export`.
//!
//! ## Example
//!
//! ```rust
//! use chartkit_chart::{ChartConfig, ChartKind, ChartRegistry};
//! use chartkit_core::{Column, DataFormat, DataSource, TableData};
//! use std::sync::Arc;
//!
//! let table = TableData::new(vec![
//!     Column::new("x", vec![0.0, 1.0, 2.0]),
//!     Column::new("y", vec![1.0, 3.0, 2.0]),
//! ]).unwrap();
//! let data = Arc::new(DataSource::table(DataFormat::Manual, table));
//!
//! let registry = ChartRegistry::new();
//! let id = registry.create(data, ChartKind::Line, ChartConfig::default()).unwrap();
//! let rendered = registry.rendered(&id).unwrap();
//! assert_eq!(rendered.series.len(), 1);
//! ```

pub mod config;
pub mod definition;
pub mod error;
pub mod kind;
pub mod registry;
pub mod render;

pub use config::{ChartConfig, ChartStyle};
pub use definition::{ChartDefinition, ChartId};
pub use error::{ChartError, ChartResult};
pub use kind::ChartKind;
pub use registry::ChartRegistry;
pub use render::{render, RenderSeries, RenderedChart, SeriesData};
