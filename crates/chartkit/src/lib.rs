//! # chartkit
//!
//! A library for turning tabular and matrix data into renderable chart
//! artifacts, with a sandboxed formula language in between.
//!
//! chartkit provides:
//!
//! - A closed-grammar formula language evaluated under strict allow-listing
//!   with time, complexity and memory budgets
//! - A staged pipeline (import → validate → preprocess → transform → chart)
//!   with per-stage status and timing and fail-fast semantics
//! - A chart registry with per-id locking and consistent
//!   create/update/export behavior
//! - Exporters for a portable JSON chart-description, SVG and PNG
//!
//! ## Example
//!
//! ```rust
//! use chartkit::prelude::*;
//!
//! let table = TableData::new(vec![Column::new("x", vec![1.0, 2.0, 3.0])]).unwrap();
//! let source = DataSource::table(DataFormat::Manual, table);
//!
//! let registry = ChartRegistry::new();
//! let result = Orchestrator::new(&registry).run(
//!     FlowInput::Source(source),
//!     Some("normalize(x)"),
//!     ChartRequest::new(ChartKind::Line, ChartConfig::default()),
//! );
//! assert_eq!(result.status, RunState::Completed);
//!
//! let bytes = export(result.rendered.as_ref().unwrap(), ExportFormat::Svg).unwrap();
//! assert!(bytes.starts_with(b"<svg"));
//! ```

pub mod api;
pub mod prelude;
pub mod service;

pub use service::{ChartService, ServiceError, ServiceResult, TransformOutput};

// Re-export core types
pub use chartkit_core::{
    CancelToken, Column, DataContent, DataDecoder, DataFormat, DataId, DataSource, DataStore,
    DecodeOptions, Error as CoreError, ErrorKind, MatrixData, MatrixLabels,
    Result as CoreResult, SourceMetadata, TableData,
};

// Re-export formula types
pub use chartkit_formula::{
    capabilities, compile, parse_formula, validate, Bindings, CapabilityRegistry, Category,
    CompiledFormula, Evaluation, ExpressionInfo, FormulaError, FormulaExpression, Sandbox,
    SandboxLimits, Validation, Value, Violation,
};

// Re-export chart types
pub use chartkit_chart::{
    render, ChartConfig, ChartDefinition, ChartError, ChartId, ChartKind, ChartRegistry,
    ChartStyle, RenderSeries, RenderedChart, SeriesData,
};

// Re-export exporters
pub use chartkit_export::{export, import_json, ExportError, ExportFormat};

// Re-export the pipeline
pub use chartkit_pipeline::{
    ChartRequest, FillStrategy, FlowInput, FlowResult, FlowStep, Orchestrator, PipelineError,
    PreprocessOptions, RunState, StepKind, StepStatus, ValidationRules,
};
