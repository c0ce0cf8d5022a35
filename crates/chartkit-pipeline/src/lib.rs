//! # chartkit-pipeline
//!
//! The flow orchestrator: one user request becomes a linear run of typed
//! stages — Import → Validate → Preprocess → Transform → Chart-Create —
//! each independently timed and status-tracked, stopping at the first
//! failure. The orchestrator is the only component holding cross-stage
//! state; every stage consumes the previous stage's output and produces a
//! new immutable value.
//!
//! ## Example
//!
//! ```rust
//! use chartkit_chart::{ChartConfig, ChartKind, ChartRegistry};
//! use chartkit_core::{Column, DataFormat, DataSource, TableData};
//! use chartkit_pipeline::{ChartRequest, FlowInput, Orchestrator, RunState};
//!
//! let registry = ChartRegistry::new();
//! let orchestrator = Orchestrator::new(&registry);
//!
//! let table = TableData::new(vec![Column::new("x", vec![1.0, 2.0, 3.0])]).unwrap();
//! let source = DataSource::table(DataFormat::Manual, table);
//!
//! let result = orchestrator.run(
//!     FlowInput::Source(source),
//!     Some("scale(x, 2)"),
//!     ChartRequest::new(ChartKind::Line, ChartConfig::default()),
//! );
//! assert_eq!(result.status, RunState::Completed);
//! ```

pub mod error;
pub mod orchestrator;
pub mod stages;
pub mod step;

pub use error::{PipelineError, PipelineResult};
pub use orchestrator::{ChartRequest, FlowInput, FlowResult, Orchestrator, RunState};
pub use stages::preprocess::{FillStrategy, PreprocessOptions};
pub use stages::validate::ValidationRules;
pub use step::{FlowStep, StepKind, StepStatus};
