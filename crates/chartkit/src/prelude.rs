//! Prelude module - common imports for chartkit users
//!
//! ```rust
//! use chartkit::prelude::*;
//! ```

pub use crate::{
    // Formula types
    Bindings,
    CancelToken,
    // Chart types
    ChartConfig,
    ChartId,
    ChartKind,
    ChartRegistry,
    // Pipeline types
    ChartRequest,
    // Service
    ChartService,
    ChartStyle,
    // Core data types
    Column,
    DataFormat,
    DataId,
    DataSource,
    DataStore,
    // Error types
    ErrorKind,
    ExportFormat,
    FlowInput,
    FlowResult,
    FormulaExpression,
    MatrixData,
    Orchestrator,
    RenderedChart,
    RunState,
    Sandbox,
    SeriesData,
    SandboxLimits,
    StepKind,
    StepStatus,
    TableData,
};

// Free functions
pub use crate::{capabilities, compile, export, import_json, parse_formula, render, validate};
