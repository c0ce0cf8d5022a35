//! Pipeline error types

use chartkit_core::ErrorKind;
use thiserror::Error;

/// Result type for pipeline operations
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// Errors that can fail a pipeline stage
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Core data error (decode, store, shape)
    #[error(transparent)]
    Core(#[from] chartkit_core::Error),

    /// Formula parse/validate/evaluate error
    #[error(transparent)]
    Formula(#[from] chartkit_formula::FormulaError),

    /// Chart create/render error
    #[error(transparent)]
    Chart(#[from] chartkit_chart::ChartError),

    /// Structural validation failure
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Run cancelled between stages
    #[error("Run cancelled")]
    Cancelled,
}

impl PipelineError {
    /// The stable taxonomy tag for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Core(e) => e.kind(),
            PipelineError::Formula(e) => e.kind(),
            PipelineError::Chart(e) => e.kind(),
            PipelineError::Validation(_) => ErrorKind::InvalidData,
            PipelineError::Cancelled => ErrorKind::Cancelled,
        }
    }
}
