//! Chart error types

use chartkit_core::ErrorKind;
use thiserror::Error;

/// Result type for chart operations
pub type ChartResult<T> = std::result::Result<T, ChartError>;

/// Errors that can occur creating, updating or rendering charts
#[derive(Debug, Error)]
pub enum ChartError {
    /// Chart type string outside the closed set
    #[error("Unsupported chart type: '{requested}'. Supported types: {supported}")]
    UnsupportedType {
        requested: String,
        supported: String,
    },

    /// No chart registered under this id
    #[error("Chart not found: {0}")]
    NotFound(String),

    /// Data shape does not fit the chart kind
    #[error("Invalid data for {kind} chart: {message}")]
    InvalidData { kind: &'static str, message: String },

    /// Config validation failure
    #[error("Invalid chart config: {0}")]
    InvalidConfig(String),
}

impl ChartError {
    /// The stable taxonomy tag for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChartError::UnsupportedType { .. } => ErrorKind::UnsupportedChartType,
            ChartError::NotFound(_) => ErrorKind::ChartNotFound,
            ChartError::InvalidData { .. } => ErrorKind::InvalidData,
            ChartError::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }
}
