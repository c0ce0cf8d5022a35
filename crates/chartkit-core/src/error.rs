//! Error types for chartkit-core

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in chartkit-core
#[derive(Debug, Error)]
pub enum Error {
    /// Columns of a table have inconsistent lengths
    #[error("Column '{column}' has {actual} values, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Duplicate column name in a table
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// Matrix dimensions do not match the value grid
    #[error("Matrix dimensions {rows}x{cols} do not match {actual_rows} rows of data")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        actual_rows: usize,
    },

    /// Matrix rows have inconsistent widths
    #[error("Matrix row {row} has {actual} values, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Dataset not found in the store
    #[error("Data not found: {0}")]
    DataNotFound(String),

    /// A decode collaborator failed to produce a dataset
    #[error("Decode error: {0}")]
    Decode(String),

    /// Generic invalid-data error with message
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    /// The stable taxonomy tag for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::DataNotFound(_) => ErrorKind::DataNotFound,
            Error::Decode(_) => ErrorKind::DecodeError,
            _ => ErrorKind::InvalidData,
        }
    }
}

/// Stable error taxonomy surfaced to boundary collaborators.
///
/// Every error in the workspace maps to exactly one of these tags; the tag
/// plus a human-readable message is what crosses the HTTP-facing boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ParseError,
    SecurityViolation,
    ComplexityExceeded,
    UnboundVariable,
    ExecutionTimeout,
    Cancelled,
    EvaluationError,
    UnsupportedChartType,
    UnsupportedExportFormat,
    ChartNotFound,
    DataNotFound,
    InvalidData,
    InvalidConfig,
    DecodeError,
}

impl ErrorKind {
    /// The stable wire tag for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ParseError => "parse_error",
            ErrorKind::SecurityViolation => "security_violation",
            ErrorKind::ComplexityExceeded => "complexity_exceeded",
            ErrorKind::UnboundVariable => "unbound_variable",
            ErrorKind::ExecutionTimeout => "execution_timeout",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::EvaluationError => "evaluation_error",
            ErrorKind::UnsupportedChartType => "unsupported_chart_type",
            ErrorKind::UnsupportedExportFormat => "unsupported_export_format",
            ErrorKind::ChartNotFound => "chart_not_found",
            ErrorKind::DataNotFound => "data_not_found",
            ErrorKind::InvalidData => "invalid_data",
            ErrorKind::InvalidConfig => "invalid_config",
            ErrorKind::DecodeError => "decode_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
