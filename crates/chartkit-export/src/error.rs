//! Export error types

use chartkit_core::ErrorKind;
use thiserror::Error;

/// Result type for export operations
pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Errors that can occur exporting or re-importing charts
#[derive(Debug, Error)]
pub enum ExportError {
    /// Format string outside the supported set
    #[error("Unsupported export format: '{requested}'. Supported formats: {supported}")]
    UnsupportedFormat {
        requested: String,
        supported: String,
    },

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// PNG encoding failure
    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),
}

impl ExportError {
    /// The stable taxonomy tag for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExportError::UnsupportedFormat { .. } => ErrorKind::UnsupportedExportFormat,
            ExportError::Json(_) | ExportError::Png(_) => ErrorKind::InvalidData,
        }
    }
}
