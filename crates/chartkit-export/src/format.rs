//! Export formats

use crate::error::{ExportError, ExportResult};
use std::str::FromStr;

/// Supported export encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Portable JSON chart-description (lossless)
    Json,
    /// SVG vector image
    Svg,
    /// PNG raster image
    Png,
}

/// All formats, in preference order
pub const ALL_FORMATS: [ExportFormat; 3] =
    [ExportFormat::Json, ExportFormat::Svg, ExportFormat::Png];

impl ExportFormat {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
        }
    }

    /// MIME type for HTTP responses
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Png => "image/png",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> ExportResult<Self> {
        ALL_FORMATS
            .iter()
            .find(|f| f.as_str() == s.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| ExportError::UnsupportedFormat {
                requested: s.to_string(),
                supported: ALL_FORMATS
                    .iter()
                    .map(|f| f.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
