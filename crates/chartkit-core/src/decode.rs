//! The decode boundary.
//!
//! File-format parsing is a collaborator concern: the core never reads raw
//! bytes. A decoder turns `(bytes, declared format, options)` into a
//! [`DataSource`] and hands it to the pipeline.

use crate::error::Result;
use crate::source::DataSource;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Declared input formats the pipeline recognizes.
///
/// The core does not parse any of these itself; the variant travels in
/// [`DataSource::format`] as provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Csv,
    Xlsx,
    Json,
    Txt,
    /// Data assembled in memory rather than decoded from bytes
    Manual,
}

impl DataFormat {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            DataFormat::Csv => "csv",
            DataFormat::Xlsx => "xlsx",
            DataFormat::Json => "json",
            DataFormat::Txt => "txt",
            DataFormat::Manual => "manual",
        }
    }
}

impl FromStr for DataFormat {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(DataFormat::Csv),
            "xlsx" | "excel" => Ok(DataFormat::Xlsx),
            "json" => Ok(DataFormat::Json),
            "txt" => Ok(DataFormat::Txt),
            "manual" => Ok(DataFormat::Manual),
            other => Err(crate::error::Error::Decode(format!(
                "Unsupported data format: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options a decoder may honor
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Treat the first row as column headers
    pub has_headers: bool,
    /// Maximum accepted input size in bytes, if any
    pub max_size: Option<usize>,
}

/// Boundary trait implemented by file-format collaborators.
pub trait DataDecoder {
    /// Decode raw bytes declared to be `format` into a dataset.
    fn decode(&self, bytes: &[u8], format: DataFormat, options: &DecodeOptions)
        -> Result<DataSource>;
}
