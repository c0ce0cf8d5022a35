//! # chartkit-core
//!
//! Core data structures for the chartkit charting pipeline.
//!
//! This crate provides the fundamental types used throughout chartkit:
//! - [`DataSource`] - An immutable, identified dataset (table or matrix)
//! - [`TableData`] and [`Column`] - Rectangular column-oriented data
//! - [`MatrixData`] - 2D numeric grids for matrix chart kinds
//! - [`DataDecoder`] - The boundary trait file-format collaborators implement
//! - [`DataStore`] - A process-wide id -> dataset registry
//! - [`ErrorKind`] - The stable error taxonomy surfaced at the boundary
//!
//! ## Example
//!
//! ```rust
//! use chartkit_core::{Column, DataFormat, DataSource, TableData};
//!
//! let table = TableData::new(vec![
//!     Column::new("x", vec![1.0, 2.0, 3.0]),
//!     Column::new("y", vec![2.0, 4.0, 6.0]),
//! ]).unwrap();
//!
//! let source = DataSource::table(DataFormat::Manual, table);
//! assert_eq!(source.shape(), (3, 2));
//! ```

pub mod cancel;
pub mod decode;
pub mod error;
pub mod matrix;
pub mod source;
pub mod store;
pub mod table;

// Re-exports for convenience
pub use cancel::CancelToken;
pub use decode::{DataDecoder, DataFormat, DecodeOptions};
pub use error::{Error, ErrorKind, Result};
pub use matrix::{MatrixData, MatrixLabels};
pub use source::{DataContent, DataId, DataSource, SourceMetadata};
pub use store::DataStore;
pub use table::{Column, TableData};

/// Maximum number of rows a dataset may carry
pub const MAX_ROWS: usize = 1_000_000;

/// Maximum number of columns a dataset may carry
pub const MAX_COLS: usize = 1_000;
