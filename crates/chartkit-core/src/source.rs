//! Immutable, identified datasets

use crate::decode::DataFormat;
use crate::matrix::MatrixData;
use crate::table::TableData;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DATA_ID: AtomicU64 = AtomicU64::new(1);

/// Unique dataset identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DataId(String);

impl DataId {
    /// Allocate a fresh process-unique id
    pub fn fresh() -> Self {
        DataId(format!(
            "data_{:08x}",
            NEXT_DATA_ID.fetch_add(1, Ordering::Relaxed)
        ))
    }

    /// Wrap an externally supplied id
    pub fn from_string<S: Into<String>>(id: S) -> Self {
        DataId(id.into())
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DataId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dataset payload: rectangular table or 2D matrix
#[derive(Debug, Clone, PartialEq)]
pub enum DataContent {
    Table(TableData),
    Matrix(MatrixData),
}

/// Metadata recorded when a dataset is created
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Id of the dataset this one was derived from, if any
    pub derived_from: Option<DataId>,
    /// Free-form origin note (file name, "transform", ...)
    pub origin: Option<String>,
}

impl SourceMetadata {
    fn now() -> Self {
        Self {
            created_at: Utc::now(),
            derived_from: None,
            origin: None,
        }
    }
}

/// An immutable dataset.
///
/// A transform never mutates a `DataSource` in place; it produces a new one
/// whose metadata points back at the input via `derived_from`.
#[derive(Debug, Clone)]
pub struct DataSource {
    /// Unique id
    pub id: DataId,
    /// Declared input format
    pub format: DataFormat,
    /// The data itself
    pub content: DataContent,
    /// Creation metadata
    pub metadata: SourceMetadata,
}

impl DataSource {
    /// Create a table-backed dataset with a fresh id
    pub fn table(format: DataFormat, table: TableData) -> Self {
        Self {
            id: DataId::fresh(),
            format,
            content: DataContent::Table(table),
            metadata: SourceMetadata::now(),
        }
    }

    /// Create a matrix-backed dataset with a fresh id
    pub fn matrix(format: DataFormat, matrix: MatrixData) -> Self {
        Self {
            id: DataId::fresh(),
            format,
            content: DataContent::Matrix(matrix),
            metadata: SourceMetadata::now(),
        }
    }

    /// Create a dataset derived from `parent`, recording the lineage
    pub fn derived(parent: &DataSource, content: DataContent, origin: &str) -> Self {
        Self {
            id: DataId::fresh(),
            format: parent.format,
            content,
            metadata: SourceMetadata {
                created_at: Utc::now(),
                derived_from: Some(parent.id.clone()),
                origin: Some(origin.to_string()),
            },
        }
    }

    /// The table payload, if this is a table-backed dataset
    pub fn as_table(&self) -> Option<&TableData> {
        match &self.content {
            DataContent::Table(t) => Some(t),
            DataContent::Matrix(_) => None,
        }
    }

    /// The matrix payload, if this is a matrix-backed dataset
    pub fn as_matrix(&self) -> Option<&MatrixData> {
        match &self.content {
            DataContent::Matrix(m) => Some(m),
            DataContent::Table(_) => None,
        }
    }

    /// (rows, cols) of the payload
    pub fn shape(&self) -> (usize, usize) {
        match &self.content {
            DataContent::Table(t) => (t.row_count(), t.column_count()),
            DataContent::Matrix(m) => m.dimensions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    #[test]
    fn test_fresh_ids_unique() {
        let a = DataId::fresh();
        let b = DataId::fresh();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("data_"));
    }

    #[test]
    fn test_derived_records_lineage() {
        let table = TableData::new(vec![Column::new("x", vec![1.0])]).unwrap();
        let parent = DataSource::table(DataFormat::Manual, table.clone());
        let child = DataSource::derived(&parent, DataContent::Table(table), "transform");
        assert_eq!(child.metadata.derived_from.as_ref(), Some(&parent.id));
        assert_ne!(child.id, parent.id);
        assert_eq!(child.metadata.origin.as_deref(), Some("transform"));
    }
}
