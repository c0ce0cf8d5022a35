//! Process-wide dataset registry

use crate::error::{Error, Result};
use crate::source::{DataId, DataSource};
use ahash::AHashMap;
use std::sync::{Arc, RwLock};

/// Shared id -> dataset map backing the boundary operations.
///
/// Datasets are immutable, so readers hand out `Arc` clones; the lock only
/// guards the map itself.
#[derive(Debug, Default)]
pub struct DataStore {
    inner: RwLock<AHashMap<DataId, Arc<DataSource>>>,
}

impl DataStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a dataset, returning its id
    pub fn insert(&self, source: DataSource) -> DataId {
        let id = source.id.clone();
        self.inner
            .write()
            .expect("data store lock poisoned")
            .insert(id.clone(), Arc::new(source));
        id
    }

    /// Fetch a dataset by id
    pub fn get(&self, id: &DataId) -> Result<Arc<DataSource>> {
        self.inner
            .read()
            .expect("data store lock poisoned")
            .get(id)
            .cloned()
            .ok_or_else(|| Error::DataNotFound(id.to_string()))
    }

    /// Remove a dataset; returns whether it existed
    pub fn remove(&self, id: &DataId) -> bool {
        self.inner
            .write()
            .expect("data store lock poisoned")
            .remove(id)
            .is_some()
    }

    /// Number of stored datasets
    pub fn len(&self) -> usize {
        self.inner.read().expect("data store lock poisoned").len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DataFormat;
    use crate::table::{Column, TableData};

    fn sample() -> DataSource {
        let table = TableData::new(vec![Column::new("x", vec![1.0, 2.0])]).unwrap();
        DataSource::table(DataFormat::Manual, table)
    }

    #[test]
    fn test_insert_get_remove() {
        let store = DataStore::new();
        let id = store.insert(sample());
        assert_eq!(store.get(&id).unwrap().id, id);
        assert!(store.remove(&id));
        assert!(matches!(
            store.get(&id).unwrap_err(),
            Error::DataNotFound(_)
        ));
    }

    #[test]
    fn test_missing_id_is_data_not_found() {
        let store = DataStore::new();
        let err = store.get(&DataId::from_string("data_none")).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::DataNotFound);
    }
}
