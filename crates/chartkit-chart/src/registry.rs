//! The chart registry
//!
//! A registry is an explicit object passed to whoever needs it — there is
//! no ambient global. Internally it maps chart ids to individually locked
//! definitions: operations on different ids never contend, and operations
//! on the same id are serialized, so an `update` followed by a `get` can
//! never observe a half-written definition. Charts are independent units;
//! no cross-chart transaction guarantees exist or are needed.

use crate::config::ChartConfig;
use crate::definition::{ChartDefinition, ChartId};
use crate::error::{ChartError, ChartResult};
use crate::kind::ChartKind;
use crate::render::RenderedChart;
use ahash::AHashMap;
use chartkit_core::DataSource;
use std::sync::{Arc, Mutex, RwLock};

/// Shared registry of live charts
#[derive(Debug, Default)]
pub struct ChartRegistry {
    charts: RwLock<AHashMap<ChartId, Arc<Mutex<ChartDefinition>>>>,
}

impl ChartRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a chart and return its fresh id.
    ///
    /// The definition renders eagerly: on any error nothing is inserted
    /// and the registry is unchanged.
    pub fn create(
        &self,
        data: Arc<DataSource>,
        kind: ChartKind,
        config: ChartConfig,
    ) -> ChartResult<ChartId> {
        let definition = ChartDefinition::new(data, kind, config)?;
        let id = definition.id().clone();
        self.charts
            .write()
            .expect("chart registry lock poisoned")
            .insert(id.clone(), Arc::new(Mutex::new(definition)));
        log::debug!("created chart {} ({})", id, kind);
        Ok(id)
    }

    /// Replace the bound data of an existing chart, preserving its id and
    /// config and invalidating the render cache.
    pub fn update(&self, id: &ChartId, data: Arc<DataSource>) -> ChartResult<()> {
        let entry = self.entry(id)?;
        let mut definition = entry.lock().expect("chart lock poisoned");
        definition.update_data(data);
        log::debug!("updated data of chart {}", id);
        Ok(())
    }

    /// Replace the config of an existing chart
    pub fn update_config(&self, id: &ChartId, config: ChartConfig) -> ChartResult<()> {
        config.validate()?;
        let entry = self.entry(id)?;
        let mut definition = entry.lock().expect("chart lock poisoned");
        definition.update_config(config);
        Ok(())
    }

    /// The rendered definition of a chart
    pub fn rendered(&self, id: &ChartId) -> ChartResult<RenderedChart> {
        let entry = self.entry(id)?;
        let mut definition = entry.lock().expect("chart lock poisoned");
        definition.rendered().cloned()
    }

    /// The kind and config of a chart (config-only read; the render cache
    /// is untouched)
    pub fn describe(&self, id: &ChartId) -> ChartResult<(ChartKind, ChartConfig)> {
        let entry = self.entry(id)?;
        let definition = entry.lock().expect("chart lock poisoned");
        Ok((definition.kind(), definition.config().clone()))
    }

    /// Remove a chart; returns whether it existed
    pub fn remove(&self, id: &ChartId) -> bool {
        let removed = self
            .charts
            .write()
            .expect("chart registry lock poisoned")
            .remove(id)
            .is_some();
        if removed {
            log::debug!("removed chart {}", id);
        }
        removed
    }

    /// Ids of all live charts, sorted
    pub fn ids(&self) -> Vec<ChartId> {
        let mut ids: Vec<_> = self
            .charts
            .read()
            .expect("chart registry lock poisoned")
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    /// Number of live charts
    pub fn len(&self) -> usize {
        self.charts
            .read()
            .expect("chart registry lock poisoned")
            .len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone the per-id handle out of the map, holding the map lock only
    /// for the lookup.
    fn entry(&self, id: &ChartId) -> ChartResult<Arc<Mutex<ChartDefinition>>> {
        self.charts
            .read()
            .expect("chart registry lock poisoned")
            .get(id)
            .cloned()
            .ok_or_else(|| ChartError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartkit_core::{Column, DataFormat, TableData};

    fn data(values: Vec<f64>) -> Arc<DataSource> {
        let table = TableData::new(vec![Column::new("y", values)]).unwrap();
        Arc::new(DataSource::table(DataFormat::Manual, table))
    }

    #[test]
    fn test_create_get_remove() {
        let registry = ChartRegistry::new();
        let id = registry
            .create(data(vec![1.0, 2.0]), ChartKind::Line, ChartConfig::default())
            .unwrap();
        assert_eq!(registry.len(), 1);

        let rendered = registry.rendered(&id).unwrap();
        assert_eq!(rendered.kind, ChartKind::Line);

        assert!(registry.remove(&id));
        assert!(!registry.remove(&id));
        assert!(matches!(
            registry.rendered(&id),
            Err(ChartError::NotFound(_))
        ));
    }

    #[test]
    fn test_failed_create_leaves_registry_unchanged() {
        let registry = ChartRegistry::new();
        // Candlestick over a single column cannot render
        let result = registry.create(
            data(vec![1.0]),
            ChartKind::Candlestick,
            ChartConfig::default(),
        );
        assert!(result.is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_update_preserves_config() {
        let registry = ChartRegistry::new();
        let config = ChartConfig::default().with_title("kept");
        let id = registry
            .create(data(vec![1.0]), ChartKind::Line, config)
            .unwrap();

        registry.update(&id, data(vec![5.0, 6.0])).unwrap();
        let (_, config) = registry.describe(&id).unwrap();
        assert_eq!(config.title, "kept");

        let rendered = registry.rendered(&id).unwrap();
        if let crate::render::SeriesData::Points(points) = &rendered.series[0].data {
            assert_eq!(points.len(), 2);
        } else {
            panic!("Expected points");
        }
    }

    #[test]
    fn test_concurrent_distinct_ids() {
        let registry = Arc::new(ChartRegistry::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(std::thread::spawn(move || {
                let id = registry
                    .create(data(vec![1.0, 2.0]), ChartKind::Bar, ChartConfig::default())
                    .unwrap();
                registry.update(&id, data(vec![3.0])).unwrap();
                registry.rendered(&id).unwrap();
                id
            }));
        }
        let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(registry.len(), 8);
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 8);
    }
}
