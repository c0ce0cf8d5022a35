//! Chart definitions

use crate::config::ChartConfig;
use crate::error::ChartResult;
use crate::kind::ChartKind;
use crate::render::{render, RenderedChart};
use chartkit_core::DataSource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_CHART_ID: AtomicU64 = AtomicU64::new(1);

/// Unique chart identifier, unique for the process lifetime
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartId(String);

impl ChartId {
    /// Allocate a fresh id
    pub fn fresh() -> Self {
        ChartId(format!(
            "chart_{:08x}",
            NEXT_CHART_ID.fetch_add(1, Ordering::Relaxed)
        ))
    }

    /// Wrap an externally supplied id (boundary requests)
    pub fn from_string<S: Into<String>>(id: S) -> Self {
        ChartId(id.into())
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A live chart: kind, config, bound data and the render cache.
///
/// `update_data` invalidates the cache; config-only reads never do.
#[derive(Debug, Clone)]
pub struct ChartDefinition {
    id: ChartId,
    kind: ChartKind,
    config: ChartConfig,
    data: Arc<DataSource>,
    render_cache: Option<RenderedChart>,
}

impl ChartDefinition {
    /// Create a definition with a fresh id. Rendering is attempted
    /// immediately so a definition that cannot render never exists.
    pub fn new(data: Arc<DataSource>, kind: ChartKind, config: ChartConfig) -> ChartResult<Self> {
        let rendered = render(kind, &config, &data)?;
        Ok(Self {
            id: ChartId::fresh(),
            kind,
            config,
            data,
            render_cache: Some(rendered),
        })
    }

    /// The chart id
    pub fn id(&self) -> &ChartId {
        &self.id
    }

    /// The chart kind
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    /// The current config
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// The bound dataset
    pub fn data(&self) -> &Arc<DataSource> {
        &self.data
    }

    /// Replace the bound data, keeping id and config, dropping the cache
    pub fn update_data(&mut self, data: Arc<DataSource>) {
        self.data = data;
        self.render_cache = None;
    }

    /// Replace the config, keeping id and data, dropping the cache
    pub fn update_config(&mut self, config: ChartConfig) {
        self.config = config;
        self.render_cache = None;
    }

    /// The rendered definition, from cache when valid
    pub fn rendered(&mut self) -> ChartResult<&RenderedChart> {
        if self.render_cache.is_none() {
            self.render_cache = Some(render(self.kind, &self.config, &self.data)?);
        }
        Ok(self.render_cache.as_ref().expect("cache filled above"))
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
    fn test_update_data_preserves_id_and_config() {
        let config = ChartConfig::default().with_title("t");
        let mut def = ChartDefinition::new(data(vec![1.0]), ChartKind::Line, config).unwrap();
        let id = def.id().clone();

        def.update_data(data(vec![2.0, 3.0]));
        assert_eq!(def.id(), &id);
        assert_eq!(def.config().title, "t");

        let rendered = def.rendered().unwrap().clone();
        assert_eq!(rendered.series[0].label, "y");
        if let crate::render::SeriesData::Points(points) = &rendered.series[0].data {
            assert_eq!(points.len(), 2);
        } else {
            panic!("Expected points");
        }
    }

    #[test]
    fn test_render_cache_reused() {
        let mut def =
            ChartDefinition::new(data(vec![1.0]), ChartKind::Line, ChartConfig::default())
                .unwrap();
        let a = def.rendered().unwrap().clone();
        let b = def.rendered().unwrap().clone();
        assert_eq!(a, b);
    }
}
