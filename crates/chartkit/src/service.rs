//! The boundary service
//!
//! [`ChartService`] owns a [`DataStore`] and a [`ChartRegistry`] and
//! exposes the operations an HTTP-facing collaborator maps routes onto:
//! transform stored data, create/update/export charts, list capabilities,
//! analyze expressions. Every error carries a stable [`ErrorKind`] tag plus
//! a human-readable message; nothing is swallowed or defaulted.

use chartkit_chart::{ChartConfig, ChartId, ChartKind, ChartRegistry, RenderedChart};
use chartkit_core::{DataId, DataSource, DataStore, ErrorKind};
use chartkit_export::{export, ExportFormat};
use chartkit_formula::{capabilities, Category, FormulaExpression, Sandbox, SandboxLimits};
use chartkit_pipeline::stages::transform::transform;
use chartkit_pipeline::{ChartRequest, FlowInput, FlowResult, Orchestrator};
use std::time::Duration;

/// Result type for service operations
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// A boundary error: stable tag plus message
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ServiceError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ServiceError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

macro_rules! from_error {
    ($ty:ty) => {
        impl From<$ty> for ServiceError {
            fn from(error: $ty) -> Self {
                ServiceError::new(error.kind(), error.to_string())
            }
        }
    };
}

from_error!(chartkit_core::Error);
from_error!(chartkit_formula::FormulaError);
from_error!(chartkit_chart::ChartError);
from_error!(chartkit_export::ExportError);
from_error!(chartkit_pipeline::PipelineError);

/// Outcome of a transform operation
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutput {
    /// Id of the freshly stored result dataset
    pub result_data_id: DataId,
    /// Evaluation wall-clock time
    pub elapsed: Duration,
}

/// One listed capability family
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CapabilityFamily {
    pub category: &'static str,
    pub functions: Vec<&'static str>,
}

/// The process-facing service object. Collaborators hold it behind an
/// `Arc`; all methods take `&self`.
#[derive(Default)]
pub struct ChartService {
    store: DataStore,
    registry: ChartRegistry,
    limits: SandboxLimits,
}

impl ChartService {
    /// Create a service with default sandbox limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service with explicit sandbox limits
    pub fn with_limits(limits: SandboxLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// The dataset store
    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// The chart registry
    pub fn registry(&self) -> &ChartRegistry {
        &self.registry
    }

    /// Ingest an already-decoded dataset, returning its id
    pub fn insert_data(&self, source: DataSource) -> DataId {
        self.store.insert(source)
    }

    /// Apply a formula to a stored dataset; the result is stored as a new
    /// dataset (the input is never mutated).
    pub fn transform_data(&self, data_id: &str, expression: &str) -> ServiceResult<TransformOutput> {
        let source = self.store.get(&DataId::from_string(data_id))?;
        let sandbox = Sandbox::new(self.limits.clone());
        let outcome = transform(&source, expression, &sandbox)?;

        let elapsed = outcome.evaluation.elapsed;
        let result_data_id = self.store.insert(outcome.data);
        log::debug!(
            "transformed {} -> {} in {:?}",
            data_id,
            result_data_id,
            elapsed
        );
        Ok(TransformOutput {
            result_data_id,
            elapsed,
        })
    }

    /// Create a chart over a stored dataset
    pub fn create_chart(
        &self,
        data_id: &str,
        chart_type: &str,
        config: Option<ChartConfig>,
    ) -> ServiceResult<(ChartId, RenderedChart)> {
        let kind: ChartKind = chart_type.parse()?;
        let data = self.store.get(&DataId::from_string(data_id))?;
        let id = self
            .registry
            .create(data, kind, config.unwrap_or_default())?;
        let rendered = self.registry.rendered(&id)?;
        Ok((id, rendered))
    }

    /// Update a chart's bound data and/or config, returning the fresh
    /// rendered definition. Omitted parts are preserved.
    pub fn update_chart(
        &self,
        chart_id: &str,
        data_id: Option<&str>,
        config: Option<ChartConfig>,
    ) -> ServiceResult<RenderedChart> {
        let id = ChartId::from_string(chart_id);
        if let Some(data_id) = data_id {
            let data = self.store.get(&DataId::from_string(data_id))?;
            self.registry.update(&id, data)?;
        }
        if let Some(config) = config {
            self.registry.update_config(&id, config)?;
        }
        Ok(self.registry.rendered(&id)?)
    }

    /// The rendered definition of a chart
    pub fn get_chart(&self, chart_id: &str) -> ServiceResult<RenderedChart> {
        Ok(self.registry.rendered(&ChartId::from_string(chart_id))?)
    }

    /// Remove a chart; returns whether it existed
    pub fn remove_chart(&self, chart_id: &str) -> bool {
        self.registry.remove(&ChartId::from_string(chart_id))
    }

    /// Export a chart in the requested format; returns the bytes and the
    /// matching content type.
    pub fn export_chart(
        &self,
        chart_id: &str,
        format: &str,
    ) -> ServiceResult<(Vec<u8>, &'static str)> {
        let format: ExportFormat = format.parse()?;
        let rendered = self.registry.rendered(&ChartId::from_string(chart_id))?;
        let bytes = export(&rendered, format)?;
        Ok((bytes, format.content_type()))
    }

    /// The capability registry, grouped by family
    pub fn capabilities(&self) -> Vec<CapabilityFamily> {
        [
            Category::Math,
            Category::Statistical,
            Category::Transform,
            Category::Filter,
        ]
        .iter()
        .map(|&category| CapabilityFamily {
            category: category.as_str(),
            functions: capabilities().names_in(category),
        })
        .collect()
    }

    /// Parse and validate an expression without evaluating it
    pub fn analyze_expression(
        &self,
        expression: &str,
    ) -> ServiceResult<chartkit_formula::ExpressionInfo> {
        let parsed = FormulaExpression::parse(expression)?;
        chartkit_formula::validate::check(&parsed, &self.limits)?;
        Ok(parsed.info())
    }

    /// Run a full pipeline against this service's registry
    pub fn run_pipeline(
        &self,
        input: FlowInput,
        formula: Option<&str>,
        request: ChartRequest,
    ) -> FlowResult {
        Orchestrator::new(&self.registry)
            .with_limits(self.limits.clone())
            .run(input, formula, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartkit_core::{Column, DataFormat, TableData};
    use pretty_assertions::assert_eq;

    fn service_with_data(values: Vec<f64>) -> (ChartService, DataId) {
        let service = ChartService::new();
        let table = TableData::new(vec![Column::new("x", values)]).unwrap();
        let id = service.insert_data(DataSource::table(DataFormat::Manual, table));
        (service, id)
    }

    #[test]
    fn test_transform_stores_new_dataset() {
        let (service, id) = service_with_data(vec![1.0, 2.0, 3.0]);
        let output = service.transform_data(id.as_str(), "scale(x, 10)").unwrap();
        assert_ne!(output.result_data_id, id);

        let result = service.store().get(&output.result_data_id).unwrap();
        let table = result.as_table().unwrap();
        assert_eq!(
            table.column("result").unwrap().values,
            vec![10.0, 20.0, 30.0]
        );
    }

    #[test]
    fn test_transform_missing_data_is_data_not_found() {
        let service = ChartService::new();
        let err = service.transform_data("data_none", "x + 1").unwrap_err();
        assert_eq!(err.kind, ErrorKind::DataNotFound);
    }

    #[test]
    fn test_unknown_chart_type_leaves_registry_unchanged() {
        let (service, id) = service_with_data(vec![1.0]);
        let err = service
            .create_chart(id.as_str(), "quadrant_radar", None)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedChartType);
        assert!(service.registry().is_empty());
    }

    #[test]
    fn test_capability_listing() {
        let families = ChartService::new().capabilities();
        assert_eq!(families.len(), 4);
        assert!(families[0].functions.contains(&"sin"));
    }

    #[test]
    fn test_analyze_rejects_security_violation() {
        let err = ChartService::new()
            .analyze_expression("__import__(x)")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::SecurityViolation);
    }
}
