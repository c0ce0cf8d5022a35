//! The flow orchestrator
//!
//! Drives one run through the fixed stage order, materializing a
//! [`FlowStep`] per stage. Transitions are linear and forward-only; the
//! first failure short-circuits the run and its error is the run's error —
//! later stages are never invoked and there are no retries. The cancel
//! token is checked between stages here (coarse) and inside the evaluator
//! (fine).

use crate::error::{PipelineError, PipelineResult};
use crate::stages::preprocess::{preprocess, PreprocessOptions};
use crate::stages::transform::transform;
use crate::stages::validate::{validate_source, ValidationRules};
use crate::step::{FlowStep, StepKind};
use chartkit_chart::{ChartConfig, ChartId, ChartKind, ChartRegistry, RenderedChart};
use chartkit_core::{
    CancelToken, DataDecoder, DataFormat, DataSource, DecodeOptions, Error as CoreError, ErrorKind,
};
use chartkit_formula::{Sandbox, SandboxLimits};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Run states, forward-only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Pending,
    Importing,
    Validating,
    Preprocessing,
    Transforming,
    ChartCreating,
    Completed,
    Failed,
}

impl RunState {
    /// State name for logs and boundary payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Pending => "pending",
            RunState::Importing => "importing",
            RunState::Validating => "validating",
            RunState::Preprocessing => "preprocessing",
            RunState::Transforming => "transforming",
            RunState::ChartCreating => "chart_creating",
            RunState::Completed => "completed",
            RunState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input to a run: raw bytes for the decode collaborator, or an
/// already-decoded dataset
pub enum FlowInput {
    Bytes {
        bytes: Vec<u8>,
        format: DataFormat,
        options: DecodeOptions,
    },
    Source(DataSource),
}

/// The chart to create at the end of a run
#[derive(Debug, Clone)]
pub struct ChartRequest {
    pub kind: ChartKind,
    pub config: ChartConfig,
}

impl ChartRequest {
    pub fn new(kind: ChartKind, config: ChartConfig) -> Self {
        Self { kind, config }
    }
}

/// Terminal record of a run
#[derive(Debug)]
pub struct FlowResult {
    /// `Completed` or `Failed`
    pub status: RunState,
    /// Step records in execution order; stages never reached are absent
    pub steps: Vec<FlowStep>,
    /// The final dataset, on success
    pub data: Option<Arc<DataSource>>,
    /// The created chart, on success
    pub chart_id: Option<ChartId>,
    /// The rendered definition of the created chart, on success
    pub rendered: Option<RenderedChart>,
    /// The first failing stage's error
    pub error: Option<(ErrorKind, String)>,
}

impl FlowResult {
    /// Total run time: the sum of the step timings, not re-measured
    pub fn total_elapsed(&self) -> Duration {
        self.steps.iter().map(|s| s.elapsed).sum()
    }
}

/// Drives runs against a chart registry
pub struct Orchestrator<'a> {
    registry: &'a ChartRegistry,
    decoder: Option<&'a dyn DataDecoder>,
    limits: SandboxLimits,
    rules: ValidationRules,
    preprocess_options: PreprocessOptions,
    cancel: CancelToken,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator with default limits and no decoder
    pub fn new(registry: &'a ChartRegistry) -> Self {
        Self {
            registry,
            decoder: None,
            limits: SandboxLimits::default(),
            rules: ValidationRules::default(),
            preprocess_options: PreprocessOptions::default(),
            cancel: CancelToken::new(),
        }
    }

    /// Attach the decode collaborator for byte inputs
    pub fn with_decoder(mut self, decoder: &'a dyn DataDecoder) -> Self {
        self.decoder = Some(decoder);
        self
    }

    /// Override the sandbox limits
    pub fn with_limits(mut self, limits: SandboxLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Override the validation rules
    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    /// Override the preprocessing options
    pub fn with_preprocess(mut self, options: PreprocessOptions) -> Self {
        self.preprocess_options = options;
        self
    }

    /// Share a cancel token with this orchestrator
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// The cancel token runs observe
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Execute one run. A `None` formula skips the Transforming stage
    /// (pass-through), it is not a failure.
    pub fn run(
        &self,
        input: FlowInput,
        formula: Option<&str>,
        request: ChartRequest,
    ) -> FlowResult {
        let mut steps = Vec::new();

        log::debug!("run state -> {}", RunState::Importing);
        let decoder = self.decoder;
        let data = match self.stage(&mut steps, StepKind::Import, move || match input {
            FlowInput::Source(source) => Ok(source),
            FlowInput::Bytes {
                bytes,
                format,
                options,
            } => {
                let decoder = decoder.ok_or_else(|| {
                    CoreError::Decode("no decoder configured for byte input".into())
                })?;
                Ok(decoder.decode(&bytes, format, &options)?)
            }
        }) {
            Ok(data) => data,
            Err(error) => return Self::failed(steps, error),
        };

        log::debug!("run state -> {}", RunState::Validating);
        if let Err(error) = self.stage(&mut steps, StepKind::Validate, || {
            validate_source(&data, &self.rules)
        }) {
            return Self::failed(steps, error);
        }

        log::debug!("run state -> {}", RunState::Preprocessing);
        let data = match self.stage(&mut steps, StepKind::Preprocess, || {
            preprocess(&data, &self.preprocess_options)
        }) {
            Ok(data) => data,
            Err(error) => return Self::failed(steps, error),
        };

        log::debug!("run state -> {}", RunState::Transforming);
        let data = match formula {
            Some(text) => {
                let sandbox = Sandbox::with_cancel(self.limits.clone(), self.cancel.clone());
                match self.stage(&mut steps, StepKind::Transform, || {
                    transform(&data, text, &sandbox)
                }) {
                    Ok(outcome) => outcome.data,
                    Err(error) => return Self::failed(steps, error),
                }
            }
            None => {
                let mut step = FlowStep::new(steps.len(), StepKind::Transform);
                step.start();
                step.complete_with_note(Duration::ZERO, "skipped: no formula");
                steps.push(step);
                data
            }
        };

        log::debug!("run state -> {}", RunState::ChartCreating);
        let data = Arc::new(data);
        let chart_data = Arc::clone(&data);
        let registry = self.registry;
        let (chart_id, rendered) =
            match self.stage(&mut steps, StepKind::Chart, move || {
                let id = registry.create(chart_data, request.kind, request.config)?;
                let rendered = registry.rendered(&id)?;
                Ok((id, rendered))
            }) {
                Ok(created) => created,
                Err(error) => return Self::failed(steps, error),
            };

        log::debug!("run state -> {}", RunState::Completed);
        FlowResult {
            status: RunState::Completed,
            steps,
            data: Some(data),
            chart_id: Some(chart_id),
            rendered: Some(rendered),
            error: None,
        }
    }

    /// Run one stage: start a step record, check cancellation, execute,
    /// and close the record either way.
    fn stage<T>(
        &self,
        steps: &mut Vec<FlowStep>,
        kind: StepKind,
        body: impl FnOnce() -> PipelineResult<T>,
    ) -> Result<T, (ErrorKind, String)> {
        let mut step = FlowStep::new(steps.len(), kind);
        step.start();
        let start = Instant::now();

        let outcome = if self.cancel.is_cancelled() {
            Err(PipelineError::Cancelled)
        } else {
            body()
        };

        match outcome {
            Ok(value) => {
                step.complete(start.elapsed());
                steps.push(step);
                Ok(value)
            }
            Err(error) => {
                let tag = error.kind();
                let message = error.to_string();
                log::warn!("stage {} failed: {} ({})", kind, message, tag);
                step.fail(start.elapsed(), tag, message.clone());
                steps.push(step);
                Err((tag, message))
            }
        }
    }

    fn failed(steps: Vec<FlowStep>, error: (ErrorKind, String)) -> FlowResult {
        FlowResult {
            status: RunState::Failed,
            steps,
            data: None,
            chart_id: None,
            rendered: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepStatus;
    use chartkit_core::{Column, Result as CoreResult, TableData};
    use pretty_assertions::assert_eq;

    fn source(values: Vec<f64>) -> DataSource {
        let table = TableData::new(vec![Column::new("x", values)]).unwrap();
        DataSource::table(DataFormat::Manual, table)
    }

    fn request() -> ChartRequest {
        ChartRequest::new(ChartKind::Line, ChartConfig::default())
    }

    #[test]
    fn test_full_run_completes() {
        let registry = ChartRegistry::new();
        let orchestrator = Orchestrator::new(&registry);

        let result = orchestrator.run(
            FlowInput::Source(source(vec![1.0, 2.0, 3.0])),
            Some("scale(x, 2)"),
            request(),
        );

        assert_eq!(result.status, RunState::Completed);
        assert_eq!(result.steps.len(), 5);
        assert!(result
            .steps
            .iter()
            .all(|s| s.status == StepStatus::Completed));
        assert!(result.chart_id.is_some());
        assert!(result.rendered.is_some());
        assert_eq!(registry.len(), 1);

        let total: Duration = result.steps.iter().map(|s| s.elapsed).sum();
        assert_eq!(result.total_elapsed(), total);
    }

    #[test]
    fn test_transform_failure_short_circuits() {
        let registry = ChartRegistry::new();
        let orchestrator = Orchestrator::new(&registry);

        let result = orchestrator.run(
            FlowInput::Source(source(vec![1.0, 2.0])),
            Some("x + y"),
            request(),
        );

        assert_eq!(result.status, RunState::Failed);
        assert!(!result.steps.iter().any(|s| s.kind == StepKind::Chart));
        let (kind, _) = result.error.unwrap();
        assert_eq!(kind, ErrorKind::UnboundVariable);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_missing_formula_skips_transform() {
        let registry = ChartRegistry::new();
        let orchestrator = Orchestrator::new(&registry);

        let result = orchestrator.run(FlowInput::Source(source(vec![1.0, 2.0])), None, request());

        assert_eq!(result.status, RunState::Completed);
        let transform = result
            .steps
            .iter()
            .find(|s| s.kind == StepKind::Transform)
            .unwrap();
        assert_eq!(transform.status, StepStatus::Completed);
        assert_eq!(transform.note.as_deref(), Some("skipped: no formula"));
    }

    #[test]
    fn test_unknown_chart_data_failure_keeps_registry_clean() {
        let registry = ChartRegistry::new();
        let orchestrator = Orchestrator::new(&registry);

        // Candlestick cannot render from a single column
        let result = orchestrator.run(
            FlowInput::Source(source(vec![1.0, 2.0])),
            None,
            ChartRequest::new(ChartKind::Candlestick, ChartConfig::default()),
        );

        assert_eq!(result.status, RunState::Failed);
        assert_eq!(result.error.unwrap().0, ErrorKind::InvalidData);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_cancelled_run_fails_first_stage() {
        let registry = ChartRegistry::new();
        let cancel = CancelToken::new();
        cancel.cancel();
        let orchestrator = Orchestrator::new(&registry).with_cancel(cancel);

        let result = orchestrator.run(
            FlowInput::Source(source(vec![1.0])),
            Some("x + 1"),
            request(),
        );

        assert_eq!(result.status, RunState::Failed);
        assert_eq!(result.steps.len(), 1);
        assert_eq!(result.error.unwrap().0, ErrorKind::Cancelled);
    }

    #[test]
    fn test_bytes_without_decoder_fails_import() {
        let registry = ChartRegistry::new();
        let orchestrator = Orchestrator::new(&registry);

        let result = orchestrator.run(
            FlowInput::Bytes {
                bytes: b"1,2,3".to_vec(),
                format: DataFormat::Csv,
                options: DecodeOptions::default(),
            },
            None,
            request(),
        );

        assert_eq!(result.status, RunState::Failed);
        assert_eq!(result.error.unwrap().0, ErrorKind::DecodeError);
    }

    struct OneColumnDecoder;

    impl DataDecoder for OneColumnDecoder {
        fn decode(
            &self,
            bytes: &[u8],
            format: DataFormat,
            _options: &DecodeOptions,
        ) -> CoreResult<DataSource> {
            let values = std::str::from_utf8(bytes)
                .map_err(|e| CoreError::Decode(e.to_string()))?
                .split(',')
                .map(|v| v.trim().parse::<f64>().unwrap_or(f64::NAN))
                .collect();
            let table = TableData::new(vec![Column::new("x", values)])?;
            Ok(DataSource::table(format, table))
        }
    }

    #[test]
    fn test_bytes_input_through_decoder() {
        let registry = ChartRegistry::new();
        let decoder = OneColumnDecoder;
        let orchestrator = Orchestrator::new(&registry).with_decoder(&decoder);

        let result = orchestrator.run(
            FlowInput::Bytes {
                bytes: b"1, 2, 3".to_vec(),
                format: DataFormat::Csv,
                options: DecodeOptions::default(),
            },
            Some("normalize(x)"),
            request(),
        );

        assert_eq!(result.status, RunState::Completed);
        let table = result.data.unwrap().as_table().unwrap().clone();
        assert_eq!(
            table.column("result").unwrap().values,
            vec![0.0, 0.5, 1.0]
        );
    }
}
