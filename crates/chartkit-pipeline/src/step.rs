//! Typed step records
//!
//! Every stage of a run is materialized as a [`FlowStep`]. Status
//! transitions are monotonic: pending → running → completed or failed,
//! never revisited. The record keeps its own elapsed time; a run's total
//! time is the sum of its steps, not re-measured.

use chartkit_core::ErrorKind;
use std::time::Duration;

/// The fixed stage vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Import,
    Validate,
    Preprocess,
    Transform,
    Chart,
}

impl StepKind {
    /// Stage name as it appears in step records and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Import => "import",
            StepKind::Validate => "validate",
            StepKind::Preprocess => "preprocess",
            StepKind::Transform => "transform",
            StepKind::Chart => "chart",
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step status, monotonic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

/// One stage of one run
#[derive(Debug, Clone)]
pub struct FlowStep {
    /// Position in the run's step sequence
    pub id: usize,
    /// Stage kind
    pub kind: StepKind,
    /// Current status
    pub status: StepStatus,
    /// Error message if the step failed
    pub error: Option<String>,
    /// Stable error tag if the step failed
    pub error_kind: Option<ErrorKind>,
    /// Wall-clock time this step took
    pub elapsed: Duration,
    /// Free-form note ("skipped: no formula")
    pub note: Option<String>,
}

impl FlowStep {
    /// Create a pending step
    pub fn new(id: usize, kind: StepKind) -> Self {
        Self {
            id,
            kind,
            status: StepStatus::Pending,
            error: None,
            error_kind: None,
            elapsed: Duration::ZERO,
            note: None,
        }
    }

    /// pending → running
    pub fn start(&mut self) {
        debug_assert_eq!(self.status, StepStatus::Pending);
        self.status = StepStatus::Running;
    }

    /// running → completed
    pub fn complete(&mut self, elapsed: Duration) {
        debug_assert_eq!(self.status, StepStatus::Running);
        self.status = StepStatus::Completed;
        self.elapsed = elapsed;
    }

    /// running → completed, with a note
    pub fn complete_with_note(&mut self, elapsed: Duration, note: &str) {
        self.complete(elapsed);
        self.note = Some(note.to_string());
    }

    /// running → failed
    pub fn fail(&mut self, elapsed: Duration, kind: ErrorKind, message: String) {
        debug_assert_eq!(self.status, StepStatus::Running);
        self.status = StepStatus::Failed;
        self.elapsed = elapsed;
        self.error = Some(message);
        self.error_kind = Some(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut step = FlowStep::new(0, StepKind::Import);
        assert_eq!(step.status, StepStatus::Pending);
        step.start();
        step.complete(Duration::from_millis(5));
        assert_eq!(step.status, StepStatus::Completed);
        assert_eq!(step.elapsed, Duration::from_millis(5));
        assert!(step.error.is_none());
    }

    #[test]
    fn test_failure_keeps_kind_and_message() {
        let mut step = FlowStep::new(3, StepKind::Transform);
        step.start();
        step.fail(
            Duration::from_millis(1),
            ErrorKind::UnboundVariable,
            "unbound variable: y".into(),
        );
        assert_eq!(step.status, StepStatus::Failed);
        assert_eq!(step.error_kind, Some(ErrorKind::UnboundVariable));
    }
}
