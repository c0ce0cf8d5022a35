//! Formula error types

use chartkit_core::ErrorKind;
use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing, validation or evaluation
#[derive(Debug, Error)]
pub enum FormulaError {
    /// Malformed formula text. `position` is the byte offset of the
    /// offending token in the input.
    #[error("Parse error at offset {position}: {message}")]
    Parse { message: String, position: usize },

    /// A construct outside the allowed grammar or registry
    #[error("Security violation: {0}")]
    Security(String),

    /// Call to a name that is not in the capability registry
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Expression exceeds the configured complexity ceiling
    #[error("Expression complexity {score} exceeds limit {limit}")]
    Complexity { score: usize, limit: usize },

    /// Evaluation would touch more cells than the configured ceiling
    #[error("Evaluation would touch {cells} cells, limit is {limit}")]
    Budget { cells: usize, limit: usize },

    /// A free variable has no binding
    #[error("Unbound variable: {0}")]
    UnboundVariable(String),

    /// Wall-clock budget exceeded during evaluation
    #[error("Execution timed out after {elapsed_ms}ms (budget {budget_ms}ms)")]
    Timeout { elapsed_ms: u128, budget_ms: u128 },

    /// Evaluation cancelled through the cancel token
    #[error("Evaluation cancelled")]
    Cancelled,

    /// Wrong number of arguments
    #[error("Wrong number of arguments for {function}: expected {expected}, got {actual}")]
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    /// Bound columns have different lengths
    #[error("Column length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Generic evaluation error
    #[error("Evaluation error: {0}")]
    Evaluation(String),
}

impl FormulaError {
    /// The stable taxonomy tag for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            FormulaError::Parse { .. } => ErrorKind::ParseError,
            FormulaError::Security(_) | FormulaError::UnknownFunction(_) => {
                ErrorKind::SecurityViolation
            }
            FormulaError::Complexity { .. } | FormulaError::Budget { .. } => {
                ErrorKind::ComplexityExceeded
            }
            FormulaError::UnboundVariable(_) => ErrorKind::UnboundVariable,
            FormulaError::Timeout { .. } => ErrorKind::ExecutionTimeout,
            FormulaError::Cancelled => ErrorKind::Cancelled,
            FormulaError::ArgumentCount { .. }
            | FormulaError::LengthMismatch { .. }
            | FormulaError::Evaluation(_) => ErrorKind::EvaluationError,
        }
    }
}
