//! Sandboxed formula evaluation
//!
//! Evaluation walks the validated AST directly — formula text is never
//! re-parsed or re-interpreted once compiled. Capability names are resolved
//! exactly once, in [`compile`]; the evaluator dispatches through the
//! resolved handles, so no late-bound name can reach anything outside the
//! registry.
//!
//! Numeric operations are vectorized over whole columns. Long element-wise
//! loops run in fixed-size chunks with the wall-clock budget and the cancel
//! token checked between chunks; results are combined in index order, so
//! chunking never affects the value. On timeout or cancellation partial
//! results are discarded, never returned.

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use crate::expression::FormulaExpression;
use crate::registry::{capabilities, CapabilityDef};
use crate::validate;
use crate::value::Value;
use ahash::AHashMap;
use chartkit_core::{CancelToken, TableData};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Elements processed between budget checks in vectorized loops
const CHUNK_SIZE: usize = 4096;

/// Resource limits for validation and evaluation
#[derive(Debug, Clone)]
pub struct SandboxLimits {
    /// Wall-clock budget for one evaluation
    pub timeout: Duration,
    /// Ceiling on node count + nesting depth
    pub max_complexity: usize,
    /// Ceiling on nesting depth alone
    pub max_depth: usize,
    /// Ceiling on rows x AST nodes, checked before execution starts
    pub max_cells: usize,
    /// Ceiling on formula text length in bytes
    pub max_text_len: usize,
}

impl Default for SandboxLimits {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_complexity: 200,
            max_depth: 10,
            max_cells: 10_000_000,
            max_text_len: 1000,
        }
    }
}

/// A validated formula with capability names resolved to registry handles
#[derive(Debug)]
pub struct CompiledFormula {
    expression: FormulaExpression,
    resolved: AHashMap<String, &'static CapabilityDef>,
}

impl CompiledFormula {
    /// The underlying expression
    pub fn expression(&self) -> &FormulaExpression {
        &self.expression
    }
}

/// Validate an expression and resolve its capability calls.
///
/// Fails with `SecurityViolation` / `ComplexityExceeded` before any
/// evaluation can be attempted.
pub fn compile(
    expression: FormulaExpression,
    limits: &SandboxLimits,
) -> FormulaResult<CompiledFormula> {
    validate::check(&expression, limits)?;

    let mut names = Vec::new();
    expression.ast.walk(&mut |node| {
        if let Expr::Call { name, .. } = node {
            names.push(name.clone());
        }
    });

    let registry = capabilities();
    let mut resolved = AHashMap::new();
    for name in names {
        let def = registry
            .get(&name)
            .ok_or_else(|| FormulaError::UnknownFunction(name.clone()))?;
        resolved.insert(name, def);
    }

    Ok(CompiledFormula {
        expression,
        resolved,
    })
}

/// Column bindings for a formula's free variables
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    columns: BTreeMap<String, Vec<f64>>,
}

impl Bindings {
    /// Empty bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a column of values to a variable name
    pub fn bind<S: Into<String>>(&mut self, name: S, values: Vec<f64>) {
        self.columns.insert(name.into(), values);
    }

    /// Bind every column of a table under its column name
    pub fn from_table(table: &TableData) -> Self {
        let mut bindings = Self::new();
        for column in table.columns() {
            bindings.bind(column.name.clone(), column.values.clone());
        }
        bindings
    }

    /// Look up a bound column
    pub fn get(&self, name: &str) -> Option<&Vec<f64>> {
        self.columns.get(name)
    }

    /// Whether `name` is bound
    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }
}

/// Successful evaluation outcome
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Resulting value
    pub value: Value,
    /// Wall-clock time the evaluation took
    pub elapsed: Duration,
}

/// Deadline and cancellation state for one evaluation
struct Clock {
    start: Instant,
    budget: Duration,
    cancel: CancelToken,
}

impl Clock {
    fn check(&self) -> FormulaResult<()> {
        if self.cancel.is_cancelled() {
            return Err(FormulaError::Cancelled);
        }
        let elapsed = self.start.elapsed();
        if elapsed >= self.budget {
            return Err(FormulaError::Timeout {
                elapsed_ms: elapsed.as_millis(),
                budget_ms: self.budget.as_millis(),
            });
        }
        Ok(())
    }
}

/// The sandboxed evaluator
#[derive(Debug, Clone)]
pub struct Sandbox {
    limits: SandboxLimits,
    cancel: CancelToken,
}

impl Sandbox {
    /// Create a sandbox with the given limits and a private cancel token
    pub fn new(limits: SandboxLimits) -> Self {
        Self {
            limits,
            cancel: CancelToken::new(),
        }
    }

    /// Create a sandbox sharing an external cancel token
    pub fn with_cancel(limits: SandboxLimits, cancel: CancelToken) -> Self {
        Self { limits, cancel }
    }

    /// The configured limits
    pub fn limits(&self) -> &SandboxLimits {
        &self.limits
    }

    /// Evaluate a compiled formula against column bindings.
    ///
    /// Missing bindings, mismatched column lengths and over-budget inputs
    /// all fail before any computation starts.
    pub fn evaluate(
        &self,
        formula: &CompiledFormula,
        bindings: &Bindings,
    ) -> FormulaResult<Evaluation> {
        let expr = &formula.expression;

        // Every free variable must be bound before execution starts
        for name in &expr.free_variables {
            if !bindings.contains(name) {
                return Err(FormulaError::UnboundVariable(name.clone()));
            }
        }

        // Bound columns must agree on length
        let mut rows: Option<usize> = None;
        for name in &expr.free_variables {
            let len = bindings.get(name).map(Vec::len).unwrap_or(0);
            match rows {
                None => rows = Some(len),
                Some(expected) if expected != len => {
                    return Err(FormulaError::LengthMismatch {
                        left: expected,
                        right: len,
                    })
                }
                Some(_) => {}
            }
        }

        // Memory guard: rows x nodes, checked before execution begins
        let cells = rows.unwrap_or(1).max(1) * expr.ast.node_count();
        if cells > self.limits.max_cells {
            return Err(FormulaError::Budget {
                cells,
                limit: self.limits.max_cells,
            });
        }

        let clock = Clock {
            start: Instant::now(),
            budget: self.limits.timeout,
            cancel: self.cancel.clone(),
        };

        let value = self.eval(&expr.ast, formula, bindings, &clock)?;
        let elapsed = clock.start.elapsed();
        log::debug!(
            "evaluated '{}' over {} rows in {:?}",
            expr.text,
            rows.unwrap_or(0),
            elapsed
        );
        Ok(Evaluation { value, elapsed })
    }

    fn eval(
        &self,
        expr: &Expr,
        formula: &CompiledFormula,
        bindings: &Bindings,
        clock: &Clock,
    ) -> FormulaResult<Value> {
        clock.check()?;

        match expr {
            Expr::Number(n) => Ok(Value::Scalar(*n)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),

            Expr::Variable(name) => bindings
                .get(name)
                .map(|v| Value::Vector(v.clone()))
                .ok_or_else(|| FormulaError::UnboundVariable(name.clone())),

            Expr::UnaryOp { op, operand } => {
                let value = self.eval(operand, formula, bindings, clock)?;
                match op {
                    UnaryOperator::Negate => match value {
                        Value::Scalar(n) => Ok(Value::Scalar(-n)),
                        Value::Vector(v) => {
                            Ok(Value::Vector(self.map_chunked(&v, |x| -x, clock)?))
                        }
                        Value::Str(_) => Err(FormulaError::Evaluation(
                            "cannot negate a string".into(),
                        )),
                    },
                }
            }

            Expr::BinaryOp { op, left, right } => {
                let left = self.eval(left, formula, bindings, clock)?;
                let right = self.eval(right, formula, bindings, clock)?;
                self.binary(*op, left, right, clock)
            }

            Expr::Call { name, args } => {
                // Resolved at compile time; never a registry lookup here
                let def = formula
                    .resolved
                    .get(name)
                    .ok_or_else(|| FormulaError::UnknownFunction(name.clone()))?;

                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval(arg, formula, bindings, clock)?);
                }

                clock.check()?;
                (def.implementation)(&values)
            }
        }
    }

    fn binary(
        &self,
        op: BinaryOperator,
        left: Value,
        right: Value,
        clock: &Clock,
    ) -> FormulaResult<Value> {
        match (left, right) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(apply(op, a, b))),
            (Value::Vector(a), Value::Scalar(b)) => {
                Ok(Value::Vector(self.map_chunked(&a, |x| apply(op, x, b), clock)?))
            }
            (Value::Scalar(a), Value::Vector(b)) => {
                Ok(Value::Vector(self.map_chunked(&b, |x| apply(op, a, x), clock)?))
            }
            (Value::Vector(a), Value::Vector(b)) => {
                if a.len() != b.len() {
                    return Err(FormulaError::LengthMismatch {
                        left: a.len(),
                        right: b.len(),
                    });
                }
                let mut out = Vec::with_capacity(a.len());
                let mut offset = 0;
                while offset < a.len() {
                    clock.check()?;
                    let end = (offset + CHUNK_SIZE).min(a.len());
                    for i in offset..end {
                        out.push(apply(op, a[i], b[i]));
                    }
                    offset = end;
                }
                Ok(Value::Vector(out))
            }
            _ => Err(FormulaError::Evaluation(
                "string operand in arithmetic".into(),
            )),
        }
    }

    fn map_chunked(
        &self,
        values: &[f64],
        f: impl Fn(f64) -> f64,
        clock: &Clock,
    ) -> FormulaResult<Vec<f64>> {
        let mut out = Vec::with_capacity(values.len());
        for chunk in values.chunks(CHUNK_SIZE) {
            clock.check()?;
            out.extend(chunk.iter().map(|&x| f(x)));
        }
        Ok(out)
    }
}

fn apply(op: BinaryOperator, a: f64, b: f64) -> f64 {
    match op {
        BinaryOperator::Add => a + b,
        BinaryOperator::Subtract => a - b,
        BinaryOperator::Multiply => a * b,
        BinaryOperator::Divide => a / b,
        BinaryOperator::Power => a.powf(b),
    }
}
