//! # chartkit-formula
//!
//! Formula parsing, validation and sandboxed evaluation for chartkit.
//!
//! This crate provides:
//! - Formula parsing (text → AST) over a deliberately closed grammar
//! - Security and complexity validation against the capability registry
//! - Vectorized evaluation under wall-clock and memory budgets
//!
//! The grammar is closed by construction: the AST has no member access,
//! no assignment and no indexing, so the allow-list is structural rather
//! than a deny-list applied at call time.
//!
//! ## Example
//!
//! ```rust
//! use chartkit_formula::{compile, Bindings, FormulaExpression, Sandbox, SandboxLimits};
//!
//! let expr = FormulaExpression::parse("mean(x) + 1").unwrap();
//! let compiled = compile(expr, &SandboxLimits::default()).unwrap();
//!
//! let mut bindings = Bindings::new();
//! bindings.bind("x", vec![1.0, 2.0, 3.0]);
//!
//! let sandbox = Sandbox::new(SandboxLimits::default());
//! let eval = sandbox.evaluate(&compiled, &bindings).unwrap();
//! assert_eq!(eval.value.as_scalar(), Some(3.0));
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod expression;
pub mod functions;
pub mod parser;
pub mod registry;
pub mod validate;
pub mod value;

pub use ast::{BinaryOperator, Expr, UnaryOperator};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{compile, Bindings, CompiledFormula, Evaluation, Sandbox, SandboxLimits};
pub use expression::{ExpressionInfo, FormulaExpression};
pub use parser::parse_formula;
pub use registry::{capabilities, CapabilityDef, CapabilityRegistry, Category};
pub use validate::{validate, Validation, Violation};
pub use value::Value;
