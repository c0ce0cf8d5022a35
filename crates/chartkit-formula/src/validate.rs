//! Security and complexity validation
//!
//! Validation is structural: the parser already cannot produce member
//! access, assignment or indexing, so what remains to enforce is the
//! capability allow-list, a screen over the raw text and literals for
//! constructs that have no business in a data formula, and the complexity
//! ceiling that guards the evaluator from pathological inputs
//! independently of its runtime budget.

use crate::ast::Expr;
use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::SandboxLimits;
use crate::expression::FormulaExpression;
use crate::registry::capabilities;
use chartkit_core::ErrorKind;
use lazy_regex::regex;

/// A single validation failure
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Taxonomy tag (security_violation, complexity_exceeded, ...)
    pub kind: ErrorKind,
    /// Human-readable description, pinpointing the offending construct
    pub message: String,
}

/// Validation outcome: all violations, not just the first
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub valid: bool,
    pub violations: Vec<Violation>,
}

/// Validate a parsed expression against the capability registry and the
/// configured limits.
pub fn validate(expr: &FormulaExpression, limits: &SandboxLimits) -> Validation {
    let mut violations = Vec::new();

    screen_text(&expr.text, limits, &mut violations);
    walk_ast(&expr.ast, &mut violations);

    let score = expr.complexity();
    if score > limits.max_complexity {
        violations.push(Violation {
            kind: ErrorKind::ComplexityExceeded,
            message: format!(
                "complexity {} exceeds the configured ceiling {}",
                score, limits.max_complexity
            ),
        });
    }
    if expr.ast.depth() > limits.max_depth {
        violations.push(Violation {
            kind: ErrorKind::ComplexityExceeded,
            message: format!(
                "nesting depth {} exceeds the configured ceiling {}",
                expr.ast.depth(),
                limits.max_depth
            ),
        });
    }

    Validation {
        valid: violations.is_empty(),
        violations,
    }
}

/// Validate and fail on the first violation, typed.
pub fn check(expr: &FormulaExpression, limits: &SandboxLimits) -> FormulaResult<()> {
    let validation = validate(expr, limits);
    match validation.violations.into_iter().next() {
        None => Ok(()),
        Some(v) => Err(match v.kind {
            ErrorKind::ComplexityExceeded => FormulaError::Complexity {
                score: expr.complexity(),
                limit: limits.max_complexity,
            },
            ErrorKind::EvaluationError => FormulaError::Evaluation(v.message),
            _ => FormulaError::Security(v.message),
        }),
    }
}

fn screen_text(text: &str, limits: &SandboxLimits, violations: &mut Vec<Violation>) {
    if text.len() > limits.max_text_len {
        violations.push(Violation {
            kind: ErrorKind::ComplexityExceeded,
            message: format!(
                "formula text is {} bytes, limit is {}",
                text.len(),
                limits.max_text_len
            ),
        });
    }

    // Constructs that can never be legitimate in a data formula, rejected
    // on the raw text before any structural interpretation
    if regex!(r"__\w+__").is_match(text) {
        violations.push(security("dunder name in formula text"));
    }
    if regex!(r"(?i)\b(import|exec|eval|compile|open|input|getattr|setattr|globals|locals)\b")
        .is_match(text)
    {
        violations.push(security("forbidden keyword in formula text"));
    }
}

fn walk_ast(ast: &Expr, violations: &mut Vec<Violation>) {
    let registry = capabilities();

    ast.walk(&mut |node| match node {
        Expr::Call { name, args } => match registry.get(name) {
            None => violations.push(security(&format!(
                "call to unregistered function '{}'",
                name
            ))),
            Some(def) => {
                if args.len() < def.min_args
                    || def.max_args.map_or(false, |max| args.len() > max)
                {
                    let expected = match def.max_args {
                        Some(max) if max == def.min_args => format!("{}", def.min_args),
                        Some(max) => format!("{}..{}", def.min_args, max),
                        None => format!("{}+", def.min_args),
                    };
                    violations.push(Violation {
                        kind: ErrorKind::EvaluationError,
                        message: format!(
                            "wrong number of arguments for {}: expected {}, got {}",
                            name,
                            expected,
                            args.len()
                        ),
                    });
                }
            }
        },
        Expr::Variable(name) => {
            if registry.contains(name) {
                violations.push(security(&format!(
                    "'{}' is a registered function, not a variable",
                    name
                )));
            }
        }
        Expr::Str(literal) => {
            if looks_like_path(literal) {
                violations.push(security(&format!(
                    "string literal '{}' resembles a module or file path",
                    literal
                )));
            }
        }
        _ => {}
    });
}

fn looks_like_path(literal: &str) -> bool {
    literal.contains('/')
        || literal.contains('\\')
        || regex!(r"^\w+(\.\w+)+$").is_match(literal)
}

fn security(message: &str) -> Violation {
    Violation {
        kind: ErrorKind::SecurityViolation,
        message: message.to_string(),
    }
}
