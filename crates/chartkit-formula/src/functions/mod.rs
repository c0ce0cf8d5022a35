//! Built-in capability implementations
//!
//! Every function here is deterministic: the same arguments always produce
//! the same value, independent of evaluation order or wall-clock time.

pub mod filter;
pub mod math;
pub mod statistical;
pub mod transform;

use crate::error::{FormulaError, FormulaResult};
use crate::value::Value;

/// Apply `f` element-wise over the first argument, preserving its shape.
pub(crate) fn elementwise(args: &[Value], f: fn(f64) -> f64) -> FormulaResult<Value> {
    match &args[0] {
        Value::Scalar(n) => Ok(Value::Scalar(f(*n))),
        Value::Vector(v) => Ok(Value::Vector(v.iter().map(|&x| f(x)).collect())),
        Value::Str(_) => Err(FormulaError::Evaluation(
            "expected a numeric argument, got a string".into(),
        )),
    }
}

/// Borrow the first argument as a numeric column.
pub(crate) fn column_arg<'a>(args: &'a [Value], function: &str) -> FormulaResult<&'a [f64]> {
    match &args[0] {
        Value::Vector(v) => Ok(v),
        Value::Scalar(n) => Ok(std::slice::from_ref(n)),
        Value::Str(_) => Err(FormulaError::Evaluation(format!(
            "{} expects a numeric column, got a string",
            function
        ))),
    }
}

/// Fetch an optional scalar parameter (window size, exponent, ...) at
/// `index`, falling back to `default`.
pub(crate) fn scalar_param(
    args: &[Value],
    index: usize,
    default: f64,
    function: &str,
) -> FormulaResult<f64> {
    match args.get(index) {
        Some(value) => value.to_scalar(function),
        None => Ok(default),
    }
}

/// A window-size parameter: positive integer, bounded by the column length
/// only implicitly (callers clamp windows to the data).
pub(crate) fn window_param(
    args: &[Value],
    index: usize,
    default: usize,
    function: &str,
) -> FormulaResult<usize> {
    let raw = scalar_param(args, index, default as f64, function)?;
    if !raw.is_finite() || raw < 1.0 || raw.fract() != 0.0 {
        return Err(FormulaError::Evaluation(format!(
            "{} expects a positive integer window, got {}",
            function, raw
        )));
    }
    Ok(raw as usize)
}
