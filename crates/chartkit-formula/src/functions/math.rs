//! Element-wise math functions

use super::elementwise;
use crate::error::FormulaResult;
use crate::value::Value;

/// sin(x)
pub fn fn_sin(args: &[Value]) -> FormulaResult<Value> {
    elementwise(args, f64::sin)
}

/// cos(x)
pub fn fn_cos(args: &[Value]) -> FormulaResult<Value> {
    elementwise(args, f64::cos)
}

/// tan(x)
pub fn fn_tan(args: &[Value]) -> FormulaResult<Value> {
    elementwise(args, f64::tan)
}

/// log(x) - natural logarithm; non-positive inputs yield -inf/NaN like the
/// underlying float semantics, they are not errors
pub fn fn_log(args: &[Value]) -> FormulaResult<Value> {
    elementwise(args, f64::ln)
}

/// exp(x)
pub fn fn_exp(args: &[Value]) -> FormulaResult<Value> {
    elementwise(args, f64::exp)
}

/// sqrt(x)
pub fn fn_sqrt(args: &[Value]) -> FormulaResult<Value> {
    elementwise(args, f64::sqrt)
}

/// abs(x)
pub fn fn_abs(args: &[Value]) -> FormulaResult<Value> {
    elementwise(args, f64::abs)
}

/// floor(x)
pub fn fn_floor(args: &[Value]) -> FormulaResult<Value> {
    elementwise(args, f64::floor)
}

/// ceil(x)
pub fn fn_ceil(args: &[Value]) -> FormulaResult<Value> {
    elementwise(args, f64::ceil)
}

/// round(x) - half away from zero
pub fn fn_round(args: &[Value]) -> FormulaResult<Value> {
    elementwise(args, f64::round)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sin_vectorized() {
        let out = fn_sin(&[Value::Vector(vec![0.0, std::f64::consts::FRAC_PI_2])]).unwrap();
        let v = out.as_vector().unwrap();
        assert_eq!(v[0], 0.0);
        assert!((v[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sqrt_negative_is_nan() {
        let out = fn_sqrt(&[Value::Scalar(-1.0)]).unwrap();
        assert!(out.as_scalar().unwrap().is_nan());
    }

    #[test]
    fn test_string_rejected() {
        assert!(fn_abs(&[Value::Str("x".into())]).is_err());
    }
}
