//! Column reductions
//!
//! All reductions run in index order and propagate NaN: a column containing
//! NaN reduces to NaN (the numpy convention the formula language follows).

use super::column_arg;
use crate::error::{FormulaError, FormulaResult};
use crate::value::Value;

fn has_nan(values: &[f64]) -> bool {
    values.iter().any(|v| v.is_nan())
}

pub(crate) fn mean_of(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (ddof = 0)
pub(crate) fn var_of(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean_of(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
}

/// Linear-interpolation quantile over sorted data, q in [0, 1]
pub(crate) fn quantile_of(values: &[f64], q: f64) -> f64 {
    if values.is_empty() || has_nan(values) {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("NaN filtered above"));
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// mean(v)
pub fn fn_mean(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Scalar(mean_of(column_arg(args, "mean")?)))
}

/// std(v) - population standard deviation
pub fn fn_std(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Scalar(var_of(column_arg(args, "std")?).sqrt()))
}

/// var(v) - population variance
pub fn fn_var(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Scalar(var_of(column_arg(args, "var")?)))
}

/// median(v)
pub fn fn_median(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Scalar(quantile_of(
        column_arg(args, "median")?,
        0.5,
    )))
}

/// min(v)
pub fn fn_min(args: &[Value]) -> FormulaResult<Value> {
    let values = column_arg(args, "min")?;
    if values.is_empty() || has_nan(values) {
        return Ok(Value::Scalar(f64::NAN));
    }
    Ok(Value::Scalar(values.iter().copied().fold(f64::INFINITY, f64::min)))
}

/// max(v)
pub fn fn_max(args: &[Value]) -> FormulaResult<Value> {
    let values = column_arg(args, "max")?;
    if values.is_empty() || has_nan(values) {
        return Ok(Value::Scalar(f64::NAN));
    }
    Ok(Value::Scalar(
        values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    ))
}

/// sum(v)
pub fn fn_sum(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Scalar(column_arg(args, "sum")?.iter().sum()))
}

/// count(v) - column length
pub fn fn_count(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Scalar(column_arg(args, "count")?.len() as f64))
}

/// quantile(v, q) with q in [0, 1]
pub fn fn_quantile(args: &[Value]) -> FormulaResult<Value> {
    let values = column_arg(args, "quantile")?;
    let q = args[1].to_scalar("quantile")?;
    if !(0.0..=1.0).contains(&q) {
        return Err(FormulaError::Evaluation(format!(
            "quantile expects q in [0, 1], got {}",
            q
        )));
    }
    Ok(Value::Scalar(quantile_of(values, q)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        let out = fn_mean(&[Value::Vector(vec![1.0, 2.0, 3.0])]).unwrap();
        assert_eq!(out, Value::Scalar(2.0));
    }

    #[test]
    fn test_std_population() {
        // Population std of [1,2,3,4] is sqrt(1.25)
        let out = fn_std(&[Value::Vector(vec![1.0, 2.0, 3.0, 4.0])]).unwrap();
        assert!((out.as_scalar().unwrap() - 1.25f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_median_even() {
        let out = fn_median(&[Value::Vector(vec![4.0, 1.0, 3.0, 2.0])]).unwrap();
        assert_eq!(out, Value::Scalar(2.5));
    }

    #[test]
    fn test_quantile_interpolates() {
        let out = fn_quantile(&[Value::Vector(vec![0.0, 10.0]), Value::Scalar(0.25)]).unwrap();
        assert_eq!(out, Value::Scalar(2.5));
    }

    #[test]
    fn test_quantile_out_of_range() {
        assert!(fn_quantile(&[Value::Vector(vec![1.0]), Value::Scalar(1.5)]).is_err());
    }

    #[test]
    fn test_nan_propagates() {
        let out = fn_min(&[Value::Vector(vec![1.0, f64::NAN])]).unwrap();
        assert!(out.as_scalar().unwrap().is_nan());
        let out = fn_mean(&[Value::Vector(vec![1.0, f64::NAN])]).unwrap();
        assert!(out.as_scalar().unwrap().is_nan());
    }

    #[test]
    fn test_count() {
        let out = fn_count(&[Value::Vector(vec![5.0, 6.0, 7.0])]).unwrap();
        assert_eq!(out, Value::Scalar(3.0));
    }
}
