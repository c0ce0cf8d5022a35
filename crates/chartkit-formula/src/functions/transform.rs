//! Column-to-column transforms

use super::{column_arg, scalar_param};
use super::statistical::{mean_of, var_of};
use crate::error::FormulaResult;
use crate::value::Value;

/// normalize(v) - rescale to [0, 1]; a constant column is returned
/// unchanged rather than dividing by zero
pub fn fn_normalize(args: &[Value]) -> FormulaResult<Value> {
    let values = column_arg(args, "normalize")?;
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !(hi - lo).is_normal() {
        return Ok(Value::Vector(values.to_vec()));
    }
    Ok(Value::Vector(
        values.iter().map(|v| (v - lo) / (hi - lo)).collect(),
    ))
}

/// standardize(v) - zero mean, unit variance; a zero-variance column is
/// returned unchanged
pub fn fn_standardize(args: &[Value]) -> FormulaResult<Value> {
    let values = column_arg(args, "standardize")?;
    let m = mean_of(values);
    let sd = var_of(values).sqrt();
    if !sd.is_normal() {
        return Ok(Value::Vector(values.to_vec()));
    }
    Ok(Value::Vector(values.iter().map(|v| (v - m) / sd).collect()))
}

/// scale(v, factor = 1)
pub fn fn_scale(args: &[Value]) -> FormulaResult<Value> {
    let values = column_arg(args, "scale")?;
    let factor = scalar_param(args, 1, 1.0, "scale")?;
    Ok(Value::Vector(values.iter().map(|v| v * factor).collect()))
}

/// log_transform(v) - ln of positive entries; non-positive entries map to 0
pub fn fn_log_transform(args: &[Value]) -> FormulaResult<Value> {
    let values = column_arg(args, "log_transform")?;
    Ok(Value::Vector(
        values
            .iter()
            .map(|&v| if v > 0.0 { v.ln() } else { 0.0 })
            .collect(),
    ))
}

/// power_transform(v, power = 2)
pub fn fn_power_transform(args: &[Value]) -> FormulaResult<Value> {
    let values = column_arg(args, "power_transform")?;
    let power = scalar_param(args, 1, 2.0, "power_transform")?;
    Ok(Value::Vector(values.iter().map(|v| v.powf(power)).collect()))
}
