//! Windowed filters
//!
//! The window parameters are literal formula arguments (`moving_average(x,
//! 5)`), validated as positive integers before the filter runs. Boundary
//! handling follows the conventions of the filters these mirror: centered
//! moving averages fill their edges from the nearest computed value,
//! gaussian and median filters reflect at the boundary, rolling sums treat
//! the warm-up region as zero.

use super::{column_arg, scalar_param, window_param};
use crate::error::{FormulaError, FormulaResult};
use crate::value::Value;

/// Reflect an out-of-range index back into [0, n)
fn reflect(index: isize, n: usize) -> usize {
    debug_assert!(n > 0);
    let n = n as isize;
    let mut i = index;
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= n {
            i = 2 * n - i - 1;
        } else {
            return i as usize;
        }
    }
}

/// moving_average(v, window = 5) - centered moving mean; edges where the
/// full window does not fit take the nearest interior value
pub fn fn_moving_average(args: &[Value]) -> FormulaResult<Value> {
    let values = column_arg(args, "moving_average")?;
    let window = window_param(args, 1, 5, "moving_average")?;
    let n = values.len();

    if n == 0 {
        return Ok(Value::Vector(Vec::new()));
    }
    if window > n {
        // No full window fits anywhere
        return Ok(Value::Vector(vec![f64::NAN; n]));
    }

    let left = window / 2;
    let right = window - 1 - left;

    let mut out = vec![f64::NAN; n];
    for i in left..n - right {
        let slice = &values[i - left..=i + right];
        out[i] = slice.iter().sum::<f64>() / window as f64;
    }

    // Backfill then forward-fill the edges
    let first = out[left];
    let last = out[n - right - 1];
    for v in out.iter_mut().take(left) {
        *v = first;
    }
    for v in out.iter_mut().skip(n - right) {
        *v = last;
    }

    Ok(Value::Vector(out))
}

/// gaussian_filter(v, sigma = 1) - 1D gaussian smoothing with reflected
/// boundaries and a kernel truncated at 4 sigma
pub fn fn_gaussian_filter(args: &[Value]) -> FormulaResult<Value> {
    let values = column_arg(args, "gaussian_filter")?;
    let sigma = scalar_param(args, 1, 1.0, "gaussian_filter")?;
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(FormulaError::Evaluation(format!(
            "gaussian_filter expects sigma > 0, got {}",
            sigma
        )));
    }
    let n = values.len();
    if n == 0 {
        return Ok(Value::Vector(Vec::new()));
    }

    let radius = (4.0 * sigma + 0.5) as usize;
    let mut kernel = Vec::with_capacity(2 * radius + 1);
    for offset in -(radius as isize)..=(radius as isize) {
        let x = offset as f64;
        kernel.push((-x * x / (2.0 * sigma * sigma)).exp());
    }
    let norm: f64 = kernel.iter().sum();

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let mut acc = 0.0;
        for (k, weight) in kernel.iter().enumerate() {
            let idx = i as isize + k as isize - radius as isize;
            acc += weight * values[reflect(idx, n)];
        }
        out.push(acc / norm);
    }

    Ok(Value::Vector(out))
}

/// median_filter(v, size = 3) - windowed median with reflected boundaries
pub fn fn_median_filter(args: &[Value]) -> FormulaResult<Value> {
    let values = column_arg(args, "median_filter")?;
    let size = window_param(args, 1, 3, "median_filter")?;
    let n = values.len();
    if n == 0 {
        return Ok(Value::Vector(Vec::new()));
    }

    let left = size / 2;
    let mut out = Vec::with_capacity(n);
    let mut window = Vec::with_capacity(size);
    for i in 0..n {
        window.clear();
        for offset in 0..size {
            let idx = i as isize + offset as isize - left as isize;
            window.push(values[reflect(idx, n)]);
        }
        window.sort_by(|a, b| a.total_cmp(b));
        let mid = size / 2;
        let median = if size % 2 == 1 {
            window[mid]
        } else {
            (window[mid - 1] + window[mid]) / 2.0
        };
        out.push(median);
    }

    Ok(Value::Vector(out))
}

/// rolling_sum(v, window = 5) - trailing window sum; positions before the
/// first full window are zero
pub fn fn_rolling_sum(args: &[Value]) -> FormulaResult<Value> {
    let values = column_arg(args, "rolling_sum")?;
    let window = window_param(args, 1, 5, "rolling_sum")?;
    let n = values.len();

    let mut out = vec![0.0; n];
    for i in 0..n {
        if i + 1 >= window {
            out[i] = values[i + 1 - window..=i].iter().sum();
        }
    }

    Ok(Value::Vector(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_average_centered() {
        let out = fn_moving_average(&[
            Value::Vector(vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            Value::Scalar(3.0),
        ])
        .unwrap();
        // Interior: centered means; edges take the nearest interior value
        assert_eq!(out, Value::Vector(vec![2.0, 2.0, 3.0, 4.0, 4.0]));
    }

    #[test]
    fn test_moving_average_window_larger_than_data() {
        let out =
            fn_moving_average(&[Value::Vector(vec![1.0, 2.0]), Value::Scalar(5.0)]).unwrap();
        let v = out.as_vector().unwrap();
        assert!(v.iter().all(|x| x.is_nan()));
    }

    #[test]
    fn test_moving_average_rejects_bad_window() {
        assert!(fn_moving_average(&[Value::Vector(vec![1.0]), Value::Scalar(0.0)]).is_err());
        assert!(fn_moving_average(&[Value::Vector(vec![1.0]), Value::Scalar(2.5)]).is_err());
    }

    #[test]
    fn test_gaussian_filter_preserves_constant() {
        let out =
            fn_gaussian_filter(&[Value::Vector(vec![2.0; 8]), Value::Scalar(1.0)]).unwrap();
        for v in out.as_vector().unwrap() {
            assert!((v - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_median_filter_removes_spike() {
        let out = fn_median_filter(&[
            Value::Vector(vec![1.0, 1.0, 100.0, 1.0, 1.0]),
            Value::Scalar(3.0),
        ])
        .unwrap();
        assert_eq!(out, Value::Vector(vec![1.0, 1.0, 1.0, 1.0, 1.0]));
    }

    #[test]
    fn test_rolling_sum_warm_up_is_zero() {
        let out = fn_rolling_sum(&[
            Value::Vector(vec![1.0, 2.0, 3.0, 4.0]),
            Value::Scalar(2.0),
        ])
        .unwrap();
        assert_eq!(out, Value::Vector(vec![0.0, 3.0, 5.0, 7.0]));
    }

    #[test]
    fn test_reflect_indexing() {
        assert_eq!(reflect(-1, 4), 0);
        assert_eq!(reflect(-2, 4), 1);
        assert_eq!(reflect(4, 4), 3);
        assert_eq!(reflect(5, 4), 2);
    }
}
