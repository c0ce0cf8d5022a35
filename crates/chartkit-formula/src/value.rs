//! Value types during formula evaluation

use crate::error::{FormulaError, FormulaResult};

/// Value produced while evaluating a formula.
///
/// Arithmetic is vectorized: a column stays a `Vector` through the whole
/// computation and scalars broadcast over it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(f64),
    Vector(Vec<f64>),
    Str(String),
}

impl Value {
    /// The scalar payload, if this is a scalar
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(n) => Some(*n),
            _ => None,
        }
    }

    /// The vector payload, if this is a vector
    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            Value::Vector(v) => Some(v),
            _ => None,
        }
    }

    /// View the numeric payload as a slice: a scalar acts as a
    /// single-element column.
    pub fn numeric_slice(&self) -> FormulaResult<NumericSlice<'_>> {
        match self {
            Value::Scalar(n) => Ok(NumericSlice::Scalar(*n)),
            Value::Vector(v) => Ok(NumericSlice::Slice(v)),
            Value::Str(_) => Err(FormulaError::Evaluation(
                "expected a numeric value, got a string".into(),
            )),
        }
    }

    /// Force a scalar, erroring otherwise (used for literal parameters
    /// such as window sizes).
    pub fn to_scalar(&self, context: &str) -> FormulaResult<f64> {
        self.as_scalar().ok_or_else(|| {
            FormulaError::Evaluation(format!("{} expects a scalar argument", context))
        })
    }

    /// Number of rows this value spans (1 for scalars and strings)
    pub fn len(&self) -> usize {
        match self {
            Value::Vector(v) => v.len(),
            _ => 1,
        }
    }

    /// Whether the value spans zero rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Borrowed numeric view over a [`Value`]
pub enum NumericSlice<'a> {
    Scalar(f64),
    Slice(&'a [f64]),
}

impl NumericSlice<'_> {
    /// Materialize as an owned vector (scalars become one element)
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            NumericSlice::Scalar(n) => vec![*n],
            NumericSlice::Slice(s) => s.to_vec(),
        }
    }

    /// Borrow as a slice; scalars yield a one-element view
    pub fn values(&self) -> &[f64] {
        match self {
            NumericSlice::Scalar(n) => std::slice::from_ref(n),
            NumericSlice::Slice(s) => s,
        }
    }
}
