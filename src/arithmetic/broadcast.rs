//! Recursive broadcasting of binary operations.
//!
//! Operands are scalars, flat arrays, or arrays of flat arrays. Length-1
//! arrays behave as scalars. Pairwise operations over arrays of different
//! lengths run to the longer length and produce NaN where the shorter side has
//! no element.

use rayon::prelude::*;

use crate::core::{NumericArray, NumericKind, Operation};

/// Operand of a broadcast operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Scalar(f64),
    Array(NumericArray),
    Nested(Vec<NumericArray>),
}

impl Operand {
    /// Single value of a scalar or length-1 array.
    fn as_scalar(&self) -> Option<f64> {
        match self {
            Operand::Scalar(v) => Some(*v),
            Operand::Array(a) if a.len() == 1 => a.get(0),
            _ => None,
        }
    }

    /// Flat array with more than one element.
    fn as_multi(&self) -> Option<&NumericArray> {
        match self {
            Operand::Array(a) if a.len() != 1 => Some(a),
            _ => None,
        }
    }

    /// Result as a flat array of `kind`.
    fn into_array(self, kind: NumericKind) -> NumericArray {
        match self {
            Operand::Scalar(v) => NumericArray::new(kind, vec![v]),
            Operand::Array(a) => a,
            Operand::Nested(arrays) => {
                NumericArray::new(kind, arrays.into_iter().flat_map(|a| a.into_values()).collect())
            }
        }
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl From<NumericArray> for Operand {
    fn from(array: NumericArray) -> Self {
        Operand::Array(array)
    }
}

impl From<Vec<NumericArray>> for Operand {
    fn from(arrays: Vec<NumericArray>) -> Self {
        Operand::Nested(arrays)
    }
}

/// Apply `operation` to `a` and `b` with broadcasting.
///
/// Flat array results take the kind of the first operand found to be a
/// multi-element array, checking `a` before `b`, with integer kinds widened to
/// floats. Nested operands are processed sub-array by sub-array.
pub fn apply_op(a: &Operand, b: &Operand, operation: Operation) -> Operand {
    match (a, b) {
        (Operand::Nested(xs), Operand::Nested(ys)) => {
            let n = xs.len().max(ys.len());
            Operand::Nested(
                (0..n)
                    .into_par_iter()
                    .map(|i| match (xs.get(i), ys.get(i)) {
                        (Some(x), Some(y)) => apply_flat(
                            &Operand::Array(x.clone()),
                            &Operand::Array(y.clone()),
                            operation,
                        )
                        .into_array(x.kind().promoted()),
                        (Some(only), None) | (None, Some(only)) => {
                            NumericArray::new(only.kind().promoted(), vec![f64::NAN; only.len()])
                        }
                        (None, None) => NumericArray::float64(Vec::new()),
                    })
                    .collect(),
            )
        }
        (Operand::Nested(xs), other) => Operand::Nested(
            xs.par_iter()
                .map(|x| {
                    apply_flat(&Operand::Array(x.clone()), other, operation)
                        .into_array(x.kind().promoted())
                })
                .collect(),
        ),
        (other, Operand::Nested(ys)) => Operand::Nested(
            ys.par_iter()
                .map(|y| {
                    let kind = other.as_multi().map_or(y.kind(), |a| a.kind()).promoted();
                    apply_flat(other, &Operand::Array(y.clone()), operation).into_array(kind)
                })
                .collect(),
        ),
        _ => apply_flat(a, b, operation),
    }
}

/// Broadcast between scalars and flat arrays.
fn apply_flat(a: &Operand, b: &Operand, operation: Operation) -> Operand {
    if let (Some(x), Some(y)) = (a.as_scalar(), b.as_scalar()) {
        return Operand::Scalar(operation.apply(x, y));
    }

    let kind = a.as_multi().or_else(|| b.as_multi()).map_or(NumericKind::Float64, |p| p.kind());
    let kind = kind.promoted();

    let values: Vec<f64> = match (a.as_multi(), b.as_multi()) {
        (Some(xs), Some(ys)) => {
            let n = xs.len().max(ys.len());
            (0..n)
                .map(|i| match (xs.get(i), ys.get(i)) {
                    (Some(x), Some(y)) => operation.apply(x, y),
                    _ => f64::NAN,
                })
                .collect()
        }
        (Some(xs), None) => {
            let y = b.as_scalar().unwrap_or(f64::NAN);
            xs.iter().map(|x| operation.apply(x, y)).collect()
        }
        (None, Some(ys)) => {
            let x = a.as_scalar().unwrap_or(f64::NAN);
            ys.iter().map(|y| operation.apply(x, y)).collect()
        }
        (None, None) => Vec::new(),
    };

    Operand::Array(NumericArray::new(kind, values))
}
