//! Numeric arrays tagged with their element storage type.
//!
//! Values are held as `f64` and every construction runs them through the
//! storage semantics of the array's [`NumericKind`], so a `Uint32` array never
//! holds a fraction and a `Float32` array never holds more precision than a
//! single-precision float can represent.

use serde::{Deserialize, Serialize};

/// Element storage type of a numeric array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericKind {
    /// Single-precision floats.
    Float32,
    /// Double-precision floats.
    Float64,
    /// Unsigned 32-bit integers (frame indices).
    Uint32,
    /// Plain list of numbers with no storage conversion.
    Plain,
}

impl NumericKind {
    /// Convert a value into the representation stored by this kind.
    #[inline]
    pub fn coerce(self, value: f64) -> f64 {
        match self {
            NumericKind::Float32 => value as f32 as f64,
            NumericKind::Float64 | NumericKind::Plain => value,
            NumericKind::Uint32 => {
                if !value.is_finite() {
                    return 0.0;
                }
                value.trunc().rem_euclid(4_294_967_296.0)
            }
        }
    }

    /// Kind used for arithmetic results: integer storage is widened to floats.
    #[inline]
    pub fn promoted(self) -> Self {
        match self {
            NumericKind::Uint32 => NumericKind::Float64,
            other => other,
        }
    }

    /// Whether the kind can hold fractional values and NaN.
    #[inline]
    pub fn is_float(self) -> bool {
        !matches!(self, NumericKind::Uint32)
    }

    /// Value used for positions that were never written.
    #[inline]
    pub fn default_value(self) -> f64 {
        if self.is_float() {
            f64::NAN
        } else {
            0.0
        }
    }
}

/// A flat numeric array with an explicit element kind.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericArray {
    kind: NumericKind,
    values: Vec<f64>,
}

impl NumericArray {
    /// Create an array of the given kind, coercing every value.
    pub fn new(kind: NumericKind, values: Vec<f64>) -> Self {
        let values = match kind {
            NumericKind::Float64 | NumericKind::Plain => values,
            _ => values.into_iter().map(|v| kind.coerce(v)).collect(),
        };
        Self { kind, values }
    }

    /// Create a single-precision float array.
    pub fn float32(values: Vec<f64>) -> Self {
        Self::new(NumericKind::Float32, values)
    }

    /// Create a double-precision float array.
    pub fn float64(values: Vec<f64>) -> Self {
        Self::new(NumericKind::Float64, values)
    }

    /// Create an unsigned integer array.
    pub fn uint32(values: Vec<f64>) -> Self {
        Self::new(NumericKind::Uint32, values)
    }

    /// Create a plain list of numbers.
    pub fn plain(values: Vec<f64>) -> Self {
        Self::new(NumericKind::Plain, values)
    }

    /// Build a new array of the same kind as `self` from `values`.
    pub fn of_same_kind(&self, values: Vec<f64>) -> Self {
        Self::new(self.kind, values)
    }

    /// Element kind.
    #[inline]
    pub fn kind(&self) -> NumericKind {
        self.kind
    }

    /// Get the length.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get value at index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get slice of values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consume the array and return its values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Iterator over values.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Keep only the values at the given indices, in the order given.
    /// Indices outside the array are skipped.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            kind: self.kind,
            values: indices.iter().filter_map(|&i| self.values.get(i).copied()).collect(),
        }
    }

    /// Element-wise equality that treats NaN as equal to NaN.
    pub fn nan_eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|(a, b)| a == b || (a.is_nan() && b.is_nan()))
    }

    /// Values as single-precision floats.
    pub fn to_f32_vec(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }
}

impl From<Vec<f32>> for NumericArray {
    fn from(values: Vec<f32>) -> Self {
        Self {
            kind: NumericKind::Float32,
            values: values.into_iter().map(f64::from).collect(),
        }
    }
}

impl From<Vec<f64>> for NumericArray {
    fn from(values: Vec<f64>) -> Self {
        Self {
            kind: NumericKind::Float64,
            values,
        }
    }
}

impl From<Vec<u32>> for NumericArray {
    fn from(values: Vec<u32>) -> Self {
        Self {
            kind: NumericKind::Uint32,
            values: values.into_iter().map(f64::from).collect(),
        }
    }
}

impl AsRef<[f64]> for NumericArray {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Build `values` as an array of the same kind as `prototype`.
pub fn create_numeric_array_of_same_type(
    prototype: &NumericArray,
    values: Vec<f64>,
) -> NumericArray {
    prototype.of_same_kind(values)
}
