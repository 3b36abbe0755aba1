//! The value held by a signal.

use serde::{Deserialize, Serialize};

use super::entity::{ComponentSequence, PlaneSequence, Segment, VectorSequence};
use crate::core::{NumericArray, NumericKind, Result, ResultType};

/// Kind tag of a [`SignalValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalType {
    None,
    Scalar,
    Uint32Array,
    Float32Array,
    Float32ArrayArray,
    Segment,
    String,
    VectorSequence,
    PlaneSequence,
}

impl SignalType {
    /// Result type assumed when none is set explicitly.
    pub fn default_result_type(self) -> Option<ResultType> {
        match self {
            SignalType::None => None,
            SignalType::Scalar | SignalType::Uint32Array | SignalType::String => {
                Some(ResultType::Scalar)
            }
            SignalType::Float32Array
            | SignalType::Float32ArrayArray
            | SignalType::Segment
            | SignalType::VectorSequence
            | SignalType::PlaneSequence => Some(ResultType::Series),
        }
    }

    /// Kinds whose numeric content can be read as event frames.
    pub fn is_event_compatible(self) -> bool {
        matches!(self, SignalType::Scalar | SignalType::Uint32Array | SignalType::Float32Array)
    }
}

/// Exactly one live payload of a signal.
///
/// Build values through the `From` impls: they classify the input and coerce
/// float series to single precision and index arrays to `Uint32`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SignalValue {
    #[default]
    None,
    Scalar(f64),
    Uint32Array(NumericArray),
    Float32Array(NumericArray),
    Float32ArrayArray(Vec<NumericArray>),
    Segment(Segment),
    String(String),
    VectorSequence(VectorSequence),
    PlaneSequence(PlaneSequence),
}

impl SignalValue {
    /// Kind tag.
    pub fn signal_type(&self) -> SignalType {
        match self {
            SignalValue::None => SignalType::None,
            SignalValue::Scalar(_) => SignalType::Scalar,
            SignalValue::Uint32Array(_) => SignalType::Uint32Array,
            SignalValue::Float32Array(_) => SignalType::Float32Array,
            SignalValue::Float32ArrayArray(_) => SignalType::Float32ArrayArray,
            SignalValue::Segment(_) => SignalType::Segment,
            SignalValue::String(_) => SignalType::String,
            SignalValue::VectorSequence(_) => SignalType::VectorSequence,
            SignalValue::PlaneSequence(_) => SignalType::PlaneSequence,
        }
    }

    /// Frame rate carried by the value itself.
    pub fn frame_rate(&self) -> Option<f64> {
        match self {
            SignalValue::Segment(s) => s.frame_rate(),
            SignalValue::VectorSequence(v) => v.frame_rate(),
            SignalValue::PlaneSequence(p) => p.frame_rate(),
            _ => None,
        }
    }

    /// Check if no value is set.
    pub fn is_none(&self) -> bool {
        matches!(self, SignalValue::None)
    }

    /// Value of the same entity kind as `self` built from component arrays.
    ///
    /// Falls back to a multi-component series when `self` is not an entity or
    /// the array count does not match its components.
    pub fn with_components(&self, arrays: Vec<NumericArray>) -> Result<SignalValue> {
        let rate = self.frame_rate();
        let value = match self {
            SignalValue::VectorSequence(_) if arrays.len() == VectorSequence::COMPONENTS.len() => {
                VectorSequence::from_arrays(arrays, rate)?.into()
            }
            SignalValue::Segment(_) if arrays.len() == Segment::COMPONENTS.len() => {
                Segment::from_arrays(arrays, rate)?.into()
            }
            SignalValue::PlaneSequence(_) if arrays.len() == PlaneSequence::COMPONENTS.len() => {
                PlaneSequence::from_arrays(arrays, rate)?.into()
            }
            _ => SignalValue::from(arrays),
        };
        Ok(value)
    }

    /// Build a float series value, coercing to single precision.
    fn float_series(array: NumericArray) -> Self {
        if array.kind() == NumericKind::Float32 {
            SignalValue::Float32Array(array)
        } else {
            SignalValue::Float32Array(NumericArray::float32(array.into_values()))
        }
    }
}

impl From<f64> for SignalValue {
    fn from(value: f64) -> Self {
        SignalValue::Scalar(value)
    }
}

impl From<NumericArray> for SignalValue {
    fn from(array: NumericArray) -> Self {
        match array.kind() {
            NumericKind::Uint32 => SignalValue::Uint32Array(array),
            _ => SignalValue::float_series(array),
        }
    }
}

impl From<Vec<u32>> for SignalValue {
    fn from(values: Vec<u32>) -> Self {
        SignalValue::Uint32Array(values.into())
    }
}

impl From<Vec<f32>> for SignalValue {
    fn from(values: Vec<f32>) -> Self {
        SignalValue::Float32Array(values.into())
    }
}

impl From<Vec<f64>> for SignalValue {
    fn from(values: Vec<f64>) -> Self {
        SignalValue::Float32Array(NumericArray::float32(values))
    }
}

impl From<Vec<NumericArray>> for SignalValue {
    fn from(arrays: Vec<NumericArray>) -> Self {
        SignalValue::Float32ArrayArray(
            arrays
                .into_iter()
                .map(|a| match a.kind() {
                    NumericKind::Float32 => a,
                    _ => NumericArray::float32(a.into_values()),
                })
                .collect(),
        )
    }
}

impl From<Vec<Vec<f32>>> for SignalValue {
    fn from(arrays: Vec<Vec<f32>>) -> Self {
        SignalValue::Float32ArrayArray(arrays.into_iter().map(NumericArray::from).collect())
    }
}

impl From<Segment> for SignalValue {
    fn from(value: Segment) -> Self {
        SignalValue::Segment(value)
    }
}

impl From<VectorSequence> for SignalValue {
    fn from(value: VectorSequence) -> Self {
        SignalValue::VectorSequence(value)
    }
}

impl From<PlaneSequence> for SignalValue {
    fn from(value: PlaneSequence) -> Self {
        SignalValue::PlaneSequence(value)
    }
}

impl From<String> for SignalValue {
    fn from(value: String) -> Self {
        SignalValue::String(value)
    }
}

impl From<&str> for SignalValue {
    fn from(value: &str) -> Self {
        SignalValue::String(value.to_string())
    }
}

impl<T: Into<SignalValue>> From<Option<T>> for SignalValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SignalValue::None, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(SignalValue::from(2.0).signal_type(), SignalType::Scalar);
        assert_eq!(SignalValue::from(vec![1u32, 2]).signal_type(), SignalType::Uint32Array);
        assert_eq!(SignalValue::from(vec![1.0f32]).signal_type(), SignalType::Float32Array);
        assert_eq!(SignalValue::from("LHS").signal_type(), SignalType::String);
        assert_eq!(
            SignalValue::from(vec![vec![1.0f32], vec![2.0f32]]).signal_type(),
            SignalType::Float32ArrayArray
        );
        assert_eq!(SignalValue::from(None::<f64>).signal_type(), SignalType::None);
    }

    #[test]
    fn test_plain_numbers_coerced_to_float32() {
        let value = SignalValue::from(vec![0.1f64, 0.2]);
        match value {
            SignalValue::Float32Array(a) => {
                assert_eq!(a.kind(), NumericKind::Float32);
                assert_eq!(a.values()[0], 0.1f32 as f64);
            }
            other => panic!("unexpected value {:?}", other),
        }

        let value = SignalValue::from(NumericArray::float64(vec![1.5]));
        assert_eq!(value.signal_type(), SignalType::Float32Array);
        let value = SignalValue::from(NumericArray::uint32(vec![3.0]));
        assert_eq!(value.signal_type(), SignalType::Uint32Array);
    }

    #[test]
    fn test_default_result_types() {
        assert_eq!(SignalType::Scalar.default_result_type(), Some(ResultType::Scalar));
        assert_eq!(SignalType::Uint32Array.default_result_type(), Some(ResultType::Scalar));
        assert_eq!(SignalType::Float32Array.default_result_type(), Some(ResultType::Series));
        assert_eq!(SignalType::VectorSequence.default_result_type(), Some(ResultType::Series));
        assert_eq!(SignalType::None.default_result_type(), None);
    }

    #[test]
    fn test_value_frame_rate() {
        let v = VectorSequence {
            frame_rate: Some(150.0),
            ..Default::default()
        };
        assert_eq!(SignalValue::from(v).frame_rate(), Some(150.0));
        assert_eq!(SignalValue::from(1.0).frame_rate(), None);
    }
}
