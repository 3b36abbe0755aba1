//! Broadcast arithmetic between signals.

use super::broadcast::{apply_op, Operand};
use crate::core::error::KinesigError;
use crate::core::{Operation, Result};
use crate::signal::{Signal, SignalValue, ValueOverride};

/// Lower a signal value to a broadcast operand.
///
/// Entity values become one sub-array per component.
pub fn to_operand(signal: &Signal) -> Result<Operand> {
    match signal.value() {
        SignalValue::Scalar(v) => Ok(Operand::Scalar(*v)),
        SignalValue::Uint32Array(a) | SignalValue::Float32Array(a) => Ok(Operand::Array(a.clone())),
        SignalValue::Float32ArrayArray(arrays) => Ok(Operand::Nested(arrays.clone())),
        SignalValue::Segment(_)
        | SignalValue::VectorSequence(_)
        | SignalValue::PlaneSequence(_) => {
            Ok(Operand::Nested(signal.array().unwrap_or_default()))
        }
        SignalValue::None | SignalValue::String(_) => {
            Err(KinesigError::unsupported_operand(format!("{:?}", signal.signal_type())))
        }
    }
}

/// Rebuild a value shaped like `template` from a broadcast result.
fn from_operand(result: Operand, template: &Signal) -> Result<SignalValue> {
    let arrays = match result {
        Operand::Scalar(v) => return Ok(SignalValue::Scalar(v)),
        Operand::Array(a) => return Ok(SignalValue::from(a)),
        Operand::Nested(arrays) => arrays,
    };

    template.value().with_components(arrays)
}

/// Apply `operation` between two signals with broadcasting.
///
/// The result copies the metadata of the first operand holding an entity
/// value, else the first operand holding an array, else `a`. Entity values are
/// rebuilt when the component count is preserved, and the frame map is kept
/// when the length is.
///
/// # Errors
/// `UnsupportedOperand` if either signal has no numeric value.
pub fn apply_signal_op(a: &Signal, b: &Signal, operation: Operation) -> Result<Signal> {
    let left = to_operand(a)?;
    let right = to_operand(b)?;

    let template = [a, b]
        .into_iter()
        .find(|s| s.components().is_some())
        .or_else(|| [a, b].into_iter().find(|s| !matches!(s.value(), SignalValue::Scalar(_))))
        .unwrap_or(a);

    let value = from_operand(apply_op(&left, &right, operation), template)?;
    let mut result = template.clone_with(ValueOverride::Replace(value));

    if let Some(map) = template.frame_map() {
        if result.len() == Some(map.len()) {
            result.set_frame_map(Some(map.to_vec()));
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{SignalType, VectorSequence};

    fn markers() -> Signal {
        Signal::new(
            VectorSequence::new(vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]).unwrap(),
        )
        .with_name("RANK")
    }

    #[test]
    fn test_vector_minus_vector() {
        let result = apply_signal_op(&markers(), &markers(), Operation::Subtract).unwrap();
        assert_eq!(result.signal_type(), SignalType::VectorSequence);
        assert_eq!(result.component("z").unwrap().values(), &[0.0, 0.0]);
        assert_eq!(result.name.as_deref(), Some("RANK"));
    }

    #[test]
    fn test_scalar_times_vector_keeps_entity() {
        let scale = Signal::new(10.0);
        let result = apply_signal_op(&scale, &markers(), Operation::Multiply).unwrap();
        assert_eq!(result.signal_type(), SignalType::VectorSequence);
        assert_eq!(result.component("x").unwrap().values(), &[10.0, 20.0]);
    }

    #[test]
    fn test_series_plus_scalar() {
        let mut series = Signal::new(vec![1.0f32, 2.0, 3.0]);
        series.set_frame_map(Some(vec![4, 5, 6]));
        let result = apply_signal_op(&series, &Signal::new(1.0), Operation::Add).unwrap();
        assert_eq!(result.get_event_array_value().unwrap().values(), &[2.0, 3.0, 4.0]);
        assert_eq!(result.frame_map(), Some(&[4usize, 5, 6][..]));
    }

    #[test]
    fn test_scalar_result() {
        let result = apply_signal_op(&Signal::new(3.0), &Signal::new(4.0), Operation::Add).unwrap();
        assert_eq!(result.value(), &SignalValue::Scalar(7.0));
    }

    #[test]
    fn test_unsupported_operand() {
        let err = apply_signal_op(&Signal::new("text"), &Signal::new(1.0), Operation::Add);
        assert!(matches!(err, Err(KinesigError::UnsupportedOperand { .. })));
        assert!(apply_signal_op(&Signal::new(1.0), &Signal::default(), Operation::Add).is_err());
    }
}
