//! Error types for kinesig.

use thiserror::Error;

/// Result type alias for kinesig operations.
pub type Result<T> = std::result::Result<T, KinesigError>;

/// Input-shape failures raised by signal operations.
///
/// Degenerate inputs (empty series, unsupported value kinds) are not errors;
/// they are reported through `Option` returns by the individual functions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KinesigError {
    /// Quaternion with the wrong number of components.
    #[error("Quaternion must have exactly 4 components, got {actual}")]
    InvalidQuaternion { actual: usize },

    /// Entity built from too few component arrays.
    #[error("{entity} needs at least {required} component arrays, got {available}")]
    InsufficientComponents {
        entity: &'static str,
        required: usize,
        available: usize,
    },

    /// Data length mismatch between arrays.
    #[error("Data length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Insufficient data for calculation.
    #[error("Insufficient data: need at least {required} elements, got {available}")]
    InsufficientData { required: usize, available: usize },

    /// Invalid parameter value.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// Arithmetic attempted on a value that has no numeric content.
    #[error("Unsupported operand: {kind}")]
    UnsupportedOperand { kind: String },

    /// Failure reported by the space converter.
    #[error("Space conversion from {from} to {to} failed: {message}")]
    Conversion {
        from: String,
        to: String,
        message: String,
    },
}

impl KinesigError {
    /// Create a length mismatch error.
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create an insufficient data error.
    pub fn insufficient_data(required: usize, available: usize) -> Self {
        Self::InsufficientData {
            required,
            available,
        }
    }

    /// Create an insufficient components error.
    pub fn insufficient_components(
        entity: &'static str,
        required: usize,
        available: usize,
    ) -> Self {
        Self::InsufficientComponents {
            entity,
            required,
            available,
        }
    }

    /// Create an unsupported operand error.
    pub fn unsupported_operand(kind: impl Into<String>) -> Self {
        Self::UnsupportedOperand { kind: kind.into() }
    }

    /// Create a conversion error.
    pub fn conversion(
        from: impl Into<String>,
        to: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Conversion {
            from: from.into(),
            to: to.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = KinesigError::InvalidQuaternion { actual: 3 };
        assert_eq!(err.to_string(), "Quaternion must have exactly 4 components, got 3");

        let err = KinesigError::insufficient_components("VectorSequence", 3, 2);
        assert_eq!(err.to_string(), "VectorSequence needs at least 3 component arrays, got 2");

        let err = KinesigError::insufficient_data(2, 1);
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn test_helper_constructors() {
        assert_eq!(
            KinesigError::length_mismatch(4, 3),
            KinesigError::LengthMismatch {
                expected: 4,
                actual: 3,
            }
        );
        assert_eq!(
            KinesigError::unsupported_operand("String").to_string(),
            "Unsupported operand: String"
        );
        assert_eq!(
            KinesigError::conversion("world", "pelvis", "missing segment").to_string(),
            "Space conversion from world to pelvis failed: missing segment"
        );
        assert!(KinesigError::invalid_parameter("t is NaN").to_string().ends_with("t is NaN"));
    }
}
