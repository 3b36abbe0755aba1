//! Padding a series with synthetic samples at both ends.

use serde::{Deserialize, Serialize};

use crate::core::error::KinesigError;
use crate::core::{NumericArray, Result};

/// How buffered samples are generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BufferMethod {
    /// Linear extrapolation from the two boundary samples on each side.
    #[default]
    Extrapolate,
    /// Repeat the boundary value.
    None,
}

/// Prepend and append `length` synthetic samples to `series`.
///
/// Returns `Ok(None)` for an empty series. `Extrapolate` needs at least two
/// samples to derive the boundary slopes.
///
/// # Arguments
/// * `series` - Input series
/// * `length` - Number of samples added on each side
/// * `method` - Sample generation method
///
/// # Returns
/// Series of length `series.len() + 2 * length`, same kind as the input
pub fn buffer(
    series: &NumericArray,
    length: usize,
    method: BufferMethod,
) -> Result<Option<NumericArray>> {
    let values = series.values();
    let n = values.len();
    if n == 0 {
        return Ok(None);
    }

    let (first_delta, last_delta) = match method {
        BufferMethod::Extrapolate => {
            if n < 2 {
                return Err(KinesigError::insufficient_data(2, n));
            }
            (values[1] - values[0], values[n - 1] - values[n - 2])
        }
        BufferMethod::None => (0.0, 0.0),
    };

    let first = values[0];
    let last = values[n - 1];

    let mut result = Vec::with_capacity(n + 2 * length);
    for k in (1..=length).rev() {
        result.push(first - k as f64 * first_delta);
    }
    result.extend_from_slice(values);
    for k in 1..=length {
        result.push(last + k as f64 * last_delta);
    }

    Ok(Some(series.of_same_kind(result)))
}
