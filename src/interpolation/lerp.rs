//! Linear resampling.

use crate::core::NumericArray;

/// Source position and blend factor for output sample `i` when resampling
/// `source_len` samples to `new_len`.
///
/// Returns `(lower, upper, t)` with `upper = min(lower + 1, source_len - 1)`.
#[inline]
pub(crate) fn resample_position(
    i: usize,
    source_len: usize,
    new_len: usize,
) -> (usize, usize, f64) {
    if new_len < 2 || source_len < 2 {
        return (0, 0, 0.0);
    }
    if i + 1 == new_len {
        return (source_len - 1, source_len - 1, 0.0);
    }
    let step = (source_len - 1) as f64 / (new_len - 1) as f64;
    let pos = i as f64 * step;
    let lower = (pos.floor() as usize).min(source_len - 1);
    let upper = (lower + 1).min(source_len - 1);
    (lower, upper, pos - lower as f64)
}

/// Resample `values` to `new_length` samples by uniform-step linear
/// interpolation.
///
/// Output samples that blend a NaN neighbour are NaN. An empty input yields
/// `new_length` NaN samples.
pub fn lerp_array(values: &NumericArray, new_length: usize) -> NumericArray {
    let source = values.values();
    let n = source.len();

    if n == 0 {
        return values.of_same_kind(vec![f64::NAN; new_length]);
    }

    let result = (0..new_length)
        .map(|i| {
            let (lower, upper, t) = resample_position(i, n, new_length);
            let a = source[lower];
            let b = source[upper];
            if t == 0.0 {
                a
            } else {
                a + (b - a) * t
            }
        })
        .collect();

    values.of_same_kind(result)
}
