//! NaN filtering and replacement.

use crate::core::NumericArray;

/// Drop NaN entries, or replace them when a replacement value is given.
///
/// The result keeps the element kind of `series`.
pub fn filter_nan(series: &NumericArray, replacement: Option<f64>) -> NumericArray {
    let values = match replacement {
        Some(r) => series.iter().map(|v| if v.is_nan() { r } else { v }).collect(),
        None => series.iter().filter(|v| !v.is_nan()).collect(),
    };
    series.of_same_kind(values)
}

/// NaN filtering over a series with missing (`None`) entries.
///
/// Missing entries are not NaN and are always kept as they are.
pub fn filter_nan_sparse(series: &[Option<f64>], replacement: Option<f64>) -> Vec<Option<f64>> {
    match replacement {
        Some(r) => series
            .iter()
            .map(|v| match v {
                Some(x) if x.is_nan() => Some(r),
                other => *other,
            })
            .collect(),
        None => series.iter().copied().filter(|v| !matches!(v, Some(x) if x.is_nan())).collect(),
    }
}
