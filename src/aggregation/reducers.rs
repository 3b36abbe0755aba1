//! Scalar reducers over flat series.
//!
//! NaN samples are skipped by the value reducers except `standard_deviation`,
//! which lets them propagate.

use serde::{Deserialize, Serialize};

/// Reduction applied by [`aggregate`](super::aggregate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reducer {
    Count,
    Max,
    Mean,
    Median,
    Min,
    Range,
    StandardDeviation,
    Sum,
    /// First index of the maximum.
    MaxIndex,
    /// First index of the minimum.
    MinIndex,
}

impl Reducer {
    /// Whether the reducer yields a position rather than a value.
    #[inline]
    pub fn is_index(self) -> bool {
        matches!(self, Reducer::MaxIndex | Reducer::MinIndex)
    }

    /// Apply the reducer.
    ///
    /// Index reducers return the first tied index, or NaN when there is none.
    pub fn reduce(self, values: &[f64]) -> f64 {
        match self {
            Reducer::Count => count(values) as f64,
            Reducer::Max => max(values),
            Reducer::Mean => mean(values),
            Reducer::Median => median(values),
            Reducer::Min => min(values),
            Reducer::Range => range(values),
            Reducer::StandardDeviation => standard_deviation(values),
            Reducer::Sum => sum(values),
            Reducer::MaxIndex => first_index(max_indices(values)),
            Reducer::MinIndex => first_index(min_indices(values)),
        }
    }
}

fn first_index(indices: Option<Vec<usize>>) -> f64 {
    indices.and_then(|i| i.first().copied()).map_or(f64::NAN, |i| i as f64)
}

fn valid(values: &[f64]) -> impl Iterator<Item = f64> + '_ {
    values.iter().copied().filter(|v| !v.is_nan())
}

/// Number of samples, NaN included.
#[inline]
pub fn count(values: &[f64]) -> usize {
    values.len()
}

/// Largest non-NaN value, NaN if there is none.
pub fn max(values: &[f64]) -> f64 {
    valid(values).fold(f64::NAN, f64::max)
}

/// Smallest non-NaN value, NaN if there is none.
pub fn min(values: &[f64]) -> f64 {
    valid(values).fold(f64::NAN, f64::min)
}

/// Sum of the non-NaN values; 0 for an empty series.
pub fn sum(values: &[f64]) -> f64 {
    valid(values).sum()
}

/// Arithmetic mean of the non-NaN values, NaN if there is none.
pub fn mean(values: &[f64]) -> f64 {
    let (total, n) = valid(values).fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        f64::NAN
    } else {
        total / n as f64
    }
}

/// Median of the non-NaN values.
///
/// An empty series has median 0. Even counts average the two middle values.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted: Vec<f64> = valid(values).collect();
    if sorted.is_empty() {
        return f64::NAN;
    }
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// `max - min`.
pub fn range(values: &[f64]) -> f64 {
    max(values) - min(values)
}

/// Sample standard deviation (divides by `n - 1`).
///
/// Returns 0 for fewer than two samples. A NaN sample makes the result NaN.
pub fn standard_deviation(values: &[f64]) -> f64 {
    let n = values.len();
    if n <= 1 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// Sample standard deviation over a series with missing entries.
///
/// Missing entries are ignored; a missing series yields 0.
pub fn standard_deviation_sparse(values: Option<&[Option<f64>]>) -> f64 {
    let present: Vec<f64> = values.unwrap_or_default().iter().flatten().copied().collect();
    standard_deviation(&present)
}

/// Every index tied for the maximum.
///
/// The first non-NaN value seeds the leader; an equal value adds its index, a
/// larger one restarts the list. `None` for an empty or all-NaN series.
pub fn max_indices(values: &[f64]) -> Option<Vec<usize>> {
    extreme_indices(values, |candidate, leader| candidate > leader)
}

/// Every index tied for the minimum. See [`max_indices`].
pub fn min_indices(values: &[f64]) -> Option<Vec<usize>> {
    extreme_indices(values, |candidate, leader| candidate < leader)
}

fn extreme_indices(values: &[f64], better: impl Fn(f64, f64) -> bool) -> Option<Vec<usize>> {
    let mut leader = f64::NAN;
    let mut indices = Vec::new();

    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        if indices.is_empty() || better(v, leader) {
            leader = v;
            indices.clear();
            indices.push(i);
        } else if v == leader {
            indices.push(i);
        }
    }

    if indices.is_empty() {
        None
    } else {
        Some(indices)
    }
}
