//! Splitting a series at NaN runs and merging the pieces back.

use crate::core::{NumericArray, NumericKind};

/// A contiguous run of non-NaN samples and its position in the source series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSegment {
    /// Index of the first sample in the source series.
    pub offset: usize,
    /// Samples of the run.
    pub values: NumericArray,
}

/// Split `series` into its non-NaN runs.
///
/// A series that ends in NaN (including an all-NaN or empty series) gets a
/// trailing empty segment whose offset is the series length, so the source
/// length can always be recovered by [`merge`].
pub fn split_on_nan(series: &NumericArray) -> Vec<SeriesSegment> {
    let values = series.values();
    let n = values.len();
    let mut segments = Vec::new();

    let mut i = 0;
    while i < n {
        if values[i].is_nan() {
            i += 1;
            continue;
        }
        let start = i;
        while i < n && !values[i].is_nan() {
            i += 1;
        }
        segments.push(SeriesSegment {
            offset: start,
            values: series.of_same_kind(values[start..i].to_vec()),
        });
    }

    let ends_in_nan = values.last().map_or(true, |v| v.is_nan());
    if ends_in_nan {
        segments.push(SeriesSegment {
            offset: n,
            values: series.of_same_kind(Vec::new()),
        });
    }

    segments
}

/// Rebuild a series from segments produced by [`split_on_nan`].
///
/// Positions not covered by any segment hold the kind's default value (NaN
/// for float kinds). An empty segment list yields an empty `Float32` series.
pub fn merge(segments: &[SeriesSegment]) -> NumericArray {
    let kind = segments.first().map_or(NumericKind::Float32, |s| s.values.kind());
    let length = segments.iter().map(|s| s.offset + s.values.len()).max().unwrap_or(0);

    let mut values = vec![kind.default_value(); length];
    for segment in segments {
        for (i, v) in segment.values.iter().enumerate() {
            values[segment.offset + i] = v;
        }
    }

    NumericArray::new(kind, values)
}
