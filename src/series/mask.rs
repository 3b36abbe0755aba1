//! Frame-span masking.

use tracing::debug;

use crate::core::{FrameSpan, NumericArray};

/// Result of masking a series.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskResult {
    /// Masked series.
    pub series: NumericArray,
    /// Spans describing the kept ranges within `series`.
    pub spans: Vec<FrameSpan>,
}

/// Keep only the frames covered by `spans`.
///
/// Without a replacement value the in-span ranges are concatenated and the
/// returned spans index into the compacted output. With a replacement value
/// the series keeps its length, out-of-span positions are overwritten, and the
/// spans are returned unchanged.
///
/// Spans are inclusive and clamped to the series length.
pub fn mask(series: &NumericArray, spans: &[FrameSpan], replacement: Option<f64>) -> MaskResult {
    let values = series.values();

    match replacement {
        Some(fill) => {
            let mut keep = vec![false; values.len()];
            for span in spans {
                if let Some((start, end)) = span.clamp_to(values.len()) {
                    keep[start..=end].iter_mut().for_each(|k| *k = true);
                }
            }
            let masked =
                values.iter().zip(keep.iter()).map(|(&v, &k)| if k { v } else { fill }).collect();
            MaskResult {
                series: series.of_same_kind(masked),
                spans: spans.to_vec(),
            }
        }
        None => {
            let mut compacted = Vec::new();
            let mut new_spans = Vec::with_capacity(spans.len());
            for span in spans {
                let Some((start, end)) = span.clamp_to(values.len()) else {
                    debug!(start = span.start, end = span.end, "mask span outside series, skipped");
                    continue;
                };
                let offset = compacted.len() as i64;
                compacted.extend_from_slice(&values[start..=end]);
                new_spans.push(FrameSpan::new(offset, offset + (end - start) as i64));
            }
            MaskResult {
                series: series.of_same_kind(compacted),
                spans: new_spans,
            }
        }
    }
}
