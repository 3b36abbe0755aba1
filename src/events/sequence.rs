//! Pairing of start and end events into frame spans.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::FrameSpan;
use crate::signal::Signal;

/// Filters applied to candidate spans.
///
/// A span is rejected when any `exclude` value lies strictly inside it, or
/// when some `include` list has no value strictly inside it. Exclusion is
/// checked first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSequenceOptions {
    #[serde(default)]
    pub exclude: Vec<Vec<f64>>,
    #[serde(default)]
    pub include: Vec<Vec<f64>>,
}

impl EventSequenceOptions {
    pub fn with_exclude(mut self, frames: Vec<f64>) -> Self {
        self.exclude.push(frames);
        self
    }

    pub fn with_include(mut self, frames: Vec<f64>) -> Self {
        self.include.push(frames);
        self
    }

    fn accepts(&self, start: f64, end: f64) -> bool {
        let inside = |v: &f64| *v > start && *v < end;
        if self.exclude.iter().flatten().any(inside) {
            return false;
        }
        self.include.iter().all(|list| list.iter().any(inside))
    }
}

fn sorted(frames: &[f64]) -> Vec<f64> {
    let mut frames: Vec<f64> = frames.iter().copied().filter(|f| !f.is_nan()).collect();
    frames.sort_by(f64::total_cmp);
    frames
}

/// Pair each start event with the first end event after it.
///
/// Scans both lists in ascending order. Once a span is emitted, its end
/// becomes the lower bound for the next start, so spans never overlap. A
/// start whose span fails `options` is skipped and the lower bound stays
/// where it was.
///
/// # Example
/// `[2, 3, 7, 10, 16]` and `[4, 8, 9, 12]` give `2..4`, `7..8` and `10..12`.
pub fn event_sequence(from: &[f64], to: &[f64], options: &EventSequenceOptions) -> Vec<FrameSpan> {
    let from = sorted(from);
    let to = sorted(to);

    let mut spans = Vec::new();
    let mut lower = f64::NEG_INFINITY;
    let mut j = 0;

    for &start in &from {
        if start < lower {
            continue;
        }
        while j < to.len() && to[j] <= start {
            j += 1;
        }
        let Some(&end) = to.get(j) else {
            break;
        };
        if !options.accepts(start, end) {
            debug!(start, end, "event span rejected by filters");
            continue;
        }
        spans.push(FrameSpan::new(start.round() as i64, end.round() as i64));
        lower = end;
    }

    spans
}

/// [`event_sequence`] over the event frames of two signals.
///
/// Returns `None` unless both signals hold scalar or array values.
pub fn event_sequence_signal(
    from: &Signal,
    to: &Signal,
    options: &EventSequenceOptions,
) -> Option<Vec<FrameSpan>> {
    let from = from.get_event_array_value()?;
    let to = to.get_event_array_value()?;
    Some(event_sequence(from.values(), to.values(), options))
}
