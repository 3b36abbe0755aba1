//! Selection of events that occur in a fixed order relative to other events.

use crate::core::NumericArray;
use crate::signal::{Signal, ValueOverride};

/// One event in the merged timeline.
#[derive(Debug, Clone, Copy)]
struct Event {
    value: f64,
    stream: usize,
    index: usize,
}

/// Pick the events of stream `pick` that take part in the ordered pattern
/// `sequence`.
///
/// The streams named by `sequence` and `exclude` are merged into one ascending
/// timeline (ties keep stream order). A window of `sequence.len()` events
/// matches when its i-th event comes from stream `sequence[i]`; events of an
/// excluded stream therefore break any window they fall into. Events of `pick`
/// inside matching windows are returned in encounter order, each at most once.
///
/// After a match the scan moves one event forward when `cyclic` is set, and
/// past the whole window otherwise. Nothing is picked if `pick` does not
/// appear in `sequence`.
pub fn pick_from_sequence(
    streams: &[NumericArray],
    pick: usize,
    sequence: &[usize],
    exclude: &[usize],
    cyclic: bool,
) -> NumericArray {
    let Some(picked) = streams.get(pick) else {
        return NumericArray::float64(Vec::new());
    };
    if sequence.is_empty() || !sequence.contains(&pick) {
        return picked.of_same_kind(Vec::new());
    }

    let mut merged_streams: Vec<usize> = Vec::new();
    for &s in sequence.iter().chain(exclude) {
        if s < streams.len() && !merged_streams.contains(&s) {
            merged_streams.push(s);
        }
    }

    let mut timeline: Vec<Event> = merged_streams
        .iter()
        .flat_map(|&stream| {
            streams[stream]
                .iter()
                .enumerate()
                .filter(|(_, v)| !v.is_nan())
                .map(move |(index, value)| Event {
                    value,
                    stream,
                    index,
                })
        })
        .collect();
    timeline.sort_by(|a, b| a.value.total_cmp(&b.value));

    let width = sequence.len();
    let mut seen = vec![false; picked.len()];
    let mut order: Vec<usize> = Vec::new();
    let mut position = 0;

    while position + width <= timeline.len() {
        let window = &timeline[position..position + width];
        let matched = window.iter().zip(sequence).all(|(event, &stream)| event.stream == stream);
        if !matched {
            position += 1;
            continue;
        }

        for event in window.iter().filter(|e| e.stream == pick) {
            if !seen[event.index] {
                seen[event.index] = true;
                order.push(event.index);
            }
        }
        position += if cyclic { 1 } else { width };
    }

    picked.select(&order)
}

fn stream_index<'a>(distinct: &mut Vec<&'a Signal>, signal: &'a Signal) -> usize {
    match distinct.iter().position(|s| std::ptr::eq(*s, signal)) {
        Some(index) => index,
        None => {
            distinct.push(signal);
            distinct.len() - 1
        }
    }
}

/// [`pick_from_sequence`] over the event frames of signals.
///
/// Signals are told apart by identity: a signal listed more than once maps to
/// a single stream, and `pick` must be one of the `sequence` references.
/// Returns `None` if any signal holds no event frames; the result otherwise
/// copies `pick`'s metadata.
pub fn pick_from_sequence_signals(
    pick: &Signal,
    sequence: &[&Signal],
    exclude: &[&Signal],
    cyclic: bool,
) -> Option<Signal> {
    let mut distinct: Vec<&Signal> = Vec::with_capacity(sequence.len() + exclude.len());
    let order: Vec<usize> = sequence.iter().map(|s| stream_index(&mut distinct, *s)).collect();
    let excluded: Vec<usize> = exclude.iter().map(|s| stream_index(&mut distinct, *s)).collect();

    let streams = distinct
        .iter()
        .map(|signal| signal.get_event_array_value())
        .collect::<Option<Vec<_>>>()?;

    let pick_index = sequence
        .iter()
        .zip(&order)
        .find(|(s, _)| std::ptr::eq(**s, pick))
        .map(|(_, &index)| index);

    let values = match pick_index {
        Some(index) => pick_from_sequence(&streams, index, &order, &excluded, cyclic),
        None => pick.get_event_array_value()?.of_same_kind(Vec::new()),
    };
    Some(pick.clone_with(ValueOverride::Replace(values.into())))
}
