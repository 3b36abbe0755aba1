//! Whole-series and per-cycle aggregation.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::reducers::Reducer;
use crate::core::{FrameSpan, NumericArray, Result, ResultType};
use crate::signal::{Signal, SignalValue, ValueOverride};

/// How index reducers report their result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IndexOutput {
    /// Index into the aggregated series.
    #[default]
    Local,
    /// Index mapped through the signal's frame map to an original frame.
    Frame,
}

/// Aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationConfig {
    pub reducer: Reducer,
    /// Reduce each of the signal's cycles separately.
    pub per_cycle: bool,
    pub index_output: IndexOutput,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            reducer: Reducer::Mean,
            per_cycle: false,
            index_output: IndexOutput::Local,
        }
    }
}

impl AggregationConfig {
    /// Config for `reducer` with default settings.
    pub fn new(reducer: Reducer) -> Self {
        Self {
            reducer,
            ..Default::default()
        }
    }

    /// Reduce per cycle.
    pub fn with_per_cycle(mut self, per_cycle: bool) -> Self {
        self.per_cycle = per_cycle;
        self
    }

    /// Set the index output mode.
    pub fn with_index_output(mut self, index_output: IndexOutput) -> Self {
        self.index_output = index_output;
        self
    }
}

/// Slice `values` into one inclusive sub-slice per cycle.
///
/// Cycles are clamped to the series; a cycle entirely outside it yields an
/// empty slice.
pub fn split_cycles<'a>(values: &'a [f64], cycles: &[FrameSpan]) -> Vec<&'a [f64]> {
    cycles
        .iter()
        .map(|cycle| match cycle.clamp_to(values.len()) {
            Some((start, end)) => {
                if cycle.start < 0 || cycle.end >= values.len() as i64 {
                    debug!(
                        start = cycle.start,
                        end = cycle.end,
                        len = values.len(),
                        "cycle clamped"
                    );
                }
                &values[start..=end]
            }
            None => {
                debug!(
                    start = cycle.start,
                    end = cycle.end,
                    len = values.len(),
                    "cycle out of range"
                );
                &values[..0]
            }
        })
        .collect()
}

/// Apply `reducer` to the whole series, or to each cycle when `cycles` is not
/// empty.
///
/// Index reducers return indices into `values`, so per-cycle results are
/// offset by the cycle start.
pub fn aggregate(values: &[f64], cycles: &[FrameSpan], reducer: Reducer) -> Vec<f64> {
    if cycles.is_empty() {
        return vec![reducer.reduce(values)];
    }

    let offsets: Vec<usize> = cycles
        .iter()
        .map(|c| c.clamp_to(values.len()).map_or(0, |(start, _)| start))
        .collect();

    split_cycles(values, cycles)
        .par_iter()
        .zip(offsets.par_iter())
        .map(|(slice, &offset)| {
            let result = reducer.reduce(slice);
            if reducer.is_index() && !result.is_nan() {
                result + offset as f64
            } else {
                result
            }
        })
        .collect()
}

/// Aggregate a signal according to `config`.
///
/// Every component is reduced independently and the results are zipped back
/// into a value of the same kind: an entity keeps its components with one
/// sample per cycle, a single series becomes a scalar (or one value per
/// cycle). The result type is `Scalar`.
///
/// Returns `Ok(None)` when the signal holds no numeric value, or when
/// `per_cycle` is set and the signal has no cycles.
pub fn aggregate_signal(signal: &Signal, config: &AggregationConfig) -> Result<Option<Signal>> {
    let Some(arrays) = signal.array() else {
        return Ok(None);
    };
    let cycles: &[FrameSpan] = if config.per_cycle {
        if signal.cycles.is_empty() {
            debug!(signal = signal.name.as_deref().unwrap_or(""), "no cycles to aggregate over");
            return Ok(None);
        }
        &signal.cycles
    } else {
        &[]
    };

    let reducer = config.reducer;
    let map_frames = reducer.is_index() && config.index_output == IndexOutput::Frame;

    let results: Vec<Vec<f64>> = arrays
        .par_iter()
        .map(|array| {
            let mut reduced = aggregate(array.values(), cycles, reducer);
            if map_frames {
                for v in reduced.iter_mut().filter(|v| !v.is_nan()) {
                    *v = signal.original_frame(*v as usize).map_or(f64::NAN, |f| f as f64);
                }
            }
            reduced
        })
        .collect();

    let value = if signal.components().is_some() {
        let arrays = results.into_iter().map(NumericArray::float32).collect();
        signal.value().with_components(arrays)?
    } else if let SignalValue::Float32ArrayArray(_) = signal.value() {
        SignalValue::from(results.into_iter().map(NumericArray::float64).collect::<Vec<_>>())
    } else {
        match results.into_iter().next() {
            Some(reduced) if reduced.len() == 1 && cycles.is_empty() => {
                SignalValue::Scalar(reduced[0])
            }
            Some(reduced) => SignalValue::from(reduced),
            None => SignalValue::None,
        }
    };

    let mut result = signal.clone_with(ValueOverride::Replace(value));
    result.cycles.clear();
    result.set_result_type(Some(ResultType::Scalar));
    Ok(Some(result))
}
