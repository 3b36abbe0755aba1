//! The typed signal container.

use tracing::{debug, warn};

use super::entity::{ComponentSequence, PlaneSequence, Segment, VectorSequence};
use super::space::{SpaceConverter, SpaceState};
use super::value::{SignalType, SignalValue};
use crate::core::{FrameRate, FrameSpan, NumericArray, ResultType, Result};

/// Value handed to [`Signal::clone_with`].
#[derive(Debug, Clone, Default)]
pub enum ValueOverride {
    /// Copy the current value and frame map.
    #[default]
    Keep,
    /// Leave the clone without a value.
    Empty,
    /// Use a new value; no frame map is carried over.
    Replace(SignalValue),
}

/// One measured or derived value stream and its temporal metadata.
#[derive(Debug, Clone, Default)]
pub struct Signal {
    /// Signal name.
    pub name: Option<String>,
    /// Name of the set the signal belongs to (markers, segments, events, ...).
    pub set: Option<String>,
    /// Frame rate in frames per second.
    pub frame_rate: Option<FrameRate>,
    /// Logical sub-sequences over the frame axis, such as gait cycles.
    pub cycles: Vec<FrameSpan>,
    /// Explicit event classification.
    pub is_event: bool,
    /// Component name when this signal is one axis of `original_signal`.
    pub component: Option<String>,
    /// Signal the component was extracted from.
    pub original_signal: Option<Box<Signal>>,
    value: SignalValue,
    frame_map: Option<Vec<usize>>,
    result_type: Option<ResultType>,
    space: SpaceState,
}

impl Signal {
    /// Create a signal holding `value`.
    pub fn new(value: impl Into<SignalValue>) -> Self {
        let mut signal = Self::default();
        signal.set_value(value, None);
        signal
    }

    /// Set the frame rate.
    pub fn with_frame_rate(mut self, frame_rate: FrameRate) -> Self {
        self.frame_rate = Some(frame_rate);
        self
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the cycles.
    pub fn with_cycles(mut self, cycles: Vec<FrameSpan>) -> Self {
        self.cycles = cycles;
        self
    }

    /// Replace the value.
    ///
    /// A frame rate carried by the new value overrides the signal's; otherwise
    /// the current frame rate is kept. The frame map is always replaced.
    pub fn set_value(&mut self, value: impl Into<SignalValue>, frame_map: Option<Vec<usize>>) {
        let value = value.into();
        if let Some(rate) = value.frame_rate() {
            self.frame_rate = Some(rate);
        }
        self.value = value;
        self.frame_map = frame_map;
    }

    /// Current value.
    #[inline]
    pub fn value(&self) -> &SignalValue {
        &self.value
    }

    /// Kind of the current value.
    #[inline]
    pub fn signal_type(&self) -> SignalType {
        self.value.signal_type()
    }

    /// Original frame number of each value index, for signals that are a
    /// subset of another signal's frames.
    pub fn frame_map(&self) -> Option<&[usize]> {
        self.frame_map.as_deref()
    }

    /// Replace the frame map without touching the value.
    pub fn set_frame_map(&mut self, frame_map: Option<Vec<usize>>) {
        self.frame_map = frame_map;
    }

    /// Map a local index to an original frame number through the frame map.
    pub fn original_frame(&self, index: usize) -> Option<usize> {
        match &self.frame_map {
            Some(map) => map.get(index).copied(),
            None => Some(index),
        }
    }

    /// Explicit result type, or the default for the value kind.
    pub fn result_type(&self) -> Option<ResultType> {
        self.result_type.or_else(|| self.signal_type().default_result_type())
    }

    /// Override the result type; `None` restores the default.
    pub fn set_result_type(&mut self, result_type: Option<ResultType>) {
        self.result_type = result_type;
    }

    /// Coordinate space state.
    pub fn space_state(&self) -> &SpaceState {
        &self.space
    }

    /// Current space.
    pub fn space(&self) -> Option<&str> {
        self.space.space()
    }

    /// Pending target space.
    pub fn target_space(&self) -> Option<&str> {
        self.space.target_space()
    }

    /// Set the current space.
    pub fn set_space(&mut self, space: Option<String>) {
        self.space.set_space(space);
    }

    /// Request conversion to `target` on the next
    /// [`convert_to_target_space`](Self::convert_to_target_space).
    pub fn set_target_space(&mut self, target: impl Into<String>) {
        self.space.request(target);
    }

    /// Number of frames, characters or elements, depending on the value kind.
    pub fn len(&self) -> Option<usize> {
        match &self.value {
            SignalValue::Uint32Array(a) | SignalValue::Float32Array(a) => Some(a.len()),
            SignalValue::Float32ArrayArray(arrays) => Some(arrays.first().map_or(0, |a| a.len())),
            SignalValue::String(s) => Some(s.chars().count()),
            SignalValue::Segment(s) => Some(s.len()),
            SignalValue::VectorSequence(v) => Some(v.len()),
            SignalValue::PlaneSequence(p) => Some(p.len()),
            SignalValue::None | SignalValue::Scalar(_) => None,
        }
    }

    /// Component names of entity values.
    pub fn components(&self) -> Option<&'static [&'static str]> {
        match &self.value {
            SignalValue::Segment(_) => Some(Segment::COMPONENTS),
            SignalValue::VectorSequence(_) => Some(VectorSequence::COMPONENTS),
            SignalValue::PlaneSequence(_) => Some(PlaneSequence::COMPONENTS),
            _ => None,
        }
    }

    /// One axis of an entity value as a flat array.
    pub fn component(&self, name: &str) -> Option<NumericArray> {
        let values = match &self.value {
            SignalValue::Segment(s) => s.component(name),
            SignalValue::VectorSequence(v) => v.component(name),
            SignalValue::PlaneSequence(p) => p.component(name),
            _ => None,
        }?;
        Some(NumericArray::from(values.to_vec()))
    }

    /// Numeric content as component arrays.
    pub fn array(&self) -> Option<Vec<NumericArray>> {
        match &self.value {
            SignalValue::Scalar(v) => Some(vec![NumericArray::plain(vec![*v])]),
            SignalValue::Uint32Array(a) | SignalValue::Float32Array(a) => Some(vec![a.clone()]),
            SignalValue::Float32ArrayArray(arrays) => Some(arrays.clone()),
            SignalValue::Segment(s) => Some(s.arrays()),
            SignalValue::VectorSequence(v) => Some(v.arrays()),
            SignalValue::PlaneSequence(p) => Some(p.arrays()),
            SignalValue::None | SignalValue::String(_) => None,
        }
    }

    /// Numeric content of scalar, index-array and float-array values.
    pub fn get_event_array_value(&self) -> Option<NumericArray> {
        match &self.value {
            SignalValue::Scalar(v) => Some(NumericArray::plain(vec![*v])),
            SignalValue::Uint32Array(a) | SignalValue::Float32Array(a) => Some(a.clone()),
            _ => None,
        }
    }

    /// Whether the signal can be consumed as a list of event frames.
    pub fn is_event_like(&self) -> bool {
        self.is_event
            || (self.signal_type().is_event_compatible()
                && self.result_type() == Some(ResultType::Scalar))
    }

    /// New signal with this signal's metadata and the value chosen by `value`.
    ///
    /// Name, set, space, frame rate, cycles, event flag and an explicit result
    /// type are copied. Component provenance is not.
    pub fn clone_with(&self, value: ValueOverride) -> Signal {
        let mut signal = Signal {
            name: self.name.clone(),
            set: self.set.clone(),
            frame_rate: self.frame_rate,
            cycles: self.cycles.clone(),
            is_event: self.is_event,
            result_type: self.result_type,
            space: self.space.clone(),
            ..Default::default()
        };
        match value {
            ValueOverride::Keep => {
                signal.value = self.value.clone();
                signal.frame_map = self.frame_map.clone();
            }
            ValueOverride::Empty => {}
            ValueOverride::Replace(value) => signal.set_value(value, None),
        }
        signal
    }

    /// Signal restricted to the given frame indices.
    ///
    /// Indices are rounded, negative indices count from the end, indices
    /// outside the signal are dropped, and the rest are sorted and
    /// de-duplicated. The resolved indices become the frame map of the result,
    /// whose result type is `Scalar`. A component signal keeps its original
    /// signal, restricted to the same frames. Returns `None` for value kinds
    /// without a frame axis.
    pub fn get_frames(&self, frames: &[f64]) -> Option<Signal> {
        let len = self.len()?;
        let indices = resolve_frames(frames, len);
        if indices.len() < frames.len() {
            debug!(
                requested = frames.len(),
                kept = indices.len(),
                "frame indices dropped or merged while selecting frames"
            );
        }

        let value = match &self.value {
            SignalValue::Uint32Array(a) => SignalValue::Uint32Array(a.select(&indices)),
            SignalValue::Float32Array(a) => SignalValue::Float32Array(a.select(&indices)),
            SignalValue::Float32ArrayArray(arrays) => {
                SignalValue::Float32ArrayArray(arrays.iter().map(|a| a.select(&indices)).collect())
            }
            SignalValue::Segment(s) => SignalValue::Segment(s.select(&indices)),
            SignalValue::VectorSequence(v) => SignalValue::VectorSequence(v.select(&indices)),
            SignalValue::PlaneSequence(p) => SignalValue::PlaneSequence(p.select(&indices)),
            SignalValue::None | SignalValue::Scalar(_) | SignalValue::String(_) => return None,
        };

        let mut signal = self.clone_with(ValueOverride::Replace(value));
        signal.result_type = Some(ResultType::Scalar);
        if let Some(original) = &self.original_signal {
            let frames: Vec<f64> = indices.iter().map(|&i| i as f64).collect();
            signal.component = self.component.clone();
            signal.original_signal = original.get_frames(&frames).map(Box::new);
        }
        signal.frame_map = Some(indices);
        Some(signal)
    }

    /// One signal per cycle, each restricted to the cycle's inclusive frames.
    ///
    /// Uses the signal's own cycles when `cycles` is `None`. Cycles are clamped
    /// to the signal's frames; a cycle entirely outside them selects nothing.
    /// Returns `None` when there are no cycles or the value has no frame axis.
    pub fn get_signal_cycles(&self, cycles: Option<&[FrameSpan]>) -> Option<Vec<Signal>> {
        let cycles = cycles.unwrap_or(self.cycles.as_slice());
        if cycles.is_empty() {
            return None;
        }
        let len = self.len()?;
        cycles
            .iter()
            .map(|cycle| {
                let frames: Vec<f64> = match cycle.clamp_to(len) {
                    Some((start, end)) => (start..=end).map(|f| f as f64).collect(),
                    None => Vec::new(),
                };
                self.get_frames(&frames)
            })
            .collect()
    }

    /// Extract one axis of an entity value into its own signal, keeping enough
    /// provenance to redo a space conversion on the full value later.
    ///
    /// The original signal always covers exactly the component's frames.
    pub fn component_signal(&self, name: &str) -> Option<Signal> {
        let values = self.component(name)?;
        let mut signal = self.clone_with(ValueOverride::Replace(values.into()));
        signal.frame_map = self.frame_map.clone();
        signal.component = Some(name.to_string());
        signal.original_signal = Some(Box::new(self.clone()));
        Some(signal)
    }

    /// Apply a pending space conversion.
    ///
    /// Vector and segment values are converted directly. A component signal is
    /// re-derived by converting its original signal and extracting the
    /// component again; the original then holds the converted value in the
    /// target space. Plane sequences are not supported. Returns `Ok(true)`
    /// when a conversion ran; the pending target then becomes the current
    /// space.
    pub fn convert_to_target_space(&mut self, converter: &dyn SpaceConverter) -> Result<bool> {
        let Some(target) = self.space.target_space().map(str::to_owned) else {
            return Ok(false);
        };
        let from = self.space.space().map(str::to_owned);
        let from = from.as_deref();

        let (converted, full) = match (
            self.component.as_deref(),
            self.original_signal.as_deref(),
        ) {
            (Some(component), Some(original)) => {
                let full = match original.value() {
                    SignalValue::VectorSequence(v) => {
                        SignalValue::from(converter.convert_vectors(v, from, &target)?)
                    }
                    SignalValue::Segment(s) => {
                        SignalValue::from(converter.convert_segment(s, from, &target)?)
                    }
                    _ => SignalValue::None,
                };
                let axis = match &full {
                    SignalValue::VectorSequence(v) => v.component(component),
                    SignalValue::Segment(s) => s.component(component),
                    _ => None,
                };
                let value = axis.map(|values| SignalValue::from(values.to_vec()));
                (value, Some(full))
            }
            _ => {
                let value = match &self.value {
                    SignalValue::VectorSequence(v) => {
                        Some(SignalValue::from(converter.convert_vectors(v, from, &target)?))
                    }
                    SignalValue::Segment(s) => {
                        Some(SignalValue::from(converter.convert_segment(s, from, &target)?))
                    }
                    _ => None,
                };
                (value, None)
            }
        };

        let Some(value) = converted else {
            warn!(
                signal = self.name.as_deref().unwrap_or(""),
                kind = ?self.signal_type(),
                target = %target,
                "space conversion not supported for this value"
            );
            return Ok(false);
        };

        if let (Some(full), Some(original)) = (full, self.original_signal.as_deref_mut()) {
            let original_map = original.frame_map.take();
            original.set_value(full, original_map);
            original.space.set_space(Some(target.clone()));
        }

        let frame_map = self.frame_map.take();
        self.set_value(value, frame_map);
        self.space.commit();
        Ok(true)
    }
}

/// Normalise requested frame indices against a signal of `len` frames.
fn resolve_frames(frames: &[f64], len: usize) -> Vec<usize> {
    let len = len as i64;
    let mut indices: Vec<usize> = frames
        .iter()
        .filter(|f| f.is_finite())
        .map(|f| (f + 0.5).floor() as i64)
        .map(|f| if f < 0 { len + f } else { f })
        .filter(|&f| f >= 0 && f < len)
        .map(|f| f as usize)
        .collect();
    indices.sort_unstable();
    indices.dedup();
    indices
}
