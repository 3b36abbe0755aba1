//! Typed signal model.
//!
//! A [`Signal`] holds exactly one [`SignalValue`] together with its frame
//! rate, cycles, frame-index provenance and coordinate space.

pub mod entity;
pub mod signal;
pub mod space;
pub mod value;

pub use entity::{ComponentSequence, PlaneSequence, Segment, VectorSequence};
pub use signal::{Signal, ValueOverride};
pub use space::{SpaceConverter, SpaceState};
pub use value::{SignalType, SignalValue};
