//! Event pairing and ordered event selection.

pub mod pattern;
pub mod sequence;

pub use pattern::{pick_from_sequence, pick_from_sequence_signals};
pub use sequence::{event_sequence, event_sequence_signal, EventSequenceOptions};
