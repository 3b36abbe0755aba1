//! Kinesig - typed biomechanical signals and the numeric kernels behind them.
//!
//! This crate provides:
//! - A [`Signal`](signal::Signal) container with a tagged value (scalar,
//!   index array, float series, multi-component series, string, or a
//!   vector/segment/plane entity) and frame provenance
//! - Frame selection, cycle splitting and deferred coordinate-space conversion
//! - Broadcasting arithmetic across scalars, series and nested series
//! - Scalar reducers and per-cycle aggregation
//! - Event pairing and ordered event-pattern selection
//! - Series utilities (buffering, masking, NaN filtering, NaN split/merge)
//! - Linear and quaternion resampling, and linear/spline gap filling
//!
//! Diagnostics are emitted through `tracing`; the embedding application
//! installs the subscriber.

pub mod aggregation;
pub mod arithmetic;
pub mod core;
pub mod events;
pub mod interpolation;
pub mod series;
pub mod signal;

pub use crate::core::{KinesigError, NumericArray, NumericKind, Result};
pub use crate::signal::{Signal, SignalType, SignalValue};
