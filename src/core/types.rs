//! Core data types for kinesig.

use serde::{Deserialize, Serialize};

/// Type alias for frame rates (frames per second).
pub type FrameRate = f64;

/// Inclusive range of frames, the unit of cycle and mask description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameSpan {
    /// First frame of the span.
    pub start: i64,
    /// Last frame of the span (inclusive).
    pub end: i64,
}

impl FrameSpan {
    /// Create a new frame span.
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Number of frames covered, zero for inverted spans.
    #[inline]
    pub fn len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start + 1) as usize
        }
    }

    /// Check if the span covers no frames.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Clamp the span to `[0, length)`. Returns `None` if nothing remains.
    pub fn clamp_to(&self, length: usize) -> Option<(usize, usize)> {
        if length == 0 {
            return None;
        }
        let start = self.start.max(0);
        let end = self.end.min(length as i64 - 1);
        if start > end {
            return None;
        }
        Some((start as usize, end as usize))
    }
}

impl From<(i64, i64)> for FrameSpan {
    fn from((start, end): (i64, i64)) -> Self {
        Self { start, end }
    }
}

/// Classification of a signal result consumed by downstream steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultType {
    /// Discrete values, such as event frames or per-cycle results.
    Scalar,
    /// Continuous per-frame series.
    Series,
}

/// Binary arithmetic operation applied by broadcasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// Apply the operation to two numbers.
    #[inline]
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            Operation::Multiply => a * b,
            Operation::Divide => a / b,
        }
    }
}
