//! Numeric series utilities.
//!
//! All functions are pure and return new arrays of the same element kind as
//! their input.

pub mod buffer;
pub mod mask;
pub mod nan;
pub mod split;

pub use buffer::{buffer, BufferMethod};
pub use mask::{mask, MaskResult};
pub use nan::{filter_nan, filter_nan_sparse};
pub use split::{merge, split_on_nan, SeriesSegment};
