//! Resampling and gap filling.

pub mod gapfill;
pub mod lerp;
pub mod quaternion;

pub use gapfill::{
    fill_gaps, linear_interpolation, spline_interpolation, GapFillConfig, GapFillMethod,
};
pub use lerp::lerp_array;
pub use quaternion::{slerp, slerp_array, Quaternion};
