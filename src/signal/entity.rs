//! Multi-component sequence entities wrapped by [`Signal`](super::Signal).
//!
//! Every entity stores one `f32` array per named component, all of the same
//! length, plus the frame rate it was captured at when known.

use crate::core::error::KinesigError;
use crate::core::{NumericArray, Result};
use crate::interpolation::{lerp_array, slerp_array};

/// Uniform access to the component arrays of a sequence entity.
pub trait ComponentSequence: Sized {
    /// Entity name used in error messages.
    const NAME: &'static str;
    /// Component names, in storage order.
    const COMPONENTS: &'static [&'static str];

    /// Component array by name.
    fn component(&self, name: &str) -> Option<&[f32]>;

    /// Number of frames.
    fn len(&self) -> usize;

    /// Check if empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frame rate carried by the entity, if any.
    fn frame_rate(&self) -> Option<f64>;

    /// Build the entity from one array per component, in `COMPONENTS` order.
    /// Extra arrays are ignored.
    fn from_arrays(arrays: Vec<NumericArray>, frame_rate: Option<f64>) -> Result<Self>;

    /// Keep only the frames at `indices`.
    fn select(&self, indices: &[usize]) -> Self;

    /// Component arrays in `COMPONENTS` order.
    fn arrays(&self) -> Vec<NumericArray> {
        Self::COMPONENTS
            .iter()
            .filter_map(|name| self.component(name))
            .map(|c| NumericArray::from(c.to_vec()))
            .collect()
    }
}

/// Check component count and lengths before building an entity.
fn validate_arrays(entity: &'static str, required: usize, arrays: &[NumericArray]) -> Result<()> {
    if arrays.len() < required {
        return Err(KinesigError::insufficient_components(entity, required, arrays.len()));
    }
    let expected = arrays[0].len();
    if let Some(bad) = arrays[..required].iter().find(|a| a.len() != expected) {
        return Err(KinesigError::length_mismatch(expected, bad.len()));
    }
    Ok(())
}

macro_rules! component_sequence {
    ($(#[$meta:meta])* $name:ident { $($field:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $(pub $field: Vec<f32>,)+
            /// Capture frame rate.
            pub frame_rate: Option<f64>,
        }

        impl ComponentSequence for $name {
            const NAME: &'static str = stringify!($name);
            const COMPONENTS: &'static [&'static str] = &[$(stringify!($field)),+];

            fn component(&self, name: &str) -> Option<&[f32]> {
                match name {
                    $(stringify!($field) => Some(&self.$field),)+
                    _ => None,
                }
            }

            fn len(&self) -> usize {
                [$(self.$field.len()),+][0]
            }

            fn frame_rate(&self) -> Option<f64> {
                self.frame_rate
            }

            fn from_arrays(arrays: Vec<NumericArray>, frame_rate: Option<f64>) -> Result<Self> {
                validate_arrays(Self::NAME, Self::COMPONENTS.len(), &arrays)?;
                let mut arrays = arrays.into_iter();
                Ok(Self {
                    $($field: arrays.next().map(|a| a.to_f32_vec()).unwrap_or_default(),)+
                    frame_rate,
                })
            }

            fn select(&self, indices: &[usize]) -> Self {
                Self {
                    $($field: indices.iter().filter_map(|&i| self.$field.get(i).copied()).collect(),)+
                    frame_rate: self.frame_rate,
                }
            }
        }
    };
}

component_sequence!(
    /// Trajectory of a 3D point, such as a marker.
    VectorSequence { x, y, z }
);

component_sequence!(
    /// Rigid segment pose: origin position and orientation quaternion.
    Segment { x, y, z, rx, ry, rz, rw }
);

component_sequence!(
    /// Plane per frame as `a*x + b*y + c*z + d = 0`.
    PlaneSequence { a, b, c, d }
);

impl VectorSequence {
    /// Create a vector sequence from its three axes.
    pub fn new(x: Vec<f32>, y: Vec<f32>, z: Vec<f32>) -> Result<Self> {
        Self::from_arrays(vec![x.into(), y.into(), z.into()], None)
    }

    /// Resample every axis to `new_length` frames by linear interpolation.
    pub fn resample(&self, new_length: usize) -> Result<Self> {
        let arrays = self.arrays().iter().map(|a| lerp_array(a, new_length)).collect();
        Self::from_arrays(arrays, self.frame_rate)
    }
}

impl Segment {
    /// Orientation at `frame` as `[x, y, z, w]`.
    pub fn rotation(&self, frame: usize) -> Option<[f64; 4]> {
        Some([
            *self.rx.get(frame)? as f64,
            *self.ry.get(frame)? as f64,
            *self.rz.get(frame)? as f64,
            *self.rw.get(frame)? as f64,
        ])
    }

    /// Resample to `new_length` frames: positions linearly, orientations by
    /// quaternion slerp.
    ///
    /// # Errors
    /// `InsufficientData` if the segment has fewer than 2 frames.
    pub fn resample(&self, new_length: usize) -> Result<Self> {
        let rotations: Vec<[f64; 4]> =
            (0..self.len()).filter_map(|frame| self.rotation(frame)).collect();
        let resampled = slerp_array(&rotations, new_length)?;

        let mut arrays: Vec<NumericArray> = [&self.x, &self.y, &self.z]
            .iter()
            .map(|axis| lerp_array(&NumericArray::from(axis.to_vec()), new_length))
            .collect();
        for c in 0..4 {
            arrays.push(NumericArray::float32(resampled.iter().map(|q| q[c]).collect()));
        }
        Self::from_arrays(arrays, self.frame_rate)
    }
}
