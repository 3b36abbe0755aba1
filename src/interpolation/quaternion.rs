//! Quaternion spherical linear interpolation.
//!
//! Quaternions are `[x, y, z, w]`. Inputs are taken as slices so component
//! counts coming from untyped data can be validated.

use super::lerp::resample_position;
use crate::core::error::KinesigError;
use crate::core::Result;

/// A quaternion as `[x, y, z, w]`.
pub type Quaternion = [f64; 4];

/// Above this dot product the arc is short enough to blend linearly.
const LINEAR_THRESHOLD: f64 = 0.9995;

fn to_quaternion(q: &[f64]) -> Result<Quaternion> {
    match q {
        [x, y, z, w] => Ok([*x, *y, *z, *w]),
        _ => Err(KinesigError::InvalidQuaternion { actual: q.len() }),
    }
}

/// Spherical interpolation between `q1` and `q2` along the shortest arc.
///
/// `t = 0` returns `q1` and `t = 1` returns `q2` exactly.
///
/// # Errors
/// `InvalidQuaternion` if either input does not have 4 components,
/// `InvalidParameter` if `t` is not finite.
pub fn slerp(q1: &[f64], q2: &[f64], t: f64) -> Result<Quaternion> {
    let a = to_quaternion(q1)?;
    let mut b = to_quaternion(q2)?;
    if !t.is_finite() {
        return Err(KinesigError::invalid_parameter("interpolation factor must be finite"));
    }

    if t == 0.0 || a == b {
        return Ok(a);
    }
    if t == 1.0 {
        return Ok(b);
    }

    let mut dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    if dot < 0.0 {
        b.iter_mut().for_each(|c| *c = -*c);
        dot = -dot;
    }

    if dot > LINEAR_THRESHOLD {
        let mut out = [0.0; 4];
        for i in 0..4 {
            out[i] = a[i] + t * (b[i] - a[i]);
        }
        let norm = out.iter().map(|c| c * c).sum::<f64>().sqrt();
        if norm > 0.0 {
            out.iter_mut().for_each(|c| *c /= norm);
        }
        return Ok(out);
    }

    let theta_0 = dot.min(1.0).acos();
    let theta = theta_0 * t;
    let sin_theta_0 = theta_0.sin();
    let s1 = (theta_0 - theta).sin() / sin_theta_0;
    let s2 = theta.sin() / sin_theta_0;

    let mut out = [0.0; 4];
    for i in 0..4 {
        out[i] = s1 * a[i] + s2 * b[i];
    }
    Ok(out)
}

/// Resample a quaternion sequence to `new_length` keyframes, slerping between
/// the two source keyframes that bracket each output position.
///
/// # Errors
/// `InsufficientData` for fewer than 2 quaternions, `InvalidQuaternion` if any
/// quaternion does not have 4 components.
pub fn slerp_array<Q: AsRef<[f64]>>(
    quaternions: &[Q],
    new_length: usize,
) -> Result<Vec<Quaternion>> {
    let n = quaternions.len();
    if n < 2 {
        return Err(KinesigError::insufficient_data(2, n));
    }
    let keyframes =
        quaternions.iter().map(|q| to_quaternion(q.as_ref())).collect::<Result<Vec<_>>>()?;

    (0..new_length)
        .map(|i| {
            let (lower, upper, t) = resample_position(i, n, new_length);
            slerp(&keyframes[lower], &keyframes[upper], t)
        })
        .collect()
}
