//! Bounded-length gap filling.
//!
//! A gap is a maximal run of NaN samples. Only gaps with a known sample on
//! both sides and a length of at most `max_gap_length_frames` are filled.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Interpolation used to fill a gap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapFillMethod {
    /// Straight line between the bounding samples.
    #[default]
    Linear,
    /// Natural cubic spline through up to two known samples on each side.
    Spline,
}

/// Gap filling configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapFillConfig {
    /// Interpolation method.
    pub method: GapFillMethod,
    /// Longest gap, in frames, that is filled.
    pub max_gap_length_frames: usize,
}

impl Default for GapFillConfig {
    fn default() -> Self {
        Self {
            method: GapFillMethod::Linear,
            max_gap_length_frames: 10,
        }
    }
}

/// Fill gaps in `values` according to `config`.
pub fn fill_gaps(values: &[f64], config: &GapFillConfig) -> Vec<f64> {
    match config.method {
        GapFillMethod::Linear => linear_interpolation(values, config.max_gap_length_frames),
        GapFillMethod::Spline => spline_interpolation(values, config.max_gap_length_frames),
    }
}

/// Inclusive `(start, end)` index pairs of fillable gaps.
fn fillable_gaps(values: &[f64], max_gap_length_frames: usize) -> Vec<(usize, usize)> {
    let n = values.len();
    let mut gaps = Vec::new();

    let mut i = 0;
    while i < n {
        if !values[i].is_nan() {
            i += 1;
            continue;
        }
        let start = i;
        while i < n && values[i].is_nan() {
            i += 1;
        }
        let end = i - 1;
        let length = end - start + 1;

        if start == 0 || i == n {
            debug!(start, length, "gap touches series boundary, left unfilled");
        } else if length > max_gap_length_frames {
            debug!(start, length, max_gap_length_frames, "gap too long, left unfilled");
        } else {
            gaps.push((start, end));
        }
    }

    gaps
}

/// Fill gaps of at most `max_gap_length_frames` by linear interpolation.
pub fn linear_interpolation(values: &[f64], max_gap_length_frames: usize) -> Vec<f64> {
    let mut result = values.to_vec();

    for (start, end) in fillable_gaps(values, max_gap_length_frames) {
        let before = values[start - 1];
        let after = values[end + 1];
        let span = (end - start + 2) as f64;
        for i in start..=end {
            let t = (i - start + 1) as f64 / span;
            result[i] = before + (after - before) * t;
        }
    }

    result
}

/// Fill gaps of at most `max_gap_length_frames` with a natural cubic spline
/// fitted to up to two known samples before and after each gap.
pub fn spline_interpolation(values: &[f64], max_gap_length_frames: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = values.to_vec();

    for (start, end) in fillable_gaps(values, max_gap_length_frames) {
        let mut knots = Vec::with_capacity(4);
        if start >= 2 && !values[start - 2].is_nan() {
            knots.push(start - 2);
        }
        knots.push(start - 1);
        knots.push(end + 1);
        if end + 2 < n && !values[end + 2].is_nan() {
            knots.push(end + 2);
        }

        let xs: Vec<f64> = knots.iter().map(|&k| k as f64).collect();
        let ys: Vec<f64> = knots.iter().map(|&k| values[k]).collect();
        let spline = CubicSpline::natural(xs, ys);

        for i in start..=end {
            result[i] = spline.evaluate(i as f64);
        }
    }

    result
}

/// Natural cubic spline through strictly increasing knots.
#[derive(Debug, Clone)]
struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivatives at the knots.
    m: Vec<f64>,
}

impl CubicSpline {
    fn natural(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        let n = xs.len();
        let mut m = vec![0.0; n];

        if n > 2 {
            let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
            let interior = n - 2;
            let mut diag = vec![0.0; interior];
            let mut upper = vec![0.0; interior];
            let mut rhs = vec![0.0; interior];

            for k in 0..interior {
                let i = k + 1;
                diag[k] = 2.0 * (h[i - 1] + h[i]);
                upper[k] = h[i];
                rhs[k] = 6.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
            }

            // Thomas algorithm; the sub-diagonal entry of row k is h[k].
            for k in 1..interior {
                let w = h[k] / diag[k - 1];
                diag[k] -= w * upper[k - 1];
                rhs[k] -= w * rhs[k - 1];
            }
            m[interior] = rhs[interior - 1] / diag[interior - 1];
            for k in (0..interior - 1).rev() {
                m[k + 1] = (rhs[k] - upper[k] * m[k + 2]) / diag[k];
            }
        }

        Self { xs, ys, m }
    }

    fn evaluate(&self, x: f64) -> f64 {
        let last = self.xs.len() - 1;
        let i = self.xs.windows(2).position(|w| x <= w[1]).unwrap_or(last - 1);

        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        let (m0, m1) = (self.m[i], self.m[i + 1]);
        let h = x1 - x0;
        let a = x1 - x;
        let b = x - x0;

        m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }
}
