//! Exact Interpolating Splines for Envelope Construction
//!
//! Envelopes pass exactly through their knots (zero smoothing). With four
//! or more knots the interpolant is a cubic spline with **not-a-knot** end
//! conditions: the third derivative is continuous across the second and the
//! penultimate knots, so the first two and last two segments share one cubic
//! each. Unlike natural end conditions this does not force zero curvature at
//! the ends, which keeps envelopes from bending toward the data near the
//! boundaries.
//!
//! With exactly three knots a cubic is underdetermined; the unique quadratic
//! through the three points is used instead. Fewer than three knots is an
//! error.
//!
//! Evaluation outside `[x_0, x_{m-1}]` extends the outermost segment's
//! polynomial.
//!
//! ## Solving for the Second Derivatives
//!
//! Interior continuity of the first derivative gives, for `j = 1..m-2`:
//!
//! ```text
//! h[j-1]·M[j-1] + 2·(h[j-1] + h[j])·M[j] + h[j]·M[j+1] = 6·(d[j] - d[j-1])
//! ```
//!
//! where `h[j] = x[j+1] - x[j]` and `d[j] = (y[j+1] - y[j]) / h[j]`. The two
//! not-a-knot conditions express `M[0]` and `M[m-1]` through their inner
//! neighbours; substituting them leaves a diagonally dominant tridiagonal
//! system in `M[1..m-2]`, solved with the Thomas algorithm.

use crate::types::{EmdError, EmdResult, Sample};

/// Minimum knots for the cubic spline
pub const MIN_CUBIC_KNOTS: usize = 4;

/// Minimum knots for any interpolant
pub const MIN_KNOTS: usize = 3;

/// Cubic spline with not-a-knot end conditions
#[derive(Debug, Clone)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Second derivative at each knot
    m: Vec<f64>,
}

impl CubicSpline {
    /// Fit a spline through `(x[i], y[i])`; `x` must be strictly ascending.
    pub fn new(x: &[f64], y: &[f64]) -> EmdResult<Self> {
        debug_assert_eq!(x.len(), y.len());
        let m = x.len();
        if m < MIN_CUBIC_KNOTS {
            return Err(EmdError::TooFewKnots {
                got: m,
                min: MIN_CUBIC_KNOTS,
            });
        }

        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        if h.iter().any(|&hi| !(hi > 0.0)) {
            return Err(EmdError::SingularSpline);
        }
        let d: Vec<f64> = (0..m - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

        // Tridiagonal system over M[1..=m-2]
        let p = m - 2;
        let mut sub = vec![0.0; p];
        let mut diag = vec![0.0; p];
        let mut sup = vec![0.0; p];
        let mut rhs = vec![0.0; p];

        for r in 0..p {
            let j = r + 1;
            sub[r] = h[j - 1];
            diag[r] = 2.0 * (h[j - 1] + h[j]);
            sup[r] = h[j];
            rhs[r] = 6.0 * (d[j] - d[j - 1]);
        }

        // Not-a-knot at x[1]
        let (h0, h1) = (h[0], h[1]);
        diag[0] += h0 * (h0 + h1) / h1;
        sup[0] -= h0 * h0 / h1;
        sub[0] = 0.0;

        // Not-a-knot at x[m-2]
        let (ha, hb) = (h[m - 3], h[m - 2]);
        diag[p - 1] += hb * (ha + hb) / ha;
        sub[p - 1] -= hb * hb / ha;
        sup[p - 1] = 0.0;

        let inner = solve_tridiagonal(&sub, &diag, &sup, &rhs)?;

        let mut second = vec![0.0; m];
        second[1..=p].copy_from_slice(&inner);
        second[0] = ((h0 + h1) * second[1] - h0 * second[2]) / h1;
        second[m - 1] = ((ha + hb) * second[m - 2] - hb * second[m - 3]) / ha;

        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            m: second,
        })
    }

    /// Evaluate the segment polynomial `seg` at `t`.
    fn eval_segment(&self, seg: usize, t: f64) -> f64 {
        let (x0, x1) = (self.x[seg], self.x[seg + 1]);
        let (y0, y1) = (self.y[seg], self.y[seg + 1]);
        let (m0, m1) = (self.m[seg], self.m[seg + 1]);
        let h = x1 - x0;
        let a = x1 - t;
        let b = t - x0;

        m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }

    /// Evaluate at an arbitrary abscissa.
    pub fn evaluate(&self, t: f64) -> f64 {
        let last_seg = self.x.len() - 2;
        let seg = match self.x.partition_point(|&xi| xi <= t) {
            0 => 0,
            k => (k - 1).min(last_seg),
        };
        self.eval_segment(seg, t)
    }

    /// Evaluate at every integer index `0..n`.
    pub fn sample(&self, n: usize) -> Vec<Sample> {
        let last_seg = self.x.len() - 2;
        let mut seg = 0;
        (0..n)
            .map(|i| {
                let t = i as f64;
                while seg < last_seg && t >= self.x[seg + 1] {
                    seg += 1;
                }
                self.eval_segment(seg, t)
            })
            .collect()
    }
}

/// Thomas algorithm; `sub[0]` and `sup[n-1]` are ignored.
fn solve_tridiagonal(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> EmdResult<Vec<f64>> {
    let n = diag.len();
    let mut c = vec![0.0; n];
    let mut r = vec![0.0; n];

    let mut pivot = diag[0];
    if pivot.abs() < f64::EPSILON {
        return Err(EmdError::SingularSpline);
    }
    c[0] = sup[0] / pivot;
    r[0] = rhs[0] / pivot;

    for i in 1..n {
        pivot = diag[i] - sub[i] * c[i - 1];
        if pivot.abs() < f64::EPSILON {
            return Err(EmdError::SingularSpline);
        }
        c[i] = sup[i] / pivot;
        r[i] = (rhs[i] - sub[i] * r[i - 1]) / pivot;
    }

    let mut out = vec![0.0; n];
    out[n - 1] = r[n - 1];
    for i in (0..n - 1).rev() {
        out[i] = r[i] - c[i] * out[i + 1];
    }
    Ok(out)
}

/// Quadratic through exactly three knots, evaluated at `0..n`.
fn quadratic_through(x: &[f64], y: &[f64], n: usize) -> EmdResult<Vec<Sample>> {
    let (x0, x1, x2) = (x[0], x[1], x[2]);
    if !(x1 > x0 && x2 > x1) {
        return Err(EmdError::SingularSpline);
    }
    let w0 = y[0] / ((x0 - x1) * (x0 - x2));
    let w1 = y[1] / ((x1 - x0) * (x1 - x2));
    let w2 = y[2] / ((x2 - x0) * (x2 - x1));

    Ok((0..n)
        .map(|i| {
            let t = i as f64;
            w0 * (t - x1) * (t - x2) + w1 * (t - x0) * (t - x2) + w2 * (t - x0) * (t - x1)
        })
        .collect())
}

/// Interpolate the knots at every integer index `0..n`.
///
/// Three knots use the quadratic interpolant, four or more the not-a-knot
/// cubic spline.
pub fn interpolate(x: &[f64], y: &[f64], n: usize) -> EmdResult<Vec<Sample>> {
    match x.len() {
        k if k < MIN_KNOTS => Err(EmdError::TooFewKnots {
            got: k,
            min: MIN_KNOTS,
        }),
        MIN_KNOTS => quadratic_through(x, y, n),
        _ => Ok(CubicSpline::new(x, y)?.sample(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubic(t: f64) -> f64 {
        0.5 * t.powi(3) - 2.0 * t * t + t - 3.0
    }

    #[test]
    fn test_passes_through_knots() {
        let x = [0.0, 3.0, 7.0, 10.0, 16.0, 19.0];
        let y = [1.0, -2.0, 0.5, 4.0, -1.0, 2.0];
        let spline = CubicSpline::new(&x, &y).unwrap();
        for (xi, yi) in x.iter().zip(y.iter()) {
            assert!((spline.evaluate(*xi) - yi).abs() < 1e-9, "x={xi}");
        }
        let sampled = spline.sample(20);
        for (xi, yi) in x.iter().zip(y.iter()) {
            assert!((sampled[*xi as usize] - yi).abs() < 1e-9);
        }
    }

    #[test]
    fn test_reproduces_cubic_exactly() {
        // Not-a-knot splines are exact for cubic polynomials, including
        // extrapolation past either end
        let x = [2.0, 5.0, 6.0, 11.0, 15.0];
        let y: Vec<f64> = x.iter().map(|&t| cubic(t)).collect();
        let sampled = CubicSpline::new(&x, &y).unwrap().sample(20);
        for (i, v) in sampled.iter().enumerate() {
            let expected = cubic(i as f64);
            assert!((v - expected).abs() < 1e-6 * expected.abs().max(1.0), "i={i}: {v} vs {expected}");
        }
    }

    #[test]
    fn test_four_knots_single_cubic() {
        let x = [0.0, 1.0, 4.0, 9.0];
        let y: Vec<f64> = x.iter().map(|&t| cubic(t)).collect();
        let spline = CubicSpline::new(&x, &y).unwrap();
        assert!((spline.evaluate(6.5) - cubic(6.5)).abs() < 1e-8);
    }

    #[test]
    fn test_constant_knots() {
        let x = [16.0, 80.0, 144.0, 208.0];
        let out = interpolate(&x, &[1.0; 4], 256).unwrap();
        assert_eq!(out.len(), 256);
        assert!(out.iter().all(|v| (v - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_quadratic_fallback() {
        let x = [1.0, 4.0, 8.0];
        let y: Vec<f64> = x.iter().map(|&t| 2.0 * t * t - t + 0.5).collect();
        let out = interpolate(&x, &y, 10).unwrap();
        for (i, v) in out.iter().enumerate() {
            let t = i as f64;
            assert!((v - (2.0 * t * t - t + 0.5)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_too_few_knots() {
        assert_eq!(
            interpolate(&[0.0, 1.0], &[0.0, 1.0], 4),
            Err(EmdError::TooFewKnots { got: 2, min: 3 })
        );
        assert!(matches!(
            CubicSpline::new(&[0.0, 1.0, 2.0], &[0.0; 3]),
            Err(EmdError::TooFewKnots { got: 3, min: 4 })
        ));
    }

    #[test]
    fn test_non_ascending_knots() {
        assert_eq!(
            CubicSpline::new(&[0.0, 2.0, 2.0, 5.0], &[0.0; 4]).unwrap_err(),
            EmdError::SingularSpline
        );
        assert_eq!(
            interpolate(&[3.0, 1.0, 5.0], &[0.0; 3], 6).unwrap_err(),
            EmdError::SingularSpline
        );
    }

    #[test]
    fn test_sample_matches_evaluate() {
        let x = [0.0, 5.0, 9.0, 12.0, 20.0, 27.0];
        let y = [0.0, 1.0, -1.0, 0.5, 2.0, -0.5];
        let spline = CubicSpline::new(&x, &y).unwrap();
        let sampled = spline.sample(30);
        for (i, v) in sampled.iter().enumerate() {
            assert!((v - spline.evaluate(i as f64)).abs() < 1e-12, "i={i}");
        }
    }
}
