//! Hilbert Spectral Analysis of IMFs
//!
//! Each IMF is narrow-band by construction, so its analytic signal yields
//! meaningful instantaneous amplitude and frequency. Applied to every IMF of
//! a decomposition this gives the Hilbert-Huang time-frequency picture.
//!
//! ```text
//!   a(t) = x(t) + j·H[x](t)
//!
//!   amplitude  = |a(t)|
//!   phase      = unwrap(arg a(t))
//!   frequency  = d(phase)/dt / 2π     [Hz]
//! ```
//!
//! The analytic signal is computed in the frequency domain: negative
//! frequencies are zeroed, positive ones doubled, DC (and Nyquist for even
//! lengths) kept as-is.

use num_complex::Complex64;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::decompose::Decomposition;
use crate::types::Sample;

/// Instantaneous attributes of one component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstantaneousAttributes {
    pub amplitude: Vec<f64>,
    /// Unwrapped phase in radians
    pub phase: Vec<f64>,
    /// Instantaneous frequency in Hz
    pub frequency: Vec<f64>,
}

/// Analytic signal of a real sequence.
pub fn analytic_signal(x: &[Sample]) -> Vec<Complex64> {
    let n = x.len();
    if n == 0 {
        return Vec::new();
    }

    let mut planner = FftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(n);
    let inverse = planner.plan_fft_inverse(n);

    let mut buf: Vec<Complex64> = x.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    forward.process(&mut buf);

    let half = n / 2;
    for (k, c) in buf.iter_mut().enumerate() {
        let gain = if k == 0 || (n % 2 == 0 && k == half) {
            1.0
        } else if k <= half {
            2.0
        } else {
            0.0
        };
        *c *= gain;
    }

    inverse.process(&mut buf);
    let scale = 1.0 / n as f64;
    buf.iter().map(|c| c * scale).collect()
}

/// Remove 2π jumps from a wrapped phase sequence.
fn unwrap_phase(wrapped: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(wrapped.len());
    let mut offset = 0.0;
    for (i, &p) in wrapped.iter().enumerate() {
        if i > 0 {
            let delta = p - wrapped[i - 1];
            if delta > PI {
                offset -= 2.0 * PI;
            } else if delta < -PI {
                offset += 2.0 * PI;
            }
        }
        out.push(p + offset);
    }
    out
}

/// Central differences, one-sided at the ends.
fn gradient(y: &[f64]) -> Vec<f64> {
    let n = y.len();
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..n)
            .map(|i| match i {
                0 => y[1] - y[0],
                i if i == n - 1 => y[n - 1] - y[n - 2],
                _ => (y[i + 1] - y[i - 1]) / 2.0,
            })
            .collect(),
    }
}

/// Instantaneous amplitude, phase and frequency of `imf`.
pub fn instantaneous_attributes(imf: &[Sample], sample_rate: f64) -> InstantaneousAttributes {
    let analytic = analytic_signal(imf);
    let amplitude = analytic.iter().map(|c| c.norm()).collect();
    let wrapped: Vec<f64> = analytic.iter().map(|c| c.arg()).collect();
    let phase = unwrap_phase(&wrapped);
    let frequency = gradient(&phase)
        .into_iter()
        .map(|dp| dp * sample_rate / (2.0 * PI))
        .collect();

    InstantaneousAttributes {
        amplitude,
        phase,
        frequency,
    }
}

/// Instantaneous attributes of every IMF, in extraction order.
pub fn hilbert_spectrum(decomposition: &Decomposition, sample_rate: f64) -> Vec<InstantaneousAttributes> {
    decomposition
        .imfs
        .iter()
        .map(|imf| instantaneous_attributes(imf, sample_rate))
        .collect()
}
