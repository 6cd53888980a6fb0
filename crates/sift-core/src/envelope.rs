//! Upper, Lower and Mean Envelopes
//!
//! ```text
//!   upper  ─── spline through maxima ───
//!   data     /\    /\      /\    /\
//!           /  \  /  \    /  \  /  \
//!   mean   ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─   (upper + lower) / 2
//!                \/    \/      \/
//!   lower  ─── spline through minima ───
//! ```
//!
//! With `extend_ends`, the first and last samples are added as knots to both
//! envelopes so the splines are pinned at the boundaries instead of
//! extrapolating past the outermost extrema.

use serde::{Deserialize, Serialize};

use crate::extrema::Extrema;
use crate::spline;
use crate::types::{EmdResult, Sample};

/// Envelope pair and their pointwise mean, each of the input's length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub upper: Vec<Sample>,
    pub lower: Vec<Sample>,
    pub mean: Vec<Sample>,
}

/// Insert the first and last index if not already present at the ends.
fn with_end_anchors(indices: &[usize], n: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(indices.len() + 2);
    if indices.first() != Some(&0) {
        out.push(0);
    }
    out.extend_from_slice(indices);
    if n > 0 && out.last() != Some(&(n - 1)) {
        out.push(n - 1);
    }
    out
}

fn spline_through(data: &[Sample], indices: &[usize]) -> EmdResult<Vec<Sample>> {
    let x: Vec<f64> = indices.iter().map(|&i| i as f64).collect();
    let y: Vec<f64> = indices.iter().map(|&i| data[i]).collect();
    spline::interpolate(&x, &y, data.len())
}

/// Build the envelopes of `data` from its extrema.
///
/// Needs at least three knots per envelope after end anchoring; the
/// classifier guarantees this before calling.
pub fn build_envelope(data: &[Sample], extrema: &Extrema, extend_ends: bool) -> EmdResult<Envelope> {
    let n = data.len();
    let (maxima, minima) = if extend_ends {
        (
            with_end_anchors(&extrema.maxima, n),
            with_end_anchors(&extrema.minima, n),
        )
    } else {
        (extrema.maxima.clone(), extrema.minima.clone())
    };

    let upper = spline_through(data, &maxima)?;
    let lower = spline_through(data, &minima)?;
    let mean = upper
        .iter()
        .zip(lower.iter())
        .map(|(u, l)| (u + l) / 2.0)
        .collect();

    Ok(Envelope { upper, lower, mean })
}
