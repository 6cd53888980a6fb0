//! Zero-Crossing Detection
//!
//! A crossing is reported at the left index of every adjacent pair whose
//! signs differ, then filtered by the local change over `order` samples.
//!
//! Interior samples that are exactly zero are nudged to a tiny positive
//! value first, so a sampled zero ends one sign interval without also
//! starting the next one:
//!
//! ```text
//!   +  +  0  -  -        raw signs:    + + 0 - -   → two changes
//!   +  +  ε  -  -        after nudge:  + + + - -   → one change
//! ```
//!
//! The first and last samples are never nudged.

use crate::types::Sample;

/// Replacement for interior samples that are exactly zero.
const ZERO_NUDGE: Sample = 1e-10;

fn sign(x: Sample) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Find zero crossings of `data`.
///
/// The filter compares `data[idx]` against `data[idx - order]`, with
/// `order = neighbor_window / 2`. For `idx < order` the reference index
/// wraps around to the end of the sequence, `data[n - order + idx]`.
pub fn find_zero_crossings(
    data: &[Sample],
    neighbor_window: usize,
    zero_threshold: f64,
) -> Vec<usize> {
    let n = data.len();
    if n < 2 {
        return Vec::new();
    }
    let order = neighbor_window / 2;
    let last = n - 1;
    let reference = |i: usize| (i + n - order % n) % n;

    let signs: Vec<i8> = data
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            if x == 0.0 && i != 0 && i != last {
                sign(ZERO_NUDGE)
            } else {
                sign(x)
            }
        })
        .collect();

    signs
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0] != pair[1])
        .map(|(i, _)| i)
        .filter(|&i| (data[i] - data[reference(i)]).abs() > zero_threshold)
        .collect()
}
