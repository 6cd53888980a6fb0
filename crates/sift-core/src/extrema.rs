//! Local Extremum Detection
//!
//! Finds local maxima and minima with a neighbourhood comparison followed by
//! an amplitude filter that suppresses extrema produced by jitter riding on a
//! near-flat segment.
//!
//! ## Algorithm
//!
//! With `order = neighbor_window / 2`, index `i` is a candidate maximum when
//!
//! ```text
//! x[i] > x[j]   for every j in [i - order, i + order], j != i
//! ```
//!
//! (strictly less for a minimum). Indices closer than `order` to either end
//! lack a full neighbourhood and are never candidates. A candidate survives
//! only if `|x[i] - x[i - order]| > threshold`.
//!
//! ```text
//!        order   order
//!       ◄────► ◄────►
//!    ·  ·  ·  ▲  ·  ·  ·      ▲ = candidate maximum
//!             i
//! ```

use serde::{Deserialize, Serialize};

use crate::types::Sample;

/// Indices of filtered local extrema, each list strictly ascending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extrema {
    /// Local maxima
    pub maxima: Vec<usize>,
    /// Local minima
    pub minima: Vec<usize>,
}

impl Extrema {
    /// Total number of extrema
    pub fn count(&self) -> usize {
        self.maxima.len() + self.minima.len()
    }

    /// Whether no extremum survived filtering
    pub fn is_empty(&self) -> bool {
        self.maxima.is_empty() && self.minima.is_empty()
    }
}

/// Find local maxima and minima of `data`.
///
/// `neighbor_window / 2` samples are compared on each side; the
/// `amp_threshold` filter drops candidates whose change over that distance
/// is too small.
pub fn find_extrema(data: &[Sample], neighbor_window: usize, amp_threshold: f64) -> Extrema {
    let order = neighbor_window / 2;
    let n = data.len();
    let mut extrema = Extrema::default();

    if order == 0 || n < 2 * order + 1 {
        return extrema;
    }

    for i in order..n - order {
        let x = data[i];
        let neighbours = data[i - order..i].iter().chain(&data[i + 1..=i + order]);

        let (is_max, is_min) = neighbours.fold((true, true), |(max, min), &y| {
            (max && x > y, min && x < y)
        });

        if !(is_max || is_min) {
            continue;
        }
        if (x - data[i - order]).abs() <= amp_threshold {
            continue;
        }
        if is_max {
            extrema.maxima.push(i);
        } else {
            extrema.minima.push(i);
        }
    }

    extrema
}
