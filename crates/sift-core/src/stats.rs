//! Summary statistics over sample sequences
//!
//! The standard deviation is the population form (divide by N), which is
//! what the asymmetry ratio and the c2/c3 stoppage criteria are defined on.

use crate::types::Sample;

/// Arithmetic mean (0 for an empty slice).
pub fn mean(data: &[Sample]) -> Sample {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<Sample>() / data.len() as Sample
}

/// Population standard deviation (0 for an empty slice).
pub fn std_dev(data: &[Sample]) -> Sample {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    let var = data.iter().map(|x| (x - m).powi(2)).sum::<Sample>() / data.len() as Sample;
    var.sqrt()
}

/// Largest absolute value (0 for an empty slice).
pub fn max_abs(data: &[Sample]) -> Sample {
    data.iter().fold(0.0, |acc: Sample, x| acc.max(x.abs()))
}

/// Pointwise difference `a - b` into a new buffer.
pub fn subtract(a: &[Sample], b: &[Sample]) -> Vec<Sample> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(x, y)| x - y).collect()
}
