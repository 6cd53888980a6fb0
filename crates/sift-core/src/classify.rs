//! IMF Acceptance Test
//!
//! Decides whether a candidate is an Intrinsic Mode Function and returns the
//! mean envelope the sifter subtracts when it is not.
//!
//! ## Conditions
//!
//! | Condition            | Holds when                                        | Fault                     |
//! |----------------------|---------------------------------------------------|---------------------------|
//! | no riding wave       | every maximum ≥ 0 and every minimum ≤ 0           | `riding_wave`             |
//! | extrema/zero balance | `|#extrema - #zero crossings| ≤ 1`                 | `zero_crossing_imbalance` |
//! | local symmetry       | `std(mean envelope) / std(candidate) < tolerance` | `asymmetry_too_high`      |
//!
//! Before any condition is checked, a candidate with fewer than three maxima
//! or three minima cannot carry envelopes:
//!
//! - fewer than two extrema in total → [`Verdict::InsufficientExtrema`]
//!   (nothing more can be extracted from this residue);
//! - otherwise → [`Verdict::MaxPeriodReached`] (the candidate is the
//!   longest-period IMF and is taken as-is).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::EmdConfig;
use crate::envelope::build_envelope;
use crate::extrema::find_extrema;
use crate::stats;
use crate::types::{EmdResult, Sample};
use crate::zero_crossing::find_zero_crossings;

/// Minimum maxima and minima for envelope construction
pub const MIN_EXTREMA_PER_ENVELOPE: usize = 3;

/// Failed IMF conditions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faults {
    pub asymmetry_too_high: bool,
    pub zero_crossing_imbalance: bool,
    pub riding_wave: bool,
}

impl Faults {
    /// No condition failed
    pub fn is_empty(&self) -> bool {
        !(self.asymmetry_too_high || self.zero_crossing_imbalance || self.riding_wave)
    }

    /// Number of failed conditions
    pub fn count(&self) -> usize {
        [self.asymmetry_too_high, self.zero_crossing_imbalance, self.riding_wave]
            .iter()
            .filter(|&&f| f)
            .count()
    }
}

impl fmt::Display for Faults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [
            (self.asymmetry_too_high, "asymmetry too high"),
            (self.zero_crossing_imbalance, "zero-crossing imbalance"),
            (self.riding_wave, "riding wave"),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, name)| *name)
        .collect();

        if names.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", names.join("; "))
        }
    }
}

/// Outcome of the acceptance test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// All three conditions hold
    Accepted,
    /// Too few extrema for envelopes; the candidate is taken as the final IMF
    MaxPeriodReached,
    /// Fewer than two extrema; no IMF can be extracted
    InsufficientExtrema,
    /// At least one condition failed
    Rejected(Faults),
}

impl Verdict {
    /// Whether the candidate should be emitted as an IMF
    pub fn is_imf(&self) -> bool {
        matches!(self, Verdict::Accepted | Verdict::MaxPeriodReached)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Accepted => write!(f, "accepted"),
            Verdict::MaxPeriodReached => write!(f, "max period reached"),
            Verdict::InsufficientExtrema => write!(f, "insufficient extrema"),
            Verdict::Rejected(faults) => write!(f, "rejected: {}", faults),
        }
    }
}

/// Result of classifying one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub verdict: Verdict,
    /// Mean envelope, or the candidate itself on the degenerate paths
    pub mean_envelope: Vec<Sample>,
    /// `std(mean) / std(candidate)`, absent on the degenerate paths
    pub asymmetry: Option<f64>,
    pub extrema_count: usize,
    pub zero_crossing_count: Option<usize>,
}

/// Asymmetry degree; a constant candidate counts as perfectly symmetric.
fn asymmetry_degree(mean_envelope: &[Sample], candidate: &[Sample]) -> f64 {
    let denom = stats::std_dev(candidate);
    if denom == 0.0 {
        return 0.0;
    }
    stats::std_dev(mean_envelope) / denom
}

/// Test `candidate` against the IMF conditions.
pub fn classify(candidate: &[Sample], config: &EmdConfig) -> EmdResult<Classification> {
    let extrema = find_extrema(candidate, config.neighbor_window, config.extremum_threshold);
    let extrema_count = extrema.count();

    if extrema.maxima.len() < MIN_EXTREMA_PER_ENVELOPE
        || extrema.minima.len() < MIN_EXTREMA_PER_ENVELOPE
    {
        let verdict = if extrema_count < 2 {
            Verdict::InsufficientExtrema
        } else {
            Verdict::MaxPeriodReached
        };
        return Ok(Classification {
            verdict,
            mean_envelope: candidate.to_vec(),
            asymmetry: None,
            extrema_count,
            zero_crossing_count: None,
        });
    }

    let mut faults = Faults::default();

    faults.riding_wave = extrema.maxima.iter().any(|&i| candidate[i] < 0.0)
        || extrema.minima.iter().any(|&i| candidate[i] > 0.0);

    let zero_crossings =
        find_zero_crossings(candidate, config.neighbor_window, config.zero_threshold).len();
    faults.zero_crossing_imbalance = extrema_count.abs_diff(zero_crossings) > 1;

    let envelope = build_envelope(candidate, &extrema, config.extend_ends)?;
    let asymmetry = asymmetry_degree(&envelope.mean, candidate);
    faults.asymmetry_too_high = !(asymmetry < config.asymmetry_tolerance);

    let verdict = if faults.is_empty() {
        Verdict::Accepted
    } else {
        Verdict::Rejected(faults)
    };

    Ok(Classification {
        verdict,
        mean_envelope: envelope.mean,
        asymmetry: Some(asymmetry),
        extrema_count,
        zero_crossing_count: Some(zero_crossings),
    })
}
