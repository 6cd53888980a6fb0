//! Sifting Observers
//!
//! Per-iteration diagnostics are handed to an observer instead of being
//! plotted or printed inline, so visualization stays outside the algorithm.
//!
//! ```rust
//! use sift_core::observe::RecordingObserver;
//! use sift_core::{Emd, EmdConfig};
//!
//! let signal: Vec<f64> = (0..512)
//!     .map(|i| (2.0 * std::f64::consts::PI * 8.0 * i as f64 / 512.0).sin())
//!     .collect();
//!
//! let emd = Emd::new(EmdConfig::default()).unwrap();
//! let mut recorder = RecordingObserver::default();
//! let result = emd.decompose_observed(&signal, &mut recorder).unwrap();
//!
//! assert_eq!(recorder.imfs.len(), result.imfs.len());
//! ```

use serde::{Deserialize, Serialize};

use crate::classify::Verdict;
use crate::types::Sample;

/// Snapshot of one sifting round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiftIteration {
    /// Zero-based index of the IMF being extracted
    pub imf_index: usize,
    /// Zero-based sifting round
    pub iteration: usize,
    /// Candidate before this round's subtraction
    pub candidate: Vec<Sample>,
    /// Mean envelope returned by the classifier
    pub mean_envelope: Vec<Sample>,
    pub verdict: Verdict,
    pub asymmetry: Option<f64>,
}

/// Why the outer loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The residue had fewer than two extrema
    InsufficientExtrema,
    /// The configured stoppage criterion was met
    StoppageCriterion,
    /// `max_decompositions` IMFs were extracted
    MaxDecompositions,
}

/// Receives diagnostics while a decomposition runs.
///
/// Every method has an empty default, so implementors only override what
/// they need.
pub trait SiftObserver {
    fn on_iteration(&mut self, _step: &SiftIteration) {}

    fn on_imf(&mut self, _index: usize, _imf: &[Sample]) {}

    fn on_finish(&mut self, _reason: StopReason, _residue: &[Sample]) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SiftObserver for NoopObserver {}

/// Observer that keeps every snapshot in memory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordingObserver {
    pub iterations: Vec<SiftIteration>,
    pub imfs: Vec<Vec<Sample>>,
    pub stop_reason: Option<StopReason>,
}

impl RecordingObserver {
    /// Rounds spent on the IMF at `imf_index`
    pub fn iterations_for(&self, imf_index: usize) -> usize {
        self.iterations
            .iter()
            .filter(|s| s.imf_index == imf_index)
            .count()
    }
}

impl SiftObserver for RecordingObserver {
    fn on_iteration(&mut self, step: &SiftIteration) {
        self.iterations.push(step.clone());
    }

    fn on_imf(&mut self, _index: usize, imf: &[Sample]) {
        self.imfs.push(imf.to_vec());
    }

    fn on_finish(&mut self, reason: StopReason, _residue: &[Sample]) {
        self.stop_reason = Some(reason);
    }
}
