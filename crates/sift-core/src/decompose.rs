//! Empirical Mode Decomposition
//!
//! The outer loop peels IMFs off the running residue, highest frequency
//! first, until the residue has no more oscillation to give, the stoppage
//! criterion is met, or `max_decompositions` IMFs have been extracted.
//!
//! ```text
//!   residue₀ = x
//!   residueₖ₊₁ = residueₖ - IMFₖ
//!
//!   x = IMF₀ + IMF₁ + … + IMFₖ + residue      (checked within error_limit)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sift_core::{Emd, EmdConfig};
//!
//! let signal: Vec<f64> = (0..1024)
//!     .map(|i| {
//!         let t = i as f64 / 256.0;
//!         (2.0 * std::f64::consts::PI * 16.0 * t).sin()
//!             + (2.0 * std::f64::consts::PI * t).sin()
//!     })
//!     .collect();
//!
//! let emd = Emd::new(EmdConfig::default()).unwrap();
//! let result = emd.decompose(&signal).unwrap();
//! assert_eq!(result.imfs.len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EmdConfig;
use crate::observe::{NoopObserver, SiftObserver, StopReason};
use crate::sift::Sifter;
use crate::signal::Signal;
use crate::stats;
use crate::types::{validate_samples, EmdError, EmdResult, Sample};

/// IMFs in extraction order plus the final residue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    pub imfs: Vec<Vec<Sample>>,
    pub residue: Vec<Sample>,
}

impl Decomposition {
    /// Number of extracted IMFs
    pub fn imf_count(&self) -> usize {
        self.imfs.len()
    }

    /// Pointwise `sum(imfs) + residue`
    pub fn reconstruct(&self) -> Vec<Sample> {
        let mut out = self.residue.clone();
        for imf in &self.imfs {
            for (o, v) in out.iter_mut().zip(imf.iter()) {
                *o += v;
            }
        }
        out
    }

    /// Largest absolute deviation of the reconstruction from `original`
    pub fn reconstruction_error(&self, original: &[Sample]) -> f64 {
        let rebuilt = self.reconstruct();
        stats::max_abs(&stats::subtract(&rebuilt, original))
    }

    /// Require the reconstruction error to be strictly below `limit`.
    pub fn check_reconstruction(&self, original: &[Sample], limit: f64) -> EmdResult<f64> {
        let max_error = self.reconstruction_error(original);
        if !(max_error < limit) {
            warn!(max_error, limit, "reconstruction mismatch");
            return Err(EmdError::ReconstructionMismatch { max_error, limit });
        }
        Ok(max_error)
    }
}

/// Loop state of the outer decomposition
#[derive(Debug, Clone, PartialEq)]
pub struct DecomposeState {
    pub imfs: Vec<Vec<Sample>>,
    pub residue: Vec<Sample>,
}

/// Outcome of one outer step
#[derive(Debug, Clone, PartialEq)]
pub enum DecomposeStep {
    /// An IMF was extracted and the loop may continue
    Continue(DecomposeState),
    /// The loop is over
    Done(DecomposeState, StopReason),
}

impl DecomposeState {
    pub fn new(data: &[Sample]) -> Self {
        Self {
            imfs: Vec::new(),
            residue: data.to_vec(),
        }
    }

    /// Extract one IMF from the residue and evaluate the stoppage criterion.
    pub fn step(
        mut self,
        original: &[Sample],
        config: &EmdConfig,
        observer: &mut dyn SiftObserver,
    ) -> EmdResult<DecomposeStep> {
        let index = self.imfs.len();
        let imf = match Sifter::new(config).extract_imf_observed(&self.residue, index, observer)? {
            Some(imf) => imf,
            None => return Ok(DecomposeStep::Done(self, StopReason::InsufficientExtrema)),
        };

        self.residue = stats::subtract(&self.residue, &imf);
        observer.on_imf(index, &imf);
        debug!(
            imf_index = index,
            peak = stats::max_abs(&imf),
            residue_peak = stats::max_abs(&self.residue),
            "extracted IMF"
        );
        self.imfs.push(imf);

        if config.stoppage_criterion.is_satisfied(original, &self.residue) {
            return Ok(DecomposeStep::Done(self, StopReason::StoppageCriterion));
        }
        Ok(DecomposeStep::Continue(self))
    }
}

/// Empirical Mode Decomposition with a validated configuration
#[derive(Debug, Clone)]
pub struct Emd {
    config: EmdConfig,
}

impl Emd {
    /// Validate `config` and build a decomposer.
    pub fn new(config: EmdConfig) -> EmdResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EmdConfig {
        &self.config
    }

    /// Decompose `data` into IMFs and a residue.
    pub fn decompose(&self, data: &[Sample]) -> EmdResult<Decomposition> {
        self.decompose_observed(data, &mut NoopObserver)
    }

    /// Decompose the samples of a [`Signal`]; timing metadata is not used.
    pub fn decompose_signal(&self, signal: &Signal) -> EmdResult<Decomposition> {
        self.decompose(signal.data())
    }

    /// As [`Emd::decompose`], reporting progress to `observer`.
    pub fn decompose_observed(
        &self,
        data: &[Sample],
        observer: &mut dyn SiftObserver,
    ) -> EmdResult<Decomposition> {
        validate_samples(data)?;

        let mut state = DecomposeState::new(data);
        let mut reason = StopReason::MaxDecompositions;

        for _ in 0..self.config.max_decompositions {
            state = match state.step(data, &self.config, observer)? {
                DecomposeStep::Continue(next) => next,
                DecomposeStep::Done(last, why) => {
                    reason = why;
                    last
                }
            };
            if reason != StopReason::MaxDecompositions {
                break;
            }
        }

        debug!(imfs = state.imfs.len(), reason = ?reason, "decomposition finished");
        observer.on_finish(reason, &state.residue);

        let result = Decomposition {
            imfs: state.imfs,
            residue: state.residue,
        };

        result.check_reconstruction(data, self.config.error_limit)?;
        Ok(result)
    }
}

/// Decompose `data` with `config` in one call.
pub fn emd(data: &[Sample], config: &EmdConfig) -> EmdResult<Decomposition> {
    Emd::new(config.clone())?.decompose(data)
}
