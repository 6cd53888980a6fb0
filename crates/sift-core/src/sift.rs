//! Sifting: Extracting One IMF
//!
//! Sifting repeatedly classifies the candidate and subtracts its mean
//! envelope until the candidate qualifies as an IMF:
//!
//! ```text
//!               ┌──────────────────────────────┐
//!               ▼                              │ Rejected(faults)
//!   data ──► candidate ──► classify ──┬────────┴─► candidate - mean
//!                                     │
//!                                     ├─ Accepted / MaxPeriodReached ──► IMF
//!                                     └─ InsufficientExtrema ──────────► none
//! ```
//!
//! Each round is a pure step from one [`SiftState`] to a [`SiftStep`]; the
//! [`Sifter`] folds at most `sift_iterations` of them. If the budget runs out
//! the last candidate is returned as a best-effort IMF.

use tracing::{debug, trace};

use crate::classify::{classify, Classification, Verdict};
use crate::config::EmdConfig;
use crate::observe::{NoopObserver, SiftIteration, SiftObserver};
use crate::stats;
use crate::types::{EmdResult, Sample};

/// Candidate being refined, plus the round it is in
#[derive(Debug, Clone, PartialEq)]
pub struct SiftState {
    pub candidate: Vec<Sample>,
    pub iteration: usize,
}

/// Outcome of one sifting round
#[derive(Debug, Clone, PartialEq)]
pub enum SiftStep {
    /// Not yet an IMF; continue from this state
    Continue(SiftState),
    /// The candidate qualifies
    Imf(Vec<Sample>),
    /// No IMF can be extracted
    Exhausted,
}

impl SiftState {
    /// Initial state: the input unchanged
    pub fn new(data: &[Sample]) -> Self {
        Self {
            candidate: data.to_vec(),
            iteration: 0,
        }
    }

    /// Run one round, returning the classification alongside the step.
    pub fn step(self, config: &EmdConfig) -> EmdResult<(SiftStep, Classification)> {
        let class = classify(&self.candidate, config)?;
        trace!(
            iteration = self.iteration,
            verdict = %class.verdict,
            asymmetry = ?class.asymmetry,
            "sift round"
        );

        let step = match class.verdict {
            Verdict::Accepted | Verdict::MaxPeriodReached => SiftStep::Imf(self.candidate),
            Verdict::InsufficientExtrema => SiftStep::Exhausted,
            Verdict::Rejected(_) => SiftStep::Continue(SiftState {
                candidate: stats::subtract(&self.candidate, &class.mean_envelope),
                iteration: self.iteration + 1,
            }),
        };
        Ok((step, class))
    }
}

/// Extracts single IMFs under a fixed configuration
#[derive(Debug, Clone)]
pub struct Sifter<'a> {
    config: &'a EmdConfig,
}

impl<'a> Sifter<'a> {
    pub fn new(config: &'a EmdConfig) -> Self {
        Self { config }
    }

    /// Extract one IMF from `data`, or `None` when it has too few extrema.
    pub fn extract_imf(&self, data: &[Sample]) -> EmdResult<Option<Vec<Sample>>> {
        self.extract_imf_observed(data, 0, &mut NoopObserver)
    }

    /// As [`Sifter::extract_imf`], reporting each round to `observer`.
    pub fn extract_imf_observed(
        &self,
        data: &[Sample],
        imf_index: usize,
        observer: &mut dyn SiftObserver,
    ) -> EmdResult<Option<Vec<Sample>>> {
        let mut state = SiftState::new(data);

        for iteration in 0..self.config.sift_iterations {
            let candidate = state.candidate.clone();
            let (step, class) = state.step(self.config)?;

            observer.on_iteration(&SiftIteration {
                imf_index,
                iteration,
                candidate,
                mean_envelope: class.mean_envelope,
                verdict: class.verdict,
                asymmetry: class.asymmetry,
            });

            state = match step {
                SiftStep::Imf(imf) => return Ok(Some(imf)),
                SiftStep::Exhausted => return Ok(None),
                SiftStep::Continue(next) => next,
            };
        }

        debug!(
            imf_index,
            iterations = self.config.sift_iterations,
            "sifting did not converge, returning best-effort IMF"
        );
        Ok(Some(state.candidate))
    }
}
