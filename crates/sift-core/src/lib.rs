//! # Empirical Mode Decomposition
//!
//! This crate decomposes a real-valued, uniformly sampled signal into a
//! small set of Intrinsic Mode Functions (IMFs) plus a residue, such that
//! the sum of all parts reproduces the input.
//!
//! ## Overview
//!
//! EMD is adaptive: the basis is derived from the data itself rather than
//! fixed in advance, which makes it suited to non-linear, non-stationary
//! signals. The pipeline is built from small pieces:
//!
//! - **Extrema & zero crossings**: windowed local-extremum and sign-change detection
//! - **Envelopes**: not-a-knot cubic splines through the maxima and minima
//! - **Classification**: decide whether a candidate is an IMF, and why not
//! - **Sifting**: refine one candidate into an IMF
//! - **Decomposition**: peel IMFs off until a stoppage criterion holds
//! - **Hilbert analysis**: instantaneous amplitude and frequency of each IMF
//!
//! ## Signal Flow
//!
//! ```text
//! data → sift → IMF₁ ─┐
//!   └── residue → sift → IMF₂ ─┐
//!         └── residue → ...     └→ Σ IMFs + residue == data
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sift_core::{Emd, EmdConfig, StoppageCriterion};
//! use std::f64::consts::PI;
//!
//! let data: Vec<f64> = (0..1024)
//!     .map(|i| {
//!         let t = i as f64 / 256.0;
//!         (2.0 * PI * 16.0 * t).sin() + (2.0 * PI * t).sin()
//!     })
//!     .collect();
//!
//! let config = EmdConfig::builder()
//!     .stoppage_criterion(StoppageCriterion::C1)
//!     .build()
//!     .unwrap();
//! let result = Emd::new(config).unwrap().decompose(&data).unwrap();
//!
//! assert!(result.reconstruction_error(&data) < 1e-6);
//! ```

pub mod classify;
pub mod config;
pub mod decompose;
pub mod envelope;
pub mod extrema;
pub mod hilbert;
pub mod observe;
pub mod signal;
pub mod sift;
pub mod spline;
pub mod stats;
pub mod types;
pub mod zero_crossing;

// Re-exports for convenience
pub use classify::{classify, Classification, Faults, Verdict};
pub use config::{EmdConfig, EmdConfigBuilder, StoppageCriterion};
pub use decompose::{emd, Decomposition, Emd};
pub use extrema::{find_extrema, Extrema};
pub use hilbert::{hilbert_spectrum, instantaneous_attributes, InstantaneousAttributes};
pub use signal::{low_smoothing, resample, time_to_frequency_axis, Signal, Spacing};
pub use sift::Sifter;
pub use types::{EmdError, EmdResult, Sample};
pub use zero_crossing::find_zero_crossings;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{EmdConfig, StoppageCriterion};
    pub use crate::decompose::{Decomposition, Emd};
    pub use crate::observe::{RecordingObserver, SiftObserver};
    pub use crate::signal::{Signal, Spacing};
    pub use crate::types::{EmdError, EmdResult, Sample};
}
