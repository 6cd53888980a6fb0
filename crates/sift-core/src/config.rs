//! Decomposition Parameters and Configuration
//!
//! This module defines every tunable of the decomposition and validates them
//! once, before any numerical work starts.
//!
//! ## Understanding the Parameters
//!
//! | Parameter             | Default | Stage          | Meaning                                        |
//! |-----------------------|---------|----------------|------------------------------------------------|
//! | `asymmetry_tolerance` | 0.08    | classifier     | max `std(mean envelope) / std(candidate)`      |
//! | `sift_iterations`     | 10      | sifter         | rounds before a best-effort IMF is returned    |
//! | `stoppage_criterion`  | c1      | decomposer     | global rule ending the outer loop              |
//! | `neighbor_window`     | 5       | extrema/zeros  | `order = window / 2` neighbours on each side   |
//! | `zero_threshold`      | 1e-6    | zero crossings | minimum local change for a crossing to count   |
//! | `extremum_threshold`  | 1e-7    | extrema        | minimum local change for an extremum to count  |
//! | `extend_ends`         | false   | envelopes      | pin both envelopes to the first/last samples   |
//! | `error_limit`         | 1e-6    | decomposer     | reconstruction tolerance                       |
//! | `max_decompositions`  | 5       | decomposer     | upper bound on extracted IMFs                  |
//!
//! ### Stoppage Criteria
//!
//! - **c1**: `max|residue| < 1% of max|input|`
//! - **c2**: `std(residue) < 1% of std(input)`
//! - **c3**: `std(residue) < 1e-6`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::stats;
use crate::types::{EmdError, EmdResult, Sample};

/// Global rule deciding when the outer decomposition loop halts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StoppageCriterion {
    /// Peak residue below 1% of the input peak
    #[default]
    C1,
    /// Residue standard deviation below 1% of the input's
    C2,
    /// Residue standard deviation below an absolute 1e-6
    C3,
}

impl StoppageCriterion {
    /// Absolute floor used by [`StoppageCriterion::C3`]
    pub const ABSOLUTE_STD_FLOOR: Sample = 1e-6;

    /// Ratio used by [`StoppageCriterion::C1`] and [`StoppageCriterion::C2`]
    pub const RELATIVE_RATIO: Sample = 1e-2;

    /// Short name as used in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            Self::C1 => "c1",
            Self::C2 => "c2",
            Self::C3 => "c3",
        }
    }

    /// Evaluate the criterion against the original input and current residue.
    pub fn is_satisfied(&self, original: &[Sample], residue: &[Sample]) -> bool {
        match self {
            Self::C1 => stats::max_abs(residue) < stats::max_abs(original) * Self::RELATIVE_RATIO,
            Self::C2 => stats::std_dev(residue) < Self::RELATIVE_RATIO * stats::std_dev(original),
            Self::C3 => stats::std_dev(residue) < Self::ABSOLUTE_STD_FLOOR,
        }
    }
}

impl fmt::Display for StoppageCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for StoppageCriterion {
    type Err = EmdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c1" => Ok(Self::C1),
            "c2" => Ok(Self::C2),
            "c3" => Ok(Self::C3),
            other => Err(EmdError::config(format!(
                "unknown stoppage criterion '{}' (expected c1, c2 or c3)",
                other
            ))),
        }
    }
}

impl TryFrom<String> for StoppageCriterion {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse().map_err(|e: EmdError| e.to_string())
    }
}

impl From<StoppageCriterion> for String {
    fn from(value: StoppageCriterion) -> Self {
        value.name().to_string()
    }
}

/// Complete decomposition configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmdConfig {
    /// Maximum asymmetry degree for a candidate to count as an IMF
    pub asymmetry_tolerance: f64,
    /// Sifting rounds per IMF before returning a best-effort result
    pub sift_iterations: usize,
    /// Outer loop stoppage rule
    pub stoppage_criterion: StoppageCriterion,
    /// Neighbourhood width for extremum and zero-crossing search
    pub neighbor_window: usize,
    /// Noise threshold for zero crossings
    pub zero_threshold: f64,
    /// Noise threshold for extrema
    pub extremum_threshold: f64,
    /// Anchor envelopes at the first and last samples
    pub extend_ends: bool,
    /// Reconstruction tolerance
    pub error_limit: f64,
    /// Maximum number of IMFs to extract
    pub max_decompositions: usize,
}

impl Default for EmdConfig {
    fn default() -> Self {
        Self {
            asymmetry_tolerance: 0.08,
            sift_iterations: 10,
            stoppage_criterion: StoppageCriterion::C1,
            neighbor_window: 5,
            zero_threshold: 1e-6,
            extremum_threshold: 1e-7,
            extend_ends: false,
            error_limit: 1e-6,
            max_decompositions: 5,
        }
    }
}

impl EmdConfig {
    /// Create a new builder starting from the defaults
    pub fn builder() -> EmdConfigBuilder {
        EmdConfigBuilder::default()
    }

    /// Parse a JSON document; missing fields take their defaults.
    ///
    /// Malformed JSON is a [`EmdError::ConfigParse`]; well-formed JSON with an
    /// unknown criterion or out-of-range value is an
    /// [`EmdError::InvalidConfiguration`].
    pub fn from_json(json: &str) -> EmdResult<Self> {
        let config: EmdConfig = serde_json::from_str(json).map_err(|e| {
            if e.is_data() {
                EmdError::config(e.to_string())
            } else {
                EmdError::ConfigParse(e.to_string())
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter; returns the first violation.
    pub fn validate(&self) -> EmdResult<()> {
        if !(self.asymmetry_tolerance.is_finite() && self.asymmetry_tolerance > 0.0) {
            return Err(EmdError::config(format!(
                "asymmetry_tolerance must be positive and finite, got {}",
                self.asymmetry_tolerance
            )));
        }
        if self.sift_iterations == 0 {
            return Err(EmdError::config("sift_iterations must be at least 1"));
        }
        if self.neighbor_window < 2 {
            return Err(EmdError::config(format!(
                "neighbor_window must be at least 2, got {}",
                self.neighbor_window
            )));
        }
        for (name, value) in [
            ("zero_threshold", self.zero_threshold),
            ("extremum_threshold", self.extremum_threshold),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(EmdError::config(format!(
                    "{} must be non-negative and finite, got {}",
                    name, value
                )));
            }
        }
        if !(self.error_limit.is_finite() && self.error_limit > 0.0) {
            return Err(EmdError::config(format!(
                "error_limit must be positive and finite, got {}",
                self.error_limit
            )));
        }
        if self.max_decompositions == 0 {
            return Err(EmdError::config("max_decompositions must be at least 1"));
        }
        Ok(())
    }
}

/// Builder for EmdConfig
#[derive(Debug, Default)]
pub struct EmdConfigBuilder {
    config: EmdConfig,
    criterion_error: Option<EmdError>,
}

impl EmdConfigBuilder {
    pub fn asymmetry_tolerance(mut self, tolerance: f64) -> Self {
        self.config.asymmetry_tolerance = tolerance;
        self
    }

    pub fn sift_iterations(mut self, iterations: usize) -> Self {
        self.config.sift_iterations = iterations;
        self
    }

    pub fn stoppage_criterion(mut self, criterion: StoppageCriterion) -> Self {
        self.config.stoppage_criterion = criterion;
        self.criterion_error = None;
        self
    }

    /// Select a stoppage criterion by name; an unknown name fails `build()`.
    pub fn stoppage_criterion_name(mut self, name: &str) -> Self {
        match name.parse() {
            Ok(criterion) => {
                self.config.stoppage_criterion = criterion;
                self.criterion_error = None;
            }
            Err(e) => self.criterion_error = Some(e),
        }
        self
    }

    pub fn neighbor_window(mut self, window: usize) -> Self {
        self.config.neighbor_window = window;
        self
    }

    pub fn zero_threshold(mut self, threshold: f64) -> Self {
        self.config.zero_threshold = threshold;
        self
    }

    pub fn extremum_threshold(mut self, threshold: f64) -> Self {
        self.config.extremum_threshold = threshold;
        self
    }

    pub fn extend_ends(mut self, enabled: bool) -> Self {
        self.config.extend_ends = enabled;
        self
    }

    pub fn error_limit(mut self, limit: f64) -> Self {
        self.config.error_limit = limit;
        self
    }

    pub fn max_decompositions(mut self, max: usize) -> Self {
        self.config.max_decompositions = max;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> EmdResult<EmdConfig> {
        if let Some(err) = self.criterion_error {
            return Err(err);
        }
        self.config.validate()?;
        Ok(self.config)
    }
}
