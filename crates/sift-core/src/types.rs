//! Core types for Empirical Mode Decomposition
//!
//! This module defines the sample type shared by every stage of the
//! decomposition and the crate-wide error type.
//!
//! ## Error Taxonomy
//!
//! ```text
//!   configuration ──► InvalidConfiguration / ConfigParse   (fail fast, no work done)
//!   input         ──► EmptyInput / NonFiniteSample         (fail fast, no work done)
//!   arithmetic    ──► ReconstructionMismatch               (fatal, carries magnitude)
//!   spline        ──► TooFewKnots / SingularSpline         (guarded by the classifier)
//!   signal        ──► InvalidSignal / Resample
//! ```
//!
//! Running out of extrema is not an error: it ends the decomposition early
//! and is reported through `Verdict::InsufficientExtrema` instead.

/// A real-valued sample
pub type Sample = f64;

/// Result type for EMD operations
pub type EmdResult<T> = Result<T, EmdError>;

/// Errors that can occur during decomposition
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EmdError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),

    #[error("Input sequence is empty")]
    EmptyInput,

    #[error("Non-finite sample at index {index}: {value}")]
    NonFiniteSample { index: usize, value: f64 },

    #[error(
        "Reconstruction mismatch: max |sum(IMFs) + residue - input| = {max_error:e}, limit {limit:e}"
    )]
    ReconstructionMismatch { max_error: f64, limit: f64 },

    #[error("Too few spline knots: got {got}, need at least {min}")]
    TooFewKnots { got: usize, min: usize },

    #[error("Spline system is singular (knots must be strictly ascending)")]
    SingularSpline,

    #[error("Invalid signal: {0}")]
    InvalidSignal(String),

    #[error("Resampling failed: {0}")]
    Resample(String),
}

impl EmdError {
    /// Create a configuration error with a custom message
    pub fn config<S: Into<String>>(msg: S) -> Self {
        EmdError::InvalidConfiguration(msg.into())
    }
}

/// Check that a sample sequence is non-empty and finite.
pub(crate) fn validate_samples(data: &[Sample]) -> EmdResult<()> {
    if data.is_empty() {
        return Err(EmdError::EmptyInput);
    }
    match data.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(EmdError::NonFiniteSample {
            index,
            value: data[index],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EmdError::config("unknown stoppage criterion 'c9'");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: unknown stoppage criterion 'c9'"
        );

        let err = EmdError::ReconstructionMismatch {
            max_error: 2.5e-3,
            limit: 1e-6,
        };
        assert!(err.to_string().contains("2.5e-3"));
    }

    #[test]
    fn test_validate_samples() {
        assert_eq!(validate_samples(&[]), Err(EmdError::EmptyInput));
        assert!(validate_samples(&[1.0, -2.0, 0.0]).is_ok());

        match validate_samples(&[1.0, f64::NAN, 0.0]) {
            Err(EmdError::NonFiniteSample { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected NonFiniteSample, got {:?}", other),
        }
        assert!(matches!(
            validate_samples(&[f64::INFINITY]),
            Err(EmdError::NonFiniteSample { index: 0, .. })
        ));
    }
}
