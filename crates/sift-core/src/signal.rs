//! Sampled Signal Container
//!
//! Holds uniformly sampled real data together with its sample spacing. The
//! decomposition itself is index-based and only ever reads [`Signal::data`];
//! the timing metadata serves the axes, summaries, resampling and smoothing.
//!
//! ## Spacing
//!
//! A signal of `N` samples is fully described by any one of:
//!
//! ```text
//!   dt  (sample interval)   fs = 1 / dt          T = (N - 1) · dt
//!   fs  (sample rate)       dt = 1 / fs          T = (N - 1) / fs
//!   T   (total duration)    dt = T / (N - 1)     fs = 1 / dt
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{validate_samples, EmdError, EmdResult, Sample};

/// How the sample spacing is specified
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spacing {
    /// Seconds between samples
    Interval(f64),
    /// Samples per second
    Rate(f64),
    /// Seconds from the first to the last sample
    Duration(f64),
}

/// Uniformly sampled real-valued signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    data: Vec<Sample>,
    dt: f64,
}

impl Signal {
    /// Create a signal; needs at least two finite samples and a positive spacing.
    pub fn new(data: Vec<Sample>, spacing: Spacing) -> EmdResult<Self> {
        if data.len() < 2 {
            return Err(EmdError::InvalidSignal(format!(
                "need at least 2 samples, got {}",
                data.len()
            )));
        }
        validate_samples(&data).map_err(|e| EmdError::InvalidSignal(e.to_string()))?;

        let (name, value) = match spacing {
            Spacing::Interval(v) => ("sample interval", v),
            Spacing::Rate(v) => ("sample rate", v),
            Spacing::Duration(v) => ("duration", v),
        };
        if !(value.is_finite() && value > 0.0) {
            return Err(EmdError::InvalidSignal(format!(
                "{} must be positive and finite, got {}",
                name, value
            )));
        }

        let dt = match spacing {
            Spacing::Interval(dt) => dt,
            Spacing::Rate(fs) => 1.0 / fs,
            Spacing::Duration(t) => t / (data.len() - 1) as f64,
        };
        Ok(Self { data, dt })
    }

    /// Create a signal from its sample rate
    pub fn with_sample_rate(data: Vec<Sample>, sample_rate: f64) -> EmdResult<Self> {
        Self::new(data, Spacing::Rate(sample_rate))
    }

    pub fn data(&self) -> &[Sample] {
        &self.data
    }

    pub fn into_data(self) -> Vec<Sample> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Seconds between samples
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Samples per second
    pub fn sample_rate(&self) -> f64 {
        1.0 / self.dt
    }

    /// Seconds from the first to the last sample
    pub fn duration(&self) -> f64 {
        (self.len() - 1) as f64 * self.dt
    }

    /// Spectral bin spacing in Hz
    pub fn frequency_resolution(&self) -> f64 {
        self.sample_rate() / (self.len() - 1) as f64
    }

    /// Highest analysable frequency
    pub fn nyquist(&self) -> f64 {
        self.sample_rate() / 2.0
    }

    /// `N` evenly spaced instants from 0 to the duration
    pub fn time_axis(&self) -> Vec<f64> {
        linspace(0.0, self.duration(), self.len())
    }

    /// `N` evenly spaced frequencies from 0 to the sample rate
    pub fn frequency_axis(&self) -> Vec<f64> {
        linspace(0.0, self.sample_rate(), self.len())
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Samples:              {}", self.len())?;
        writeln!(f, "Sample rate:          {:.1} Hz", self.sample_rate())?;
        writeln!(f, "Sample interval:      {:.6} s", self.dt())?;
        writeln!(f, "Duration:             {:.3} s", self.duration())?;
        writeln!(f, "Frequency resolution: {:.3} Hz", self.frequency_resolution())?;
        write!(f, "Nyquist frequency:    {:.1} Hz", self.nyquist())
    }
}

fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Downsample by an integer stride.
///
/// Starting at `start_time`, every `floor(fs / new_rate)`-th sample is taken
/// and the first `new_len` are kept. Because the stride is an integer, the
/// resulting rate is `fs / stride`, which may differ from `new_rate`.
pub fn resample(signal: &Signal, new_rate: f64, new_len: usize, start_time: f64) -> EmdResult<Signal> {
    let fs = signal.sample_rate();
    if !(new_rate.is_finite() && new_rate > 0.0) {
        return Err(EmdError::Resample(format!(
            "new sample rate must be positive and finite, got {}",
            new_rate
        )));
    }
    if new_rate > fs {
        return Err(EmdError::Resample(format!(
            "new sample rate {} Hz exceeds the original {} Hz",
            new_rate, fs
        )));
    }
    if !(0.0..=signal.duration()).contains(&start_time) {
        return Err(EmdError::Resample(format!(
            "start time {} s outside [0, {}] s",
            start_time,
            signal.duration()
        )));
    }

    let ratio = ((fs / new_rate).floor() as usize).max(1);
    // Tolerate division landing just below an exact sample index
    let start = ((start_time / signal.dt() + 1e-9).floor() as usize).min(signal.len() - 1);

    let picked: Vec<Sample> = signal.data()[start..].iter().step_by(ratio).copied().collect();
    if picked.len() < new_len {
        return Err(EmdError::Resample(format!(
            "only {} samples available at stride {}, {} requested",
            picked.len(),
            ratio,
            new_len
        )));
    }

    let mut data = picked;
    data.truncate(new_len);
    Signal::new(data, Spacing::Interval(ratio as f64 * signal.dt()))
        .map_err(|e| EmdError::Resample(e.to_string()))
}

/// Boxcar-smooth `data` over `size` samples, then keep every `size`-th value.
///
/// The average is centred like a "same"-mode convolution with zero padding,
/// so the first and last outputs are damped towards zero.
pub fn low_smoothing(data: &[Sample], size: usize) -> EmdResult<Vec<Sample>> {
    if size == 0 || size > data.len() {
        return Err(EmdError::InvalidSignal(format!(
            "smoothing width must be in 1..={}, got {}",
            data.len(),
            size
        )));
    }

    let n = data.len();
    let offset = (size - 1) / 2;
    let scale = 1.0 / size as f64;

    Ok((0..n)
        .step_by(size)
        .map(|i| {
            let hi = (i + offset).min(n - 1);
            let lo = (i + offset + 1).saturating_sub(size);
            data[lo..=hi].iter().sum::<f64>() * scale
        })
        .collect())
}

/// Map a uniform time axis to the matching DFT frequency axis.
///
/// `N` points from 0 up to, but excluding, `1 / Δt`.
pub fn time_to_frequency_axis(values: &[f64]) -> EmdResult<Vec<f64>> {
    if values.len() < 2 {
        return Err(EmdError::InvalidSignal(format!(
            "need at least 2 axis values, got {}",
            values.len()
        )));
    }
    let delta = values[1] - values[0];
    if !(delta.is_finite() && delta > 0.0) {
        return Err(EmdError::InvalidSignal(format!(
            "axis step must be positive and finite, got {}",
            delta
        )));
    }

    let n = values.len();
    let step = 1.0 / (delta * n as f64);
    Ok((0..n).map(|i| step * i as f64).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn test_spacing_forms_agree() {
        let by_rate = Signal::new(ramp(101), Spacing::Rate(100.0)).unwrap();
        let by_dt = Signal::new(ramp(101), Spacing::Interval(0.01)).unwrap();
        let by_t = Signal::new(ramp(101), Spacing::Duration(1.0)).unwrap();

        for s in [&by_rate, &by_dt, &by_t] {
            assert!((s.sample_rate() - 100.0).abs() < 1e-9);
            assert!((s.duration() - 1.0).abs() < 1e-9);
            assert!((s.nyquist() - 50.0).abs() < 1e-9);
            assert!((s.frequency_resolution() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_axes() {
        let s = Signal::with_sample_rate(ramp(5), 4.0).unwrap();
        assert_eq!(s.time_axis(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(s.frequency_axis(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_invalid_signals() {
        assert!(matches!(
            Signal::new(vec![1.0], Spacing::Rate(10.0)),
            Err(EmdError::InvalidSignal(_))
        ));
        assert!(matches!(
            Signal::new(ramp(10), Spacing::Rate(0.0)),
            Err(EmdError::InvalidSignal(_))
        ));
        assert!(matches!(
            Signal::new(ramp(10), Spacing::Interval(f64::NAN)),
            Err(EmdError::InvalidSignal(_))
        ));
        assert!(matches!(
            Signal::new(vec![0.0, f64::INFINITY], Spacing::Rate(1.0)),
            Err(EmdError::InvalidSignal(_))
        ));
    }

    #[test]
    fn test_display_summary() {
        let s = Signal::with_sample_rate(ramp(1024), 256.0).unwrap();
        let info = s.to_string();
        assert!(info.contains("Samples:              1024"));
        assert!(info.contains("256.0 Hz"));
        assert!(info.contains("128.0 Hz"));
    }

    #[test]
    fn test_resample_stride() {
        let s = Signal::with_sample_rate(ramp(100), 100.0).unwrap();
        let r = resample(&s, 25.0, 10, 0.1).unwrap();
        assert_eq!(r.data(), &[10.0, 14.0, 18.0, 22.0, 26.0, 30.0, 34.0, 38.0, 42.0, 46.0]);
        assert!((r.sample_rate() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_resample_non_integer_ratio() {
        // 100 / 30 floors to a stride of 3, so the real rate is 33.3 Hz
        let s = Signal::with_sample_rate(ramp(100), 100.0).unwrap();
        let r = resample(&s, 30.0, 5, 0.0).unwrap();
        assert_eq!(r.data(), &[0.0, 3.0, 6.0, 9.0, 12.0]);
        assert!((r.sample_rate() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_low_smoothing() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        // Width 2: window [i - 1, i], zero before the start
        assert_eq!(low_smoothing(&data, 2).unwrap(), vec![0.5, 2.5, 4.5]);

        // Width 3: centred window; the dropped last output would be 11/3
        let smoothed = low_smoothing(&data, 3).unwrap();
        assert_eq!(smoothed.len(), 2);
        assert!((smoothed[0] - 1.0).abs() < 1e-12);
        assert!((smoothed[1] - 4.0).abs() < 1e-12);

        assert_eq!(low_smoothing(&data, 1).unwrap(), data.to_vec());
    }

    #[test]
    fn test_low_smoothing_rejects_bad_width() {
        assert!(matches!(low_smoothing(&[1.0, 2.0], 0), Err(EmdError::InvalidSignal(_))));
        assert!(matches!(low_smoothing(&[1.0, 2.0], 3), Err(EmdError::InvalidSignal(_))));
    }

    #[test]
    fn test_time_to_frequency_axis() {
        let time = [0.0, 0.25, 0.5, 0.75];
        assert_eq!(time_to_frequency_axis(&time).unwrap(), vec![0.0, 1.0, 2.0, 3.0]);

        let s = Signal::with_sample_rate(ramp(1024), 256.0).unwrap();
        let freq = time_to_frequency_axis(&s.time_axis()).unwrap();
        assert_eq!(freq.len(), 1024);
        assert!((freq[1] - 0.25).abs() < 1e-9);
        assert!(freq[1023] < 256.0);

        assert!(matches!(time_to_frequency_axis(&[1.0]), Err(EmdError::InvalidSignal(_))));
        assert!(matches!(
            time_to_frequency_axis(&[1.0, 1.0, 1.0]),
            Err(EmdError::InvalidSignal(_))
        ));
    }

    #[test]
    fn test_resample_errors() {
        let s = Signal::with_sample_rate(ramp(100), 100.0).unwrap();
        assert!(matches!(resample(&s, 200.0, 10, 0.0), Err(EmdError::Resample(_))));
        assert!(matches!(resample(&s, 10.0, 10, -0.5), Err(EmdError::Resample(_))));
        assert!(matches!(resample(&s, 10.0, 10, 5.0), Err(EmdError::Resample(_))));
        assert!(matches!(resample(&s, 10.0, 11, 0.0), Err(EmdError::Resample(_))));
        assert!(matches!(resample(&s, 10.0, 1, 0.0), Err(EmdError::Resample(_))));
    }
}
