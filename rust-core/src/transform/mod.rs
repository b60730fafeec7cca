//! Fourier transform engines for real-valued time series
//!
//! Both engines share one scaling convention so that a magnitude read off
//! any bin is directly in Vrms:
//!
//! * every bin is multiplied by `sqrt(2) / N` (`N` = samples before padding),
//!   which folds the natural `1/total` DFT scale with the zero-padding
//!   correction `total / N`;
//! * the DC bin and the last one-sided bin are further divided by `sqrt(2)`
//!   and have their imaginary part forced to zero, since they have no mirrored
//!   negative-frequency partner.

pub mod dft;
pub mod fft;

pub use dft::Dft;
pub use fft::Fft;

use crate::error::{Result, SpectraError};
use num_complex::Complex64;
use std::f64::consts::SQRT_2;

/// One-sided spectrum: index 0 is DC, the last index is Nyquist
pub type Spectrum = Vec<Complex64>;

/// Immutable transform configuration, fixed at engine initialisation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformConfig {
    input_length: usize,
    zero_padding: usize,
    total_length: usize,
    half_length: usize,
    scale_factor: f64,
}

impl TransformConfig {
    /// Derive the configuration for `input_length` samples followed by
    /// `zero_padding` zeros
    pub fn new(input_length: usize, zero_padding: usize) -> Result<Self> {
        let total_length = input_length + zero_padding;
        if input_length == 0 {
            return Err(SpectraError::InvalidLength {
                input_length,
                zero_padding,
                total_length,
                reason: "input length must be non-zero",
            });
        }

        // sqrt(2)/total is the natural scale, total/input undoes zero padding
        let mut scale_factor = SQRT_2 / total_length as f64;
        scale_factor *= total_length as f64 / input_length as f64;

        Ok(Self {
            input_length,
            zero_padding,
            total_length,
            half_length: total_length / 2 + 1,
            scale_factor,
        })
    }

    /// Number of samples before zero padding (N)
    pub fn input_length(&self) -> usize {
        self.input_length
    }

    /// Number of appended zeros (Z)
    pub fn zero_padding(&self) -> usize {
        self.zero_padding
    }

    /// N + Z
    pub fn total_length(&self) -> usize {
        self.total_length
    }

    /// Number of one-sided bins including DC and Nyquist
    pub fn half_length(&self) -> usize {
        self.half_length
    }

    /// Base per-bin scale factor
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Width of one bin in Hz
    pub fn bin_width(&self, sample_rate: f64) -> f64 {
        sample_rate / self.total_length as f64
    }

    pub(crate) fn check_input(&self, len: usize) -> Result<()> {
        if len > self.total_length {
            return Err(SpectraError::InputTooLong {
                actual: len,
                max: self.total_length,
            });
        }
        Ok(())
    }
}

/// Forward transform of a real time series into a scaled one-sided spectrum
pub trait Transform: Send + Sync {
    /// Active configuration
    fn config(&self) -> &TransformConfig;

    /// Transform `time_series`, implicitly zero-padded to the total length
    fn direct(&self, time_series: &[f64]) -> Result<Spectrum>;

    /// Frequency axis in Hz matching the output of [`Transform::direct`]
    fn frequency_span(&self, sample_rate: f64) -> Vec<f64> {
        frequency_span(sample_rate, self.config().half_length())
    }
}

/// Linearly spaced frequencies from 0 to `sample_rate / 2` inclusive
pub fn frequency_span(sample_rate: f64, points: usize) -> Vec<f64> {
    if points < 2 {
        return vec![0.0; points];
    }

    let stop = sample_rate / 2.0;
    let increment = stop / (points - 1) as f64;
    (0..points).map(|i| increment * i as f64).collect()
}

/// Divide DC and the last one-sided bin by sqrt(2), keeping only the real part
pub(crate) fn scale_edge_bins(spectrum: &mut [Complex64], half_length: usize) {
    let last = half_length - 1;
    spectrum[0] = Complex64::new(spectrum[0].re / SQRT_2, 0.0);
    if last != 0 {
        spectrum[last] = Complex64::new(spectrum[last].re / SQRT_2, 0.0);
    }
}
