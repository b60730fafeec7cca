//! Window scale factors
//!
//! Windowing attenuates both discrete tones and broadband noise. These
//! factors are multiplied onto a *magnitude* spectrum to undo it.

use super::{coefficients, WindowType};

/// Signal scale factor: `1 / mean(w)`
///
/// Restores the amplitude of a discrete tone after windowing.
pub fn signal(window: &[f64]) -> f64 {
    let mean = window.iter().sum::<f64>() / window.len() as f64;
    1.0 / mean
}

/// Signal scale factor for a freshly generated window
pub fn signal_for(window_type: WindowType, length: usize) -> f64 {
    signal(&coefficients(window_type, length))
}

/// Noise scale factor: `sqrt(1 / (mean(w²) · fbin))`, with `fbin = fs / N`
///
/// Turns a windowed magnitude into a spectral density in units per root-Hz.
pub fn noise(window: &[f64], sample_rate: f64) -> f64 {
    let n = window.len() as f64;
    let mean_square = window.iter().map(|&w| w * w).sum::<f64>() / n;
    let bin_width = sample_rate / n;

    (1.0 / (mean_square * bin_width)).sqrt()
}

/// Normalized equivalent noise bandwidth: `(mean(w²) / mean(w)²) / N`
///
/// Diagnostic only, never applied automatically.
pub fn nenbw(window: &[f64]) -> f64 {
    let n = window.len() as f64;
    let (sum, sum_sq) = window
        .iter()
        .fold((0.0, 0.0), |(s1, s2), &w| (s1 + w, s2 + w * w));
    let mean = sum / n;
    let mean_square = sum_sq / n;

    (mean_square / (mean * mean)) / n
}
