//! Conversions of transform output into magnitude, power and phase

use num_complex::Complex64;

/// Floor substituted for non-positive values before taking a logarithm
pub const LOG_FLOOR: f64 = f64::MIN_POSITIVE;

pub fn real_part(spectrum: &[Complex64]) -> Vec<f64> {
    spectrum.iter().map(|c| c.re).collect()
}

pub fn imag_part(spectrum: &[Complex64]) -> Vec<f64> {
    spectrum.iter().map(|c| c.im).collect()
}

/// |X[k]|, in Vrms for a scaled spectrum
pub fn to_magnitude(spectrum: &[Complex64]) -> Vec<f64> {
    spectrum.iter().map(|c| c.norm()).collect()
}

/// |X[k]|², in Vrms²
pub fn to_magnitude_squared(spectrum: &[Complex64]) -> Vec<f64> {
    spectrum.iter().map(|c| c.norm_sqr()).collect()
}

/// 20·log10(|X[k]|) in dBV
pub fn to_magnitude_dbv(spectrum: &[Complex64]) -> Vec<f64> {
    spectrum.iter().map(|c| amplitude_db(c.norm())).collect()
}

/// Argument of each bin in degrees, in (-180, 180]
pub fn to_phase_degrees(spectrum: &[Complex64]) -> Vec<f64> {
    spectrum.iter().map(|c| c.arg().to_degrees()).collect()
}

/// Argument of each bin in radians, in (-π, π]
pub fn to_phase_radians(spectrum: &[Complex64]) -> Vec<f64> {
    spectrum.iter().map(|c| c.arg()).collect()
}

pub fn magnitude_to_squared(magnitude: &[f64]) -> Vec<f64> {
    magnitude.iter().map(|&m| m * m).collect()
}

pub fn magnitude_to_dbv(magnitude: &[f64]) -> Vec<f64> {
    magnitude.iter().map(|&m| amplitude_db(m)).collect()
}

pub fn magnitude_squared_to_magnitude(mag_squared: &[f64]) -> Vec<f64> {
    mag_squared.iter().map(|&p| p.sqrt()).collect()
}

/// 10·log10(|X[k]|²) in dBV
pub fn magnitude_squared_to_dbv(mag_squared: &[f64]) -> Vec<f64> {
    mag_squared
        .iter()
        .map(|&p| 10.0 * clamp_positive(p).log10())
        .collect()
}

/// Multiply every value by `factor`, e.g. a window scale factor
pub fn scale(values: &[f64], factor: f64) -> Vec<f64> {
    values.iter().map(|&v| v * factor).collect()
}

fn amplitude_db(value: f64) -> f64 {
    20.0 * clamp_positive(value).log10()
}

fn clamp_positive(value: f64) -> f64 {
    if value <= 0.0 {
        LOG_FLOOR
    } else {
        value
    }
}
