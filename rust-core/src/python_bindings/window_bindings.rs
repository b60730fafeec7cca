//! Python bindings for window coefficients and scale factors

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use super::parse_window;
use crate::window::{self, WindowType};

/// Window coefficients
///
/// Args:
///     name: Window name, e.g. "Hann", "FTHP", "HFT248D"
///     length: Number of samples
#[pyfunction]
pub fn window_coefficients<'py>(py: Python<'py>, name: &str, length: usize) -> PyResult<&'py PyArray1<f64>> {
    let window_type = parse_window(name)?;
    Ok(PyArray1::from_vec(py, window::coefficients(window_type, length)))
}

/// Names of every supported window
#[pyfunction]
pub fn window_names() -> Vec<&'static str> {
    WindowType::ALL.iter().map(|w| w.name()).collect()
}

/// Amplitude correction: 1 / mean(w)
#[pyfunction]
pub fn signal_scale_factor(coefficients: PyReadonlyArray1<f64>) -> PyResult<f64> {
    Ok(window::signal(coefficients.as_slice()?))
}

/// Spectral density correction for the given sample rate
#[pyfunction]
pub fn noise_scale_factor(coefficients: PyReadonlyArray1<f64>, sample_rate: f64) -> PyResult<f64> {
    Ok(window::noise(coefficients.as_slice()?, sample_rate))
}

/// Normalized equivalent noise bandwidth
#[pyfunction]
pub fn nenbw(coefficients: PyReadonlyArray1<f64>) -> PyResult<f64> {
    Ok(window::nenbw(coefficients.as_slice()?))
}
