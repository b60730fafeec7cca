//! Python bindings for the DFT and FFT engines

use num_complex::Complex64;
use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use crate::spectrum::{analysis, convert};
use crate::transform::{self, Dft, Fft, Transform};

/// DFT engine exposed to Python
#[pyclass(name = "Dft")]
pub struct PyDft {
    dft: Dft,
}

#[pymethods]
impl PyDft {
    /// Create a new DFT
    ///
    /// Args:
    ///     input_length: Samples per call
    ///     zero_padding: Zeros appended before transforming
    ///     force_no_cache: Skip the precomputed sine/cosine tables
    #[new]
    #[pyo3(signature = (input_length, zero_padding=0, force_no_cache=false))]
    fn new(input_length: usize, zero_padding: usize, force_no_cache: bool) -> PyResult<Self> {
        Ok(Self {
            dft: Dft::new(input_length, zero_padding, force_no_cache)?,
        })
    }

    /// Scaled one-sided spectrum as a complex numpy array
    fn execute<'py>(&self, py: Python<'py>, signal: PyReadonlyArray1<f64>) -> PyResult<&'py PyArray1<Complex64>> {
        let spectrum = self.dft.execute(signal.as_slice()?)?;
        Ok(PyArray1::from_vec(py, spectrum))
    }

    /// Frequency axis in Hz
    fn frequency_span<'py>(&self, py: Python<'py>, sample_rate: f64) -> &'py PyArray1<f64> {
        PyArray1::from_vec(py, self.dft.frequency_span(sample_rate))
    }

    #[getter]
    fn is_using_cache(&self) -> bool {
        self.dft.is_using_cache()
    }

    #[getter]
    fn num_bins(&self) -> usize {
        self.dft.config().half_length()
    }
}

/// FFT engine exposed to Python
#[pyclass(name = "Fft")]
pub struct PyFft {
    fft: Fft,
}

#[pymethods]
impl PyFft {
    /// Create a new FFT; input_length + zero_padding must be a power of two
    #[new]
    #[pyo3(signature = (input_length, zero_padding=0))]
    fn new(input_length: usize, zero_padding: usize) -> PyResult<Self> {
        Ok(Self {
            fft: Fft::new(input_length, zero_padding)?,
        })
    }

    /// Scaled one-sided spectrum of a real signal
    fn direct<'py>(&self, py: Python<'py>, signal: PyReadonlyArray1<f64>) -> PyResult<&'py PyArray1<Complex64>> {
        let spectrum = self.fft.direct(signal.as_slice()?)?;
        Ok(PyArray1::from_vec(py, spectrum))
    }

    /// Inverse of `direct`, from a one-sided or full spectrum
    fn inverse<'py>(&self, py: Python<'py>, spectrum: PyReadonlyArray1<Complex64>) -> PyResult<&'py PyArray1<Complex64>> {
        let samples = self.fft.inverse(spectrum.as_slice()?)?;
        Ok(PyArray1::from_vec(py, samples))
    }

    /// Frequency axis in Hz
    fn frequency_span<'py>(&self, py: Python<'py>, sample_rate: f64) -> &'py PyArray1<f64> {
        PyArray1::from_vec(py, self.fft.frequency_span(sample_rate))
    }

    #[getter]
    fn num_bins(&self) -> usize {
        self.fft.config().half_length()
    }
}

/// Linear frequency axis from 0 to sample_rate / 2
#[pyfunction]
pub fn frequency_span<'py>(py: Python<'py>, sample_rate: f64, points: usize) -> &'py PyArray1<f64> {
    PyArray1::from_vec(py, transform::frequency_span(sample_rate, points))
}

/// Single-pass phase unwrap in degrees
#[pyfunction]
pub fn unwrap_phase_degrees<'py>(py: Python<'py>, phase: PyReadonlyArray1<f64>) -> PyResult<&'py PyArray1<f64>> {
    Ok(PyArray1::from_vec(py, analysis::unwrap_phase_degrees(phase.as_slice()?)))
}

/// Magnitude of each bin in dBV, zeros clamped to the smallest positive value
#[pyfunction]
pub fn to_magnitude_dbv<'py>(py: Python<'py>, spectrum: PyReadonlyArray1<Complex64>) -> PyResult<&'py PyArray1<f64>> {
    Ok(PyArray1::from_vec(py, convert::to_magnitude_dbv(spectrum.as_slice()?)))
}

/// Magnitude of each bin
#[pyfunction]
pub fn to_magnitude<'py>(py: Python<'py>, spectrum: PyReadonlyArray1<Complex64>) -> PyResult<&'py PyArray1<f64>> {
    Ok(PyArray1::from_vec(py, convert::to_magnitude(spectrum.as_slice()?)))
}

/// Phase of each bin in degrees
#[pyfunction]
pub fn to_phase_degrees<'py>(py: Python<'py>, spectrum: PyReadonlyArray1<Complex64>) -> PyResult<&'py PyArray1<f64>> {
    Ok(PyArray1::from_vec(py, convert::to_phase_degrees(spectrum.as_slice()?)))
}
