//! Python bindings for the STFT engine

use numpy::{PyArray1, PyArray2, PyReadonlyArray1, PyReadonlyArray2, ToPyArray};
use pyo3::prelude::*;

use super::parse_window;
use crate::stft::{Stft, StftConfig, StftResult};

/// STFT engine exposed to Python
///
/// Spectra cross the boundary as a complex `frames x bins` array.
#[pyclass(name = "Stft")]
pub struct PyStft {
    stft: Stft,
}

#[pymethods]
impl PyStft {
    #[new]
    #[pyo3(signature = (frame_length=1024, window="Hann", zero_padding=0))]
    fn new(frame_length: usize, window: &str, zero_padding: usize) -> PyResult<Self> {
        let config = StftConfig {
            window_type: parse_window(window)?,
            frame_length,
            zero_padding,
        };
        Ok(Self {
            stft: Stft::new(config)?,
        })
    }

    /// Complex spectra, one row per frame
    fn direct<'py>(&self, py: Python<'py>, signal: PyReadonlyArray1<f64>) -> PyResult<&'py PyArray2<num_complex::Complex64>> {
        let result = self.stft.direct(signal.as_slice()?)?;
        let bins = result.num_bins();
        let flat: Vec<_> = result.frames.into_iter().flatten().collect();
        let rows = flat.len() / bins;
        let array = ndarray::Array2::from_shape_vec((rows, bins), flat)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;
        Ok(array.to_pyarray(py))
    }

    /// Overlap-add reconstruction from a `frames x bins` array
    fn inverse<'py>(&self, py: Python<'py>, frames: PyReadonlyArray2<num_complex::Complex64>) -> PyResult<&'py PyArray1<f64>> {
        let config = self.stft.config();
        let result = StftResult {
            frames: frames.as_array().rows().into_iter().map(|row| row.to_vec()).collect(),
            frame_length: config.frame_length,
            zero_padding: config.zero_padding,
            window_type: config.window_type,
        };
        Ok(PyArray1::from_vec(py, self.stft.inverse(&result)?))
    }
}
