//! PyO3 bindings for Python integration

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::SpectraError;
use crate::window::WindowType;

mod stft_bindings;
mod transform_bindings;
mod window_bindings;

impl From<SpectraError> for PyErr {
    fn from(err: SpectraError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Parse a window name such as "Hann" or "HFT248D"
pub(crate) fn parse_window(name: &str) -> PyResult<WindowType> {
    name.parse::<WindowType>()
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Python module definition
#[pymodule]
fn spectra(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<transform_bindings::PyDft>()?;
    m.add_class::<transform_bindings::PyFft>()?;
    m.add_class::<stft_bindings::PyStft>()?;

    m.add_function(wrap_pyfunction!(window_bindings::window_coefficients, m)?)?;
    m.add_function(wrap_pyfunction!(window_bindings::window_names, m)?)?;
    m.add_function(wrap_pyfunction!(window_bindings::signal_scale_factor, m)?)?;
    m.add_function(wrap_pyfunction!(window_bindings::noise_scale_factor, m)?)?;
    m.add_function(wrap_pyfunction!(window_bindings::nenbw, m)?)?;
    m.add_function(wrap_pyfunction!(transform_bindings::frequency_span, m)?)?;
    m.add_function(wrap_pyfunction!(transform_bindings::unwrap_phase_degrees, m)?)?;
    m.add_function(wrap_pyfunction!(transform_bindings::to_magnitude, m)?)?;
    m.add_function(wrap_pyfunction!(transform_bindings::to_magnitude_dbv, m)?)?;
    m.add_function(wrap_pyfunction!(transform_bindings::to_phase_degrees, m)?)?;

    Ok(())
}
