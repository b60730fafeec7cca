//! Spectra - Scaled Fourier Analysis Core
//!
//! DFT and radix-2 FFT engines that report bins directly in Vrms, a library
//! of flat-top and cosine-sum windows with their scale factors, spectrum
//! conversion and measurement helpers, and a 50%-overlap STFT.
//! Optional Python bindings behind the `python` feature.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod generate;
pub mod spectrum;
pub mod stft;
pub mod transform;
pub mod window;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{Result, SpectraError};
pub use spectrum::{AnalyzerConfig, SpectrumAnalyzer};
pub use stft::{Stft, StftConfig, StftResult};
pub use transform::{frequency_span, Dft, Fft, Spectrum, Transform, TransformConfig};
pub use window::WindowType;
