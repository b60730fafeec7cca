//! Conversion and analysis of transform output

pub mod analysis;
pub mod analyzer;
pub mod convert;

pub use analysis::{find_max_position, find_mean, find_rms, unwrap_phase_degrees, unwrap_phase_radians};
pub use analyzer::{AnalyzerConfig, SpectrumAnalyzer};
