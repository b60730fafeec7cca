//! High-level spectrum analyzer
//!
//! Combines a window, a transform engine and the window's signal scale
//! factor so that a tone reads back at its Vrms amplitude.

use super::convert::{magnitude_to_dbv, scale, to_magnitude};
use crate::error::Result;
use crate::transform::{Dft, Fft, Spectrum, Transform, TransformConfig};
use crate::window::{self, WindowType};

/// Spectrum analyzer configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Samples per analysis (N)
    pub input_length: usize,

    /// Zeros appended before transforming (Z)
    pub zero_padding: usize,

    /// Window type for spectral analysis
    pub window_type: WindowType,

    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Apply the window's signal scale factor to magnitudes
    pub apply_correction: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            input_length: 2048,
            zero_padding: 0,
            window_type: WindowType::Hann,
            sample_rate: 48000.0,
            apply_correction: true,
        }
    }
}

/// Engine picked for a configuration: FFT for power-of-two totals, DFT otherwise
pub enum Engine {
    Fft(Fft),
    Dft(Dft),
}

impl Engine {
    pub fn for_lengths(input_length: usize, zero_padding: usize) -> Result<Self> {
        let total = input_length + zero_padding;
        if total >= 2 && total.is_power_of_two() {
            Ok(Engine::Fft(Fft::new(input_length, zero_padding)?))
        } else {
            Ok(Engine::Dft(Dft::new(input_length, zero_padding, false)?))
        }
    }

    fn transform(&self) -> &dyn Transform {
        match self {
            Engine::Fft(fft) => fft,
            Engine::Dft(dft) => dft,
        }
    }
}

/// Windowed, amplitude-corrected spectrum analyzer
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    engine: Engine,
    window: Vec<f64>,
    correction_factor: f64,
}

impl SpectrumAnalyzer {
    /// Create new spectrum analyzer
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let engine = Engine::for_lengths(config.input_length, config.zero_padding)?;
        let window = window::coefficients(config.window_type, config.input_length);
        let correction_factor = correction_for(&config, &window);

        Ok(Self {
            config,
            engine,
            window,
            correction_factor,
        })
    }

    /// Window and transform `signal`, without magnitude correction
    pub fn analyze_complex(&self, signal: &[f64]) -> Result<Spectrum> {
        let windowed = window::multiply(signal, &self.window);
        self.engine.transform().direct(&windowed)
    }

    /// Analyze signal and return the corrected magnitude spectrum in Vrms
    pub fn analyze(&self, signal: &[f64]) -> Result<Vec<f64>> {
        let spectrum = self.analyze_complex(signal)?;
        Ok(scale(&to_magnitude(&spectrum), self.correction_factor))
    }

    /// Analyze and return magnitude in dBV
    pub fn analyze_dbv(&self, signal: &[f64]) -> Result<Vec<f64>> {
        Ok(magnitude_to_dbv(&self.analyze(signal)?))
    }

    /// Get frequency bins in Hz
    pub fn frequency_bins_hz(&self) -> Vec<f64> {
        self.engine.transform().frequency_span(self.config.sample_rate)
    }

    /// Update configuration, rebuilding the engine only when lengths change
    pub fn update_config(&mut self, config: AnalyzerConfig) -> Result<()> {
        let lengths_changed = config.input_length != self.config.input_length
            || config.zero_padding != self.config.zero_padding;

        if lengths_changed {
            self.engine = Engine::for_lengths(config.input_length, config.zero_padding)?;
        }

        self.window = window::coefficients(config.window_type, config.input_length);
        self.correction_factor = correction_for(&config, &self.window);
        self.config = config;
        Ok(())
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Active transform configuration
    pub fn transform_config(&self) -> &TransformConfig {
        self.engine.transform().config()
    }

    /// True when the engine is the radix-2 FFT
    pub fn uses_fft(&self) -> bool {
        matches!(self.engine, Engine::Fft(_))
    }

    /// Get number of frequency bins
    pub fn num_bins(&self) -> usize {
        self.transform_config().half_length()
    }
}

fn correction_for(config: &AnalyzerConfig, window: &[f64]) -> f64 {
    if config.apply_correction {
        window::signal(window)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::tone_sampling;
    use crate::spectrum::analysis::find_max_position;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_analyzer_hamming_tone() {
        let config = AnalyzerConfig {
            input_length: 1000,
            zero_padding: 0,
            window_type: WindowType::Hamming,
            sample_rate: 100_000.0,
            apply_correction: true,
        };
        let analyzer = SpectrumAnalyzer::new(config).unwrap();
        assert!(!analyzer.uses_fft());

        let signal = tone_sampling(1.0, 20_000.0, 100_000.0, 1000, 0.0, 0.0);
        let spectrum = analyzer.analyze(&signal).unwrap();

        assert_eq!(spectrum.len(), 501);
        let peak = find_max_position(&spectrum).unwrap();
        assert_eq!(peak, 200);
        assert_abs_diff_eq!(spectrum[peak], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(analyzer.frequency_bins_hz()[peak], 20_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_analyzer_dbv() {
        // 5 Vrms => 13.979 dBV
        let config = AnalyzerConfig {
            input_length: 1024,
            window_type: WindowType::Fthp,
            sample_rate: 131_072.0,
            ..AnalyzerConfig::default()
        };
        let analyzer = SpectrumAnalyzer::new(config).unwrap();
        assert!(analyzer.uses_fft());

        let signal = tone_sampling(5.0, 32_768.0, 131_072.0, 1024, 0.0, 0.0);
        let db = analyzer.analyze_dbv(&signal).unwrap();
        assert_abs_diff_eq!(db[256], 20.0 * 5.0_f64.log10(), epsilon = 1e-6);
    }

    #[test]
    fn test_update_config_switches_engine() {
        let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default()).unwrap();
        assert!(analyzer.uses_fft());
        assert_eq!(analyzer.num_bins(), 1025);

        let mut config = analyzer.config().clone();
        config.input_length = 1500;
        config.apply_correction = false;
        analyzer.update_config(config).unwrap();

        assert!(!analyzer.uses_fft());
        assert_eq!(analyzer.num_bins(), 751);
        assert_eq!(analyzer.analyze(&vec![0.0; 1500]).unwrap().len(), 751);
    }
}
