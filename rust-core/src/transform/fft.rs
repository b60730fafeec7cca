//! Radix-2 fast Fourier transform
//!
//! The butterfly network runs over a flat working buffer. Stage `s` uses
//! butterflies of span `total >> (s + 1)`; the twiddle factor advances by
//! complex multiplication rather than per-element trigonometry. Results
//! come out bit-reversed and are unscrambled through a precomputed table.

use super::{scale_edge_bins, Spectrum, Transform, TransformConfig};
use crate::error::{Result, SpectraError};
use log::debug;
use num_complex::Complex64;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Reverse the lowest `bits` bits of `x`
///
/// For example, `0b1101` reversed over 4 bits is `0b1011`.
pub fn bit_reverse(mut x: usize, bits: u32) -> usize {
    let mut y = 0;
    for _ in 0..bits {
        y = (y << 1) | (x & 1);
        x >>= 1;
    }
    y
}

/// FFT engine for power-of-two total lengths
pub struct Fft {
    config: TransformConfig,
    log2_length: u32,
    /// Target position of each sample after the network
    bit_reverse: Vec<usize>,
}

impl Fft {
    /// Create an FFT for `input_length` samples plus `zero_padding` zeros
    ///
    /// Fails with [`SpectraError::InvalidLength`] unless the total length is
    /// a power of two of at least 2.
    pub fn new(input_length: usize, zero_padding: usize) -> Result<Self> {
        let config = TransformConfig::new(input_length, zero_padding)?;
        let total = config.total_length();

        if total < 2 || !total.is_power_of_two() {
            return Err(SpectraError::InvalidLength {
                input_length,
                zero_padding,
                total_length: total,
                reason: "FFT total length must be a power of two",
            });
        }

        let log2_length = total.trailing_zeros();
        let bit_reverse = (0..total).map(|k| bit_reverse(k, log2_length)).collect();

        debug!(
            "FFT initialised: N={} Z={} total=2^{} scale={:e}",
            input_length,
            zero_padding,
            log2_length,
            config.scale_factor()
        );

        Ok(Self {
            config,
            log2_length,
            bit_reverse,
        })
    }

    /// Replace the configuration with a new length
    pub fn initialize(&mut self, input_length: usize, zero_padding: usize) -> Result<()> {
        *self = Self::new(input_length, zero_padding)?;
        Ok(())
    }

    /// log2 of the total length
    pub fn log2_length(&self) -> u32 {
        self.log2_length
    }

    /// Forward transform of a real series, one-sided output
    pub fn direct(&self, time_series: &[f64]) -> Result<Spectrum> {
        self.config.check_input(time_series.len())?;

        let mut data = vec![Complex64::new(0.0, 0.0); self.config.total_length()];
        for (slot, &x) in data.iter_mut().zip(time_series) {
            *slot = Complex64::new(x, 0.0);
        }

        let mut spectrum = self.forward(data);
        spectrum.truncate(self.config.half_length());
        Ok(spectrum)
    }

    /// Forward transform of a complex series, full-length output
    ///
    /// Scaling matches [`Fft::direct`]: the DC bin and bin `half_length - 1`
    /// keep only their real part, divided by sqrt(2).
    pub fn execute(&self, series: &[Complex64]) -> Result<Vec<Complex64>> {
        self.config.check_input(series.len())?;

        let mut data = vec![Complex64::new(0.0, 0.0); self.config.total_length()];
        data[..series.len()].copy_from_slice(series);

        Ok(self.forward(data))
    }

    /// Inverse of this engine's own forward scaling
    ///
    /// Accepts either a one-sided spectrum of `half_length` bins, which is
    /// mirrored by conjugate symmetry, or a full `total_length` spectrum.
    /// Real and imaginary parts are swapped, the unscaled network is run, the
    /// parts are swapped back and the whole result is multiplied by
    /// `1/sqrt(2)`. The halved DC/Nyquist bins are not restored, and a
    /// zero-padded configuration returns samples scaled by `total / N`.
    pub fn inverse(&self, spectrum: &[Complex64]) -> Result<Vec<Complex64>> {
        let total = self.config.total_length();
        let half = self.config.half_length();

        let full = if spectrum.len() == total {
            spectrum.to_vec()
        } else if spectrum.len() == half {
            let mut full = Vec::with_capacity(total);
            full.extend_from_slice(spectrum);
            full.extend(spectrum[1..total - half + 1].iter().rev().map(|c| c.conj()));
            full
        } else {
            return Err(SpectraError::SpectrumLength {
                actual: spectrum.len(),
                half_length: half,
                total_length: total,
            });
        };

        let mut data: Vec<Complex64> = full.iter().map(|c| Complex64::new(c.im, c.re)).collect();
        self.butterflies(&mut data);

        let mut result = vec![Complex64::new(0.0, 0.0); total];
        for (x, &target) in data.iter().zip(&self.bit_reverse) {
            result[target] = Complex64::new(x.im, x.re) * FRAC_1_SQRT_2;
        }
        Ok(result)
    }

    fn forward(&self, mut data: Vec<Complex64>) -> Vec<Complex64> {
        self.butterflies(&mut data);

        let scale = self.config.scale_factor();
        let mut result = vec![Complex64::new(0.0, 0.0); data.len()];
        for (x, &target) in data.iter().zip(&self.bit_reverse) {
            result[target] = x * scale;
        }

        scale_edge_bins(&mut result, self.config.half_length());
        result
    }

    /// In-place butterfly network, output left in bit-reversed order
    fn butterflies(&self, data: &mut [Complex64]) {
        let total = data.len();
        let mut span = total >> 1;
        let mut w_index_step = 1usize;

        for _stage in 0..self.log2_length {
            // Twiddle advances by this unit rotation between butterflies
            let w_angle_inc = w_index_step as f64 * -2.0 * PI / total as f64;
            let w_mul = Complex64::from_polar(1.0, w_angle_inc);

            // Each sub-transform of width 2*span is independent
            for block in data.chunks_mut(span << 1) {
                let (top, bottom) = block.split_at_mut(span);
                let mut w = Complex64::new(1.0, 0.0);

                for (x_top, x_bot) in top.iter_mut().zip(bottom.iter_mut()) {
                    let t = *x_top;
                    let b = *x_bot;
                    *x_top = t + b;
                    *x_bot = (t - b) * w;
                    w *= w_mul;
                }
            }

            span >>= 1;
            w_index_step <<= 1;
        }
    }
}

impl Transform for Fft {
    fn config(&self) -> &TransformConfig {
        &self.config
    }

    fn direct(&self, time_series: &[f64]) -> Result<Spectrum> {
        Fft::direct(self, time_series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{tone_cycles, tone_sampling};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_bit_reverse() {
        assert_eq!(bit_reverse(0b1101, 4), 0b1011);
        assert_eq!(bit_reverse(1, 3), 4);
        assert_eq!(bit_reverse(6, 3), 3);
        assert_eq!(bit_reverse(0, 10), 0);
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        assert!(matches!(
            Fft::new(1000, 0),
            Err(SpectraError::InvalidLength { total_length: 1000, .. })
        ));
        assert!(matches!(
            Fft::new(1, 0),
            Err(SpectraError::InvalidLength { total_length: 1, .. })
        ));
        assert!(Fft::new(1000, 24).is_ok());
    }

    #[test]
    fn test_fft_sine_wave() {
        // 1 Vrms at 32768 Hz, fs = 131072 Hz, 1024 points => bin 256
        let signal = tone_sampling(1.0, 32768.0, 131_072.0, 1024, 0.0, 0.0);
        let fft = Fft::new(1024, 0).unwrap();
        let spectrum = fft.direct(&signal).unwrap();

        assert_eq!(spectrum.len(), 513);
        assert_abs_diff_eq!(spectrum[256].norm(), 1.0, epsilon = 1e-9);
        for (bin, c) in spectrum.iter().enumerate() {
            if bin != 256 {
                assert!(c.norm() < 1e-9, "bin {} = {}", bin, c.norm());
            }
        }
    }

    #[test]
    fn test_edge_bins_are_real() {
        let signal: Vec<f64> = (0..64).map(|i| ((i * 7 % 11) as f64).sin()).collect();
        let fft = Fft::new(64, 0).unwrap();
        let spectrum = fft.direct(&signal).unwrap();

        assert_eq!(spectrum[0].im, 0.0);
        assert_eq!(spectrum[32].im, 0.0);
    }

    #[test]
    fn test_direct_inverse_round_trip() {
        // Integer cycles away from DC/Nyquist survive the edge-bin scaling
        let signal = tone_cycles(1.0, 9.0, 256, 0.0, 20.0);
        let fft = Fft::new(256, 0).unwrap();

        let spectrum = fft.direct(&signal).unwrap();
        let restored = fft.inverse(&spectrum).unwrap();

        assert_eq!(restored.len(), 256);
        for (x, y) in signal.iter().zip(restored.iter()) {
            assert_abs_diff_eq!(*x, y.re, epsilon = 1e-9);
            assert_abs_diff_eq!(y.im, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_inverse_does_not_restore_dc() {
        let fft = Fft::new(16, 0).unwrap();
        let spectrum = fft.direct(&[1.0; 16]).unwrap();
        let restored = fft.inverse(&spectrum).unwrap();

        // DC halved by sqrt(2) twice over the round trip
        for y in &restored {
            assert_abs_diff_eq!(y.re, FRAC_1_SQRT_2, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_padded_inverse_gain() {
        // No DC or Nyquist content on the 16-point grid
        let signal = [1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0];
        let fft = Fft::new(8, 8).unwrap();

        let spectrum = fft.direct(&signal).unwrap();
        assert_eq!(spectrum.len(), 9);
        assert_abs_diff_eq!(spectrum[0].re, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(spectrum[8].re, 0.0, epsilon = 1e-12);

        // total / N = 2 on the samples, zeros in the padded tail
        let restored = fft.inverse(&spectrum).unwrap();
        assert_eq!(restored.len(), 16);
        for (i, y) in restored.iter().enumerate() {
            let expected = signal.get(i).map_or(0.0, |x| 2.0 * x);
            assert_abs_diff_eq!(y.re, expected, epsilon = 1e-12);
            assert_abs_diff_eq!(y.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_inverse_full_matches_one_sided() {
        let signal: Vec<f64> = (0..32).map(|i| (i as f64 * 0.37).cos() + 0.1 * i as f64).collect();
        let fft = Fft::new(32, 0).unwrap();

        let full = fft.execute(&signal.iter().map(|&x| Complex64::new(x, 0.0)).collect::<Vec<_>>()).unwrap();
        let half = fft.direct(&signal).unwrap();
        assert_eq!(full.len(), 32);
        assert_eq!(&full[..17], &half[..]);

        let a = fft.inverse(&full).unwrap();
        let b = fft.inverse(&half).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_abs_diff_eq!(x.re, y.re, epsilon = 1e-12);
            assert_abs_diff_eq!(x.im, y.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_inverse_rejects_wrong_length() {
        let fft = Fft::new(16, 0).unwrap();
        let err = fft.inverse(&[Complex64::new(0.0, 0.0); 10]).unwrap_err();
        assert!(matches!(err, SpectraError::SpectrumLength { actual: 10, .. }));
    }

    #[test]
    fn test_input_too_long() {
        let fft = Fft::new(8, 8).unwrap();
        assert!(fft.direct(&[0.0; 16]).is_ok());
        assert!(matches!(
            fft.direct(&[0.0; 17]),
            Err(SpectraError::InputTooLong { actual: 17, max: 16 })
        ));
    }
}
