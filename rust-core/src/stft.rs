//! Short-time Fourier transform with 50% overlap
//!
//! Frames of `frame_length` samples are taken every `frame_length / 2`
//! samples, windowed and transformed with the radix-2 engine. The inverse
//! overlap-adds each frame's real part without any gain compensation, so
//! exact reconstruction needs a window that sums to one at 50% hop (Hann).

use crate::error::{Result, SpectraError};
use crate::spectrum::convert::to_magnitude;
use crate::transform::{Fft, Spectrum, Transform};
use crate::window::{self, WindowType};
use log::trace;
use ndarray::Array2;

/// STFT configuration
#[derive(Debug, Clone)]
pub struct StftConfig {
    /// Analysis window applied to every frame
    pub window_type: WindowType,

    /// Samples per frame
    pub frame_length: usize,

    /// Zeros appended to each frame before transforming
    pub zero_padding: usize,
}

impl Default for StftConfig {
    fn default() -> Self {
        Self {
            window_type: WindowType::Hann,
            frame_length: 1024,
            zero_padding: 0,
        }
    }
}

/// Ordered frame spectra; index `i` starts at sample `i * hop`
#[derive(Debug, Clone, PartialEq)]
pub struct StftResult {
    pub frames: Vec<Spectrum>,
    pub frame_length: usize,
    pub zero_padding: usize,
    pub window_type: WindowType,
}

impl StftResult {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Distance between frame starts
    pub fn hop(&self) -> usize {
        self.frame_length / 2
    }

    /// Bins per frame
    pub fn num_bins(&self) -> usize {
        (self.frame_length + self.zero_padding) / 2 + 1
    }

    /// Magnitudes as a `frames x bins` matrix
    pub fn magnitude_matrix(&self) -> Array2<f64> {
        let bins = self.num_bins();
        let mut matrix = Array2::zeros((self.frames.len(), bins));
        for (mut row, frame) in matrix.rows_mut().into_iter().zip(&self.frames) {
            for (dst, mag) in row.iter_mut().zip(to_magnitude(frame)) {
                *dst = mag;
            }
        }
        matrix
    }

    /// Magnitude of one bin across all frames, in time order
    pub fn bin_trace(&self, bin: usize) -> Vec<f64> {
        self.frames
            .iter()
            .map(|frame| frame.get(bin).map_or(0.0, |c| c.norm()))
            .collect()
    }
}

/// Overlap-segment transform engine
pub struct Stft {
    config: StftConfig,
    window: Vec<f64>,
    fft: Fft,
}

impl Stft {
    /// Precompute the window and the frame transform
    ///
    /// `frame_length` must be even and at least 2, and
    /// `frame_length + zero_padding` a power of two.
    pub fn new(config: StftConfig) -> Result<Self> {
        if config.frame_length < 2 || config.frame_length % 2 != 0 {
            return Err(SpectraError::InvalidLength {
                input_length: config.frame_length,
                zero_padding: config.zero_padding,
                total_length: config.frame_length + config.zero_padding,
                reason: "STFT frames need an even length of at least two samples",
            });
        }
        let fft = Fft::new(config.frame_length, config.zero_padding)?;
        let window = window::coefficients(config.window_type, config.frame_length);

        Ok(Self {
            config,
            window,
            fft,
        })
    }

    pub fn config(&self) -> &StftConfig {
        &self.config
    }

    /// Number of fully contained frames for a signal of `len` samples
    pub fn frame_count(&self, len: usize) -> usize {
        (len / (self.config.frame_length / 2)).saturating_sub(1)
    }

    /// Transform every 50%-overlapped frame of `wavein`
    pub fn direct(&self, wavein: &[f64]) -> Result<StftResult> {
        let frame_length = self.config.frame_length;
        let hop = frame_length / 2;
        let num_frames = self.frame_count(wavein.len());
        trace!("STFT: {} samples -> {} frames of {}", wavein.len(), num_frames, frame_length);

        let frames = (0..num_frames)
            .map(|i| {
                let slice = &wavein[i * hop..i * hop + frame_length];
                self.fft.direct(&window::multiply(slice, &self.window))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(StftResult {
            frames,
            frame_length,
            zero_padding: self.config.zero_padding,
            window_type: self.config.window_type,
        })
    }

    /// Overlap-add reconstruction of `stft`
    ///
    /// Output length is `(frames + 1) * hop`. Each frame's inverse is trimmed
    /// to `frame_length` samples before it is added at `index * hop`. With
    /// zero padding the output carries a gain of `(frame + padding) / frame`.
    pub fn inverse(&self, stft: &StftResult) -> Result<Vec<f64>> {
        if stft.frame_length != self.config.frame_length
            || stft.zero_padding != self.config.zero_padding
        {
            return Err(SpectraError::LayoutMismatch {
                frame_length: stft.frame_length,
                zero_padding: stft.zero_padding,
                expected_frame_length: self.config.frame_length,
                expected_zero_padding: self.config.zero_padding,
            });
        }
        if stft.is_empty() {
            return Ok(Vec::new());
        }

        let frame_length = self.config.frame_length;
        let hop = frame_length / 2;
        let expected = self.fft.config().half_length();
        let mut waveout = vec![0.0; (stft.len() + 1) * hop];

        for (index, spectrum) in stft.frames.iter().enumerate() {
            if spectrum.len() != expected {
                return Err(SpectraError::FrameMismatch {
                    index,
                    actual: spectrum.len(),
                    expected,
                });
            }

            let slice = self.fft.inverse(spectrum)?;
            let offset = index * hop;
            for (out, sample) in waveout[offset..offset + frame_length]
                .iter_mut()
                .zip(&slice)
            {
                *out += sample.re;
            }
        }

        Ok(waveout)
    }
}
