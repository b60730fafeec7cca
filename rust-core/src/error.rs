//! Error types shared by the transform, window and STFT engines

use thiserror::Error;

/// Errors raised by transform configuration and execution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpectraError {
    #[error("invalid transform length: input {input_length} + zero padding {zero_padding} = {total_length} ({reason})")]
    InvalidLength {
        input_length: usize,
        zero_padding: usize,
        total_length: usize,
        reason: &'static str,
    },

    #[error("input of {actual} samples exceeds the configured transform length of {max}")]
    InputTooLong { actual: usize, max: usize },

    #[error("spectrum has {actual} bins, expected {half_length} (one-sided) or {total_length} (full)")]
    SpectrumLength {
        actual: usize,
        half_length: usize,
        total_length: usize,
    },

    #[error("STFT result was built for frame {frame_length} + padding {zero_padding}, engine uses {expected_frame_length} + {expected_zero_padding}")]
    LayoutMismatch {
        frame_length: usize,
        zero_padding: usize,
        expected_frame_length: usize,
        expected_zero_padding: usize,
    },

    #[error("STFT frame {index} has {actual} bins, expected {expected}")]
    FrameMismatch {
        index: usize,
        actual: usize,
        expected: usize,
    },
}

pub type Result<T> = std::result::Result<T, SpectraError>;
