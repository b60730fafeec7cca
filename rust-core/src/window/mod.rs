//! Window functions for spectral analysis
//!
//! Every cosine-series window is evaluated on the periodic grid
//! `z = 2πn/N`, so the coefficient tuples below are the published
//! flat-top / minimum-sidelobe designs taken verbatim.

pub mod scale;

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

pub use scale::{nenbw, noise, signal, signal_for};

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowType {
    /// No windowing, identical to [`WindowType::Rectangular`]
    None,

    /// w[n] = 1
    Rectangular,

    /// w[n] = 1 - (2n/N - 1)²
    Welch,

    /// w[n] = 2/N * (N/2 - |n - (N-1)/2|)
    Bartlett,

    /// Alias of [`WindowType::Hann`]
    Hanning,

    /// 0.5 - 0.5*cos(z), constant overlap-add at 50% hop
    Hann,

    /// 0.54 - 0.46*cos(z)
    Hamming,

    Nuttall3,
    Nuttall4,
    Nuttall3A,
    Nuttall3B,
    Nuttall4A,

    /// Blackman-Harris, 92 dB
    Bh92,
    Nuttall4B,

    Sft3F,
    Sft3M,
    Ftni,
    Sft4F,
    Sft5F,
    Sft4M,
    Fthp,
    Hft70,
    Ftsrs,
    Sft5M,
    Hft90D,
    Hft95,
    Hft116D,
    Hft144D,
    Hft169D,
    Hft196D,
    Hft223D,
    Hft248D,
}

impl WindowType {
    pub const ALL: [WindowType; 32] = [
        WindowType::None,
        WindowType::Rectangular,
        WindowType::Welch,
        WindowType::Bartlett,
        WindowType::Hanning,
        WindowType::Hann,
        WindowType::Hamming,
        WindowType::Nuttall3,
        WindowType::Nuttall4,
        WindowType::Nuttall3A,
        WindowType::Nuttall3B,
        WindowType::Nuttall4A,
        WindowType::Bh92,
        WindowType::Nuttall4B,
        WindowType::Sft3F,
        WindowType::Sft3M,
        WindowType::Ftni,
        WindowType::Sft4F,
        WindowType::Sft5F,
        WindowType::Sft4M,
        WindowType::Fthp,
        WindowType::Hft70,
        WindowType::Ftsrs,
        WindowType::Sft5M,
        WindowType::Hft90D,
        WindowType::Hft95,
        WindowType::Hft116D,
        WindowType::Hft144D,
        WindowType::Hft169D,
        WindowType::Hft196D,
        WindowType::Hft223D,
        WindowType::Hft248D,
    ];

    /// Cosine series terms `c_0..c_k` of `Σ c_i·cos(i·z)`
    ///
    /// Returns `None` for the windows that are not a cosine series
    /// (rectangular, Welch, Bartlett).
    pub fn cosine_terms(&self) -> Option<&'static [f64]> {
        let terms: &'static [f64] = match self {
            WindowType::None | WindowType::Rectangular | WindowType::Welch | WindowType::Bartlett => {
                return None
            }
            WindowType::Hann | WindowType::Hanning => &[0.5, -0.5],
            WindowType::Hamming => &[0.54, -0.46],
            WindowType::Bh92 => &[0.35875, -0.48829, 0.14128, -0.01168],
            WindowType::Nuttall3 => &[0.375, -0.5, 0.125],
            WindowType::Nuttall3A => &[0.40897, -0.5, 0.09103],
            WindowType::Nuttall3B => &[0.4243801, -0.4973406, 0.0782793],
            WindowType::Nuttall4 => &[0.3125, -0.46875, 0.1875, -0.03125],
            WindowType::Nuttall4A => &[0.338946, -0.481973, 0.161054, -0.018027],
            WindowType::Nuttall4B => &[0.355768, -0.487396, 0.144232, -0.012604],
            WindowType::Sft3F => &[0.26526, -0.5, 0.23474],
            WindowType::Sft4F => &[0.21706, -0.42103, 0.28294, -0.07897],
            WindowType::Sft5F => &[0.1881, -0.36923, 0.28702, -0.13077, 0.02488],
            WindowType::Sft3M => &[0.28235, -0.52105, 0.19659],
            WindowType::Sft4M => &[0.241906, -0.460841, 0.255381, -0.041872],
            WindowType::Sft5M => &[0.209671, -0.407331, 0.281225, -0.092669, 0.0091036],
            WindowType::Ftni => &[0.2810639, -0.5208972, 0.1980399],
            WindowType::Fthp => &[1.0, -1.912510941, 1.079173272, -0.1832630879],
            WindowType::Hft70 => &[1.0, -1.90796, 1.07349, -0.18199],
            WindowType::Ftsrs => &[1.0, -1.93, 1.29, -0.388, 0.028],
            WindowType::Hft90D => &[1.0, -1.942604, 1.340318, -0.440811, 0.043097],
            WindowType::Hft95 => &[1.0, -1.9383379, 1.3045202, -0.4028270, 0.0350665],
            WindowType::Hft116D => &[
                1.0, -1.9575375, 1.4780705, -0.6367431, 0.1228389, -0.0066288,
            ],
            WindowType::Hft144D => &[
                1.0, -1.96760033, 1.57983607, -0.81123644, 0.22583558, -0.02773848, 0.00090360,
            ],
            WindowType::Hft169D => &[
                1.0, -1.97441842, 1.65409888, -0.95788186, 0.33673420, -0.06364621, 0.00521942,
                -0.00010599,
            ],
            WindowType::Hft196D => &[
                1.0, -1.979280420, 1.710288951, -1.081629853, 0.448734314, -0.112376628,
                0.015122992, -0.000871252, 0.000011896,
            ],
            WindowType::Hft223D => &[
                1.0, -1.98298997309, 1.75556083063, -1.19037717712, 0.56155440797,
                -0.17296769663, 0.03233247087, -0.00324954578, 0.00013801040, -0.00000132725,
            ],
            WindowType::Hft248D => &[
                1.0, -1.985844164102, 1.791176438506, -1.282075284005, 0.667777530266,
                -0.240160796576, 0.056656381764, -0.008134974479, 0.000624544650,
                -0.000019808998, 0.000000132974,
            ],
        };
        Some(terms)
    }

    /// Conventional name of the window
    pub fn name(&self) -> &'static str {
        match self {
            WindowType::None => "None",
            WindowType::Rectangular => "Rectangular",
            WindowType::Welch => "Welch",
            WindowType::Bartlett => "Bartlett",
            WindowType::Hanning => "Hanning",
            WindowType::Hann => "Hann",
            WindowType::Hamming => "Hamming",
            WindowType::Nuttall3 => "Nuttall3",
            WindowType::Nuttall4 => "Nuttall4",
            WindowType::Nuttall3A => "Nuttall3A",
            WindowType::Nuttall3B => "Nuttall3B",
            WindowType::Nuttall4A => "Nuttall4A",
            WindowType::Bh92 => "BH92",
            WindowType::Nuttall4B => "Nuttall4B",
            WindowType::Sft3F => "SFT3F",
            WindowType::Sft3M => "SFT3M",
            WindowType::Ftni => "FTNI",
            WindowType::Sft4F => "SFT4F",
            WindowType::Sft5F => "SFT5F",
            WindowType::Sft4M => "SFT4M",
            WindowType::Fthp => "FTHP",
            WindowType::Hft70 => "HFT70",
            WindowType::Ftsrs => "FTSRS",
            WindowType::Sft5M => "SFT5M",
            WindowType::Hft90D => "HFT90D",
            WindowType::Hft95 => "HFT95",
            WindowType::Hft116D => "HFT116D",
            WindowType::Hft144D => "HFT144D",
            WindowType::Hft169D => "HFT169D",
            WindowType::Hft196D => "HFT196D",
            WindowType::Hft223D => "HFT223D",
            WindowType::Hft248D => "HFT248D",
        }
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown window name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWindow(pub String);

impl fmt::Display for UnknownWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown window type: {}", self.0)
    }
}

impl std::error::Error for UnknownWindow {}

impl FromStr for WindowType {
    type Err = UnknownWindow;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WindowType::ALL
            .iter()
            .copied()
            .find(|w| w.name().eq_ignore_ascii_case(s))
            // accept the common misspelling "Nutall"
            .or_else(|| {
                let fixed = s.to_ascii_lowercase().replace("nutall", "nuttall");
                WindowType::ALL
                    .iter()
                    .copied()
                    .find(|w| w.name().eq_ignore_ascii_case(&fixed))
            })
            .ok_or_else(|| UnknownWindow(s.to_string()))
    }
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (N)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..N-1
pub fn coefficients(window_type: WindowType, length: usize) -> Vec<f64> {
    let n_len = length as f64;

    match window_type {
        WindowType::None | WindowType::Rectangular => vec![1.0; length],

        WindowType::Bartlett => (0..length)
            .map(|n| 2.0 / n_len * (n_len / 2.0 - (n as f64 - (n_len - 1.0) / 2.0).abs()))
            .collect(),

        WindowType::Welch => (0..length)
            .map(|n| 1.0 - ((2.0 * n as f64) / n_len - 1.0).powi(2))
            .collect(),

        other => {
            // Every remaining type is a cosine series
            let terms = other.cosine_terms().unwrap_or(&[1.0]);
            cosine_series(terms, length)
        }
    }
}

/// Evaluate `Σ c_i·cos(i·z)` with `z = 2πn/N`
fn cosine_series(terms: &[f64], length: usize) -> Vec<f64> {
    let n_len = length as f64;
    (0..length)
        .map(|n| {
            let z = 2.0 * PI * n as f64 / n_len;
            terms
                .iter()
                .enumerate()
                .map(|(i, &c)| c * (i as f64 * z).cos())
                .sum()
        })
        .collect()
}

/// Apply window to signal
///
/// # Returns
/// Windowed signal
pub fn apply_window(signal: &[f64], window_type: WindowType) -> Vec<f64> {
    let window = coefficients(window_type, signal.len());
    multiply(signal, &window)
}

/// Apply window in-place
pub fn apply_window_inplace(signal: &mut [f64], window_type: WindowType) {
    let window = coefficients(window_type, signal.len());

    for (s, w) in signal.iter_mut().zip(window.iter()) {
        *s *= w;
    }
}

/// Elementwise product of a signal and precomputed coefficients
pub fn multiply(signal: &[f64], window: &[f64]) -> Vec<f64> {
    signal
        .iter()
        .zip(window.iter())
        .map(|(&s, &w)| s * w)
        .collect()
}

/// Time span in seconds covered by `points` samples at `sample_rate`
pub fn duration(points: usize, sample_rate: f64) -> f64 {
    points as f64 / sample_rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rectangular_window() {
        let window = coefficients(WindowType::Rectangular, 100);
        assert_eq!(window.len(), 100);
        assert!(window.iter().all(|&w| w == 1.0));

        let none = coefficients(WindowType::None, 100);
        assert_eq!(window, none);
    }

    #[test]
    fn test_hann_is_periodic() {
        let n = 64;
        let hann = coefficients(WindowType::Hann, n);

        // Periodic grid: w[0] = 0, peak of 1.0 at N/2, no sample at 2π
        assert_abs_diff_eq!(hann[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hann[n / 2], 1.0, epsilon = 1e-12);

        // 50% overlap sums to one
        for i in 0..n / 2 {
            assert_abs_diff_eq!(hann[i] + hann[i + n / 2], 1.0, epsilon = 1e-12);
        }

        assert_eq!(hann, coefficients(WindowType::Hanning, n));
    }

    #[test]
    fn test_hamming_endpoints() {
        let hamming = coefficients(WindowType::Hamming, 100);
        assert_abs_diff_eq!(hamming[0], 0.08, epsilon = 1e-12);
        assert_abs_diff_eq!(hamming[50], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bartlett_and_welch() {
        let n = 9;
        let bartlett = coefficients(WindowType::Bartlett, n);
        let welch = coefficients(WindowType::Welch, n);

        // Bartlett centre: 2/N * N/2 = 1
        assert_abs_diff_eq!(bartlett[4], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bartlett[0], 2.0 / 9.0 * (4.5 - 4.0), epsilon = 1e-12);
        assert_abs_diff_eq!(bartlett[0], bartlett[8], epsilon = 1e-12);

        // Welch starts at 0 and is not symmetric on the periodic grid
        assert_abs_diff_eq!(welch[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(welch[4], 1.0 - (8.0 / 9.0 - 1.0_f64).powi(2), epsilon = 1e-12);
    }

    #[test]
    fn test_flat_top_coefficients() {
        let n = 1000;
        let fthp = coefficients(WindowType::Fthp, n);

        // Sum of all terms at the centre of the period
        let terms = WindowType::Fthp.cosine_terms().unwrap();
        let centre: f64 = terms
            .iter()
            .enumerate()
            .map(|(i, c)| if i % 2 == 0 { *c } else { -*c })
            .sum();
        assert_abs_diff_eq!(fthp[n / 2], centre, epsilon = 1e-12);

        // Start of the period is the plain sum
        let start: f64 = terms.iter().sum();
        assert_abs_diff_eq!(fthp[0], start, epsilon = 1e-12);
    }

    #[test]
    fn test_every_window_has_requested_length() {
        for window in WindowType::ALL {
            assert_eq!(coefficients(window, 37).len(), 37, "{}", window);
            assert!(coefficients(window, 0).is_empty());
        }
    }

    #[test]
    fn test_hft248d_has_eleven_terms() {
        assert_eq!(WindowType::Hft248D.cosine_terms().unwrap().len(), 11);
        assert!(WindowType::Welch.cosine_terms().is_none());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("hann".parse::<WindowType>().unwrap(), WindowType::Hann);
        assert_eq!("HFT248D".parse::<WindowType>().unwrap(), WindowType::Hft248D);
        assert_eq!("Nutall4B".parse::<WindowType>().unwrap(), WindowType::Nuttall4B);
        assert!("kaiser".parse::<WindowType>().is_err());

        for window in WindowType::ALL {
            assert_eq!(window.to_string().parse::<WindowType>().unwrap(), window);
        }
    }

    #[test]
    fn test_apply_window() {
        let signal = vec![2.0; 100];
        let windowed = apply_window(&signal, WindowType::Hamming);

        assert_eq!(windowed.len(), 100);
        assert_abs_diff_eq!(windowed[50], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(windowed[0], 0.16, epsilon = 1e-12);

        let mut inplace = signal.clone();
        apply_window_inplace(&mut inplace, WindowType::Hamming);
        assert_eq!(windowed, inplace);
    }
}
