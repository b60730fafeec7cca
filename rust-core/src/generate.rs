//! Test signal generation
//!
//! Tone amplitudes are given in Vrms, so a tone of amplitude `a` has peak
//! `sqrt(2)·a` and reads back as `a` from a scaled spectrum. Noise sources
//! take the random generator explicitly.

use rand::Rng;
use std::f64::consts::{PI, SQRT_2};

/// `points` values linearly spaced from `start` to `stop` inclusive
pub fn lin_space(start: f64, stop: f64, points: usize) -> Vec<f64> {
    if points < 2 {
        return vec![start; points];
    }
    let increment = (stop - start) / (points - 1) as f64;
    (0..points).map(|i| start + increment * i as f64).collect()
}

/// Sine tone defined by sampling rate
///
/// # Arguments
/// * `amplitude_vrms` - RMS amplitude
/// * `frequency_hz` - Tone frequency
/// * `sample_rate` - Sampling rate in Hz
/// * `points` - Number of samples
/// * `dc` - DC offset added to every sample
/// * `phase_deg` - Starting phase in degrees
pub fn tone_sampling(
    amplitude_vrms: f64,
    frequency_hz: f64,
    sample_rate: f64,
    points: usize,
    dc: f64,
    phase_deg: f64,
) -> Vec<f64> {
    let phase = phase_deg.to_radians();
    (0..points)
        .map(|i| {
            let time = i as f64 / sample_rate;
            SQRT_2 * amplitude_vrms * (2.0 * PI * time * frequency_hz + phase).sin() + dc
        })
        .collect()
}

/// Sine tone with an exact number of cycles across `points` samples
pub fn tone_cycles(amplitude_vrms: f64, cycles: f64, points: usize, dc: f64, phase_deg: f64) -> Vec<f64> {
    let phase = phase_deg.to_radians();
    let peak = SQRT_2 * amplitude_vrms;
    (0..points)
        .map(|i| peak * (2.0 * PI * i as f64 / points as f64 * cycles + phase).sin() + dc)
        .collect()
}

/// Unit-peak sine with phase in radians
pub fn sine(frequency_hz: f64, sample_rate: f64, points: usize, phase: f64) -> Vec<f64> {
    (0..points)
        .map(|i| (2.0 * PI * frequency_hz * i as f64 / sample_rate + phase).sin())
        .collect()
}

/// Gaussian noise with spectral density `amplitude_psd` (Vrms/√Hz)
pub fn noise_psd<R: Rng + ?Sized>(
    rng: &mut R,
    amplitude_psd: f64,
    sample_rate: f64,
    points: usize,
) -> Vec<f64> {
    let rms = amplitude_psd * (sample_rate / 2.0).sqrt();
    noise_rms(rng, rms, points, 0.0)
}

/// Zero-mean Gaussian noise of `amplitude_vrms`, plus a DC offset
pub fn noise_rms<R: Rng + ?Sized>(rng: &mut R, amplitude_vrms: f64, points: usize, dc: f64) -> Vec<f64> {
    let mut data: Vec<f64> = (0..points)
        .map(|_| gaussian(rng) * amplitude_vrms)
        .collect();

    if points > 0 {
        let mean = data.iter().sum::<f64>() / points as f64;
        for x in data.iter_mut() {
            *x += dc - mean;
        }
    }
    data
}

/// Standard normal sample, polar method (Marsaglia 1962)
fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let v1 = 2.0 * rng.random::<f64>() - 1.0;
        let v2 = 2.0 * rng.random::<f64>() - 1.0;
        let s = v1 * v1 + v2 * v2;
        if s >= 1.0 {
            continue;
        }
        if s == 0.0 {
            return 0.0;
        }
        return v1 * (-2.0 * s.ln() / s).sqrt();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_lin_space() {
        let v = lin_space(-1.0, 1.0, 5);
        assert_eq!(v, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(lin_space(3.0, 4.0, 1), vec![3.0]);
    }

    #[test]
    fn test_tone_rms() {
        let tone = tone_cycles(2.0, 10.0, 1000, 0.0, 0.0);
        let rms = (tone.iter().map(|x| x * x).sum::<f64>() / tone.len() as f64).sqrt();
        assert_abs_diff_eq!(rms, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tone_sampling_phase_and_dc() {
        let tone = tone_sampling(1.0, 1000.0, 48000.0, 10, 0.5, 90.0);
        assert_abs_diff_eq!(tone[0], SQRT_2 + 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_noise_statistics() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let noise = noise_rms(&mut rng, 0.5, 50_000, 1.0);

        let mean = noise.iter().sum::<f64>() / noise.len() as f64;
        let var = noise.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / noise.len() as f64;

        assert_abs_diff_eq!(mean, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(var.sqrt(), 0.5, epsilon = 0.01);
    }

    #[test]
    fn test_noise_is_reproducible_with_seed() {
        let a = noise_psd(&mut ChaCha8Rng::seed_from_u64(42), 1e-6, 2000.0, 64);
        let b = noise_psd(&mut ChaCha8Rng::seed_from_u64(42), 1e-6, 2000.0, 64);
        assert_eq!(a, b);
    }
}
