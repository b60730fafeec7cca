//! Discrete Fourier transform of arbitrary length
//!
//! Bins are independent, so they are accumulated in parallel with rayon.
//! For moderate lengths the scaled cosine/sine terms are precomputed once;
//! when the tables cannot be allocated the engine falls back to evaluating
//! the trigonometric terms per element. The two paths give the same result.

use super::{scale_edge_bins, Spectrum, Transform, TransformConfig};
use crate::error::Result;
use log::{debug, warn};
use num_complex::Complex64;
use rayon::prelude::*;
use std::f64::consts::PI;

/// Upper bound on entries per precomputed table (2 tables of f64, 32 MB each)
pub const MAX_CACHE_ENTRIES: usize = 1 << 22;

/// Precomputed `cos(2πjk/n)·scale` and `sin(2πjk/n)·scale`, row-major by bin
struct TrigCache {
    cos: Vec<f64>,
    sin: Vec<f64>,
}

impl TrigCache {
    fn build(config: &TransformConfig) -> Option<Self> {
        let n = config.total_length();
        let m = config.half_length();

        let entries = match m.checked_mul(n) {
            Some(entries) if entries <= MAX_CACHE_ENTRIES => entries,
            _ => {
                warn!(
                    "DFT cache of {}x{} exceeds {} entries, using uncached DFT",
                    m, n, MAX_CACHE_ENTRIES
                );
                return None;
            }
        };

        let mut cos = Vec::new();
        let mut sin = Vec::new();
        if cos.try_reserve_exact(entries).is_err() || sin.try_reserve_exact(entries).is_err() {
            warn!("DFT cache allocation of {} entries failed, using uncached DFT", entries);
            return None;
        }
        cos.resize(entries, 0.0);
        sin.resize(entries, 0.0);

        let step = 2.0 * PI / n as f64;
        let scale = config.scale_factor();
        cos.par_chunks_mut(n)
            .zip(sin.par_chunks_mut(n))
            .enumerate()
            .for_each(|(j, (cos_row, sin_row))| {
                let a = j as f64 * step;
                for (k, (c, s)) in cos_row.iter_mut().zip(sin_row.iter_mut()).enumerate() {
                    let (sin_ak, cos_ak) = (a * k as f64).sin_cos();
                    *c = cos_ak * scale;
                    *s = sin_ak * scale;
                }
            });

        Some(Self { cos, sin })
    }

    fn bin(&self, j: usize, input: &[f64]) -> Complex64 {
        let n = input.len();
        let cos_row = &self.cos[j * n..(j + 1) * n];
        let sin_row = &self.sin[j * n..(j + 1) * n];

        let mut re = 0.0;
        let mut im = 0.0;
        for ((&x, &c), &s) in input.iter().zip(cos_row).zip(sin_row) {
            re += x * c;
            im -= x * s;
        }
        Complex64::new(re, im)
    }
}

/// Brute-force DFT engine with optional trigonometric cache
pub struct Dft {
    config: TransformConfig,
    cache: Option<TrigCache>,
}

impl Dft {
    /// Create a DFT for `input_length` samples plus `zero_padding` zeros
    ///
    /// # Arguments
    /// * `input_length` - Samples per call (N)
    /// * `zero_padding` - Zeros appended after the samples (Z)
    /// * `force_no_cache` - Skip the precomputed tables even when they fit
    pub fn new(input_length: usize, zero_padding: usize, force_no_cache: bool) -> Result<Self> {
        let config = TransformConfig::new(input_length, zero_padding)?;
        let cache = if force_no_cache {
            None
        } else {
            TrigCache::build(&config)
        };

        debug!(
            "DFT initialised: N={} Z={} total={} half={} scale={:e} cached={}",
            config.input_length(),
            config.zero_padding(),
            config.total_length(),
            config.half_length(),
            config.scale_factor(),
            cache.is_some()
        );

        Ok(Self { config, cache })
    }

    /// Replace the configuration, discarding any previous cache
    pub fn initialize(
        &mut self,
        input_length: usize,
        zero_padding: usize,
        force_no_cache: bool,
    ) -> Result<()> {
        *self = Self::new(input_length, zero_padding, force_no_cache)?;
        Ok(())
    }

    /// True when the precomputed sine/cosine tables are in use
    pub fn is_using_cache(&self) -> bool {
        self.cache.is_some()
    }

    /// Compute the scaled one-sided spectrum of `time_series`
    pub fn execute(&self, time_series: &[f64]) -> Result<Spectrum> {
        self.config.check_input(time_series.len())?;

        let n = self.config.total_length();
        let m = self.config.half_length();

        // Account for zero padding in the size of the input
        let mut input = vec![0.0; n];
        input[..time_series.len()].copy_from_slice(time_series);

        let mut spectrum: Spectrum = match &self.cache {
            Some(cache) => (0..m)
                .into_par_iter()
                .map(|j| cache.bin(j, &input))
                .collect(),
            None => {
                let step = 2.0 * PI / n as f64;
                let scale = self.config.scale_factor();
                (0..m)
                    .into_par_iter()
                    .map(|j| brute_force_bin(&input, j as f64 * step, scale))
                    .collect()
            }
        };

        scale_edge_bins(&mut spectrum, m);
        Ok(spectrum)
    }
}

fn brute_force_bin(input: &[f64], a: f64, scale: f64) -> Complex64 {
    let mut re = 0.0;
    let mut im = 0.0;
    for (k, &x) in input.iter().enumerate() {
        let (sin_ak, cos_ak) = (a * k as f64).sin_cos();
        re += x * cos_ak * scale;
        im -= x * sin_ak * scale;
    }
    Complex64::new(re, im)
}

impl Transform for Dft {
    fn config(&self) -> &TransformConfig {
        &self.config
    }

    fn direct(&self, time_series: &[f64]) -> Result<Spectrum> {
        self.execute(time_series)
    }
}
