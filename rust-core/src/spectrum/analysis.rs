//! Aggregate measurements over converted spectra
//!
//! RMS and mean skip a number of bins at each edge so that DC leakage and
//! window skirts do not bias a noise-floor estimate.

use std::f64::consts::PI;

/// Default number of bins excluded at each edge
pub const DEFAULT_EDGE_BINS: usize = 10;

/// Values retained after dropping `start_bin` leading and `stop_bin` trailing bins
fn retained(data: &[f64], start_bin: usize, stop_bin: usize) -> &[f64] {
    let end = data.len().saturating_sub(stop_bin);
    if start_bin >= end {
        &[]
    } else {
        &data[start_bin..end]
    }
}

/// RMS of `data` between the edge exclusions, `None` if nothing remains
pub fn find_rms(data: &[f64], start_bin: usize, stop_bin: usize) -> Option<f64> {
    let kept = retained(data, start_bin, stop_bin);
    if kept.is_empty() {
        return None;
    }
    let mean_square = kept.iter().map(|&x| x * x).sum::<f64>() / kept.len() as f64;
    Some(mean_square.sqrt())
}

/// Mean of `data` between the edge exclusions, `None` if nothing remains
pub fn find_mean(data: &[f64], start_bin: usize, stop_bin: usize) -> Option<f64> {
    let kept = retained(data, start_bin, stop_bin);
    if kept.is_empty() {
        return None;
    }
    Some(kept.iter().sum::<f64>() / kept.len() as f64)
}

/// Largest value; the first one wins on ties
pub fn find_max_amplitude(data: &[f64]) -> Option<f64> {
    find_max_position(data).map(|i| data[i])
}

/// Index of the largest value; the first one wins on ties
pub fn find_max_position(data: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &value) in data.iter().enumerate() {
        match best {
            Some((_, max)) if value <= max || value.is_nan() => {}
            _ if value.is_nan() => {}
            _ => best = Some((i, value)),
        }
    }
    best.map(|(i, _)| i)
}

/// Frequency from `span` at the position of the largest value in `data`
pub fn find_max_frequency(data: &[f64], span: &[f64]) -> Option<f64> {
    find_max_position(data).and_then(|i| span.get(i).copied())
}

/// Remove ±360° jumps from a phase trace in degrees
pub fn unwrap_phase_degrees(phase: &[f64]) -> Vec<f64> {
    unwrap(phase, 180.0)
}

/// Remove ±2π jumps from a phase trace in radians
pub fn unwrap_phase_radians(phase: &[f64]) -> Vec<f64> {
    unwrap(phase, PI)
}

/// Single forward pass: when consecutive samples differ by at least half a
/// turn, every later sample is shifted by a full turn. The direction follows
/// the sign of the (already corrected) earlier sample.
fn unwrap(phase: &[f64], half_turn: f64) -> Vec<f64> {
    let full_turn = 2.0 * half_turn;
    let mut unwrapped: Vec<f64> = Vec::with_capacity(phase.len());
    let mut offset = 0.0;

    for (i, &raw) in phase.iter().enumerate() {
        if i > 0 {
            let prev = unwrapped[i - 1];
            if (prev - (raw + offset)).abs() >= half_turn {
                offset += if prev < 0.0 { -full_turn } else { full_turn };
            }
        }
        unwrapped.push(raw + offset);
    }
    unwrapped
}
