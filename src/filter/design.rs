//! Lanczos low-pass FIR design (Duchon 1979).
//!
//! For a cutoff `fc` (cycles per sample) and half-width `N` the filter has
//! `2N + 1` taps:
//!   • centre tap           w[0]  = 2·fc
//!   • ideal sinc           σ_k   = sin(2π·fc·k) / (π·k)
//!   • Lanczos sigma factor L_k   = sin(π·k/N) / (π·k/N)
//!   • tapered tap          w[±k] = σ_k · L_k
//!   • normalised so Σ w = 1 (unit DC gain)
use std::f64::consts::PI;

use crate::error::{FilterError, Result};

/// Convert a period into a cutoff frequency in cycles per sample.
///
/// `sampling_interval` and `period` must be in the same unit (hours/hours,
/// days/days). The result must satisfy Nyquist: `0 < fc < 0.5`, i.e. the
/// period has to span more than two samples.
pub fn cutoff_from_period(sampling_interval: f64, period: f64) -> Result<f64> {
    if !(sampling_interval.is_finite() && sampling_interval > 0.0) {
        return Err(FilterError::InvalidParameter(format!(
            "sampling interval must be finite and > 0, got {sampling_interval}"
        )));
    }
    if !(period.is_finite() && period > 0.0) {
        return Err(FilterError::InvalidParameter(format!(
            "period must be finite and > 0, got {period}"
        )));
    }
    let fc = sampling_interval / period;
    check_cutoff(fc)?;
    Ok(fc)
}

/// Half-width for a filter sized by its window length.
///
/// `N = (window − 1) / 2 + 1`, so a 50-sample window gives `N = 25`
/// (51 taps).
pub fn half_width_for_window(window: usize) -> Result<usize> {
    if window == 0 {
        return Err(FilterError::InvalidParameter(
            "window length must be >= 1".into(),
        ));
    }
    Ok((window - 1) / 2 + 1)
}

/// Lanczos sigma factor for offset `k` of a half-width `n` window.
///
/// `sin(πk/n) / (πk/n)`, equal to 1 at `k = 0` and 0 at `k = n`.
pub fn lanczos_sigma(k: usize, n: usize) -> f64 {
    if k == 0 {
        return 1.0;
    }
    let x = PI * k as f64 / n as f64;
    x.sin() / x
}

/// Weights of a Lanczos low-pass filter, ordered from offset −N to +N.
///
/// Returns `2N + 1` weights that are exactly symmetric and sum to 1.
///
/// # Errors
///
/// [`FilterError::InvalidParameter`] when `fc` is not in (0, 0.5) or
/// `half_width` is 0.
///
/// # Examples
///
/// ```
/// let w = tcseed::generate_weights(0.1, 2).unwrap();
/// assert_eq!(w.len(), 5);
/// assert_eq!(w[0], w[4]);
/// assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12);
/// ```
pub fn generate_weights(fc: f64, half_width: usize) -> Result<Vec<f64>> {
    check_cutoff(fc)?;
    if half_width < 1 {
        return Err(FilterError::InvalidParameter(
            "half_width must be >= 1".into(),
        ));
    }
    let n = half_width;

    // Offsets 0..=N; the negative side is a mirror copy.
    let half: Vec<f64> = (0..=n)
        .map(|k| {
            if k == 0 {
                2.0 * fc
            } else {
                let kf = k as f64;
                let sinc = (2.0 * PI * fc * kf).sin() / (PI * kf);
                sinc * lanczos_sigma(k, n)
            }
        })
        .collect();

    let mut w: Vec<f64> = Vec::with_capacity(2 * n + 1);
    w.extend(half[1..].iter().rev());
    w.extend_from_slice(&half);

    let s: f64 = w.iter().sum();
    if !(s.is_finite() && s != 0.0) {
        return Err(FilterError::InvalidParameter(format!(
            "weights for fc={fc}, N={n} cannot be normalised (sum = {s})"
        )));
    }
    w.iter_mut().for_each(|v| *v /= s);
    Ok(w)
}

/// Real frequency response `R(f) = Σ_j w_j · cos(2π·f·(j − N))` of a
/// symmetric weight vector at `f` cycles per sample.
///
/// For a low-pass filter `R(0) = 1` and `R(f) ≈ 0` well above the cutoff.
pub fn frequency_response(weights: &[f64], f: f64) -> f64 {
    let n = (weights.len() / 2) as f64;
    weights
        .iter()
        .enumerate()
        .map(|(j, &w)| w * (2.0 * PI * f * (j as f64 - n)).cos())
        .sum()
}

fn check_cutoff(fc: f64) -> Result<()> {
    if !(fc > 0.0 && fc < 0.5) {
        return Err(FilterError::InvalidParameter(format!(
            "cutoff frequency must lie in (0, 0.5) cycles/sample, got {fc}"
        )));
    }
    Ok(())
}
