//! Band-pass as the difference of two Lanczos low-pass filters.
//!
//! Both low-pass filters share the same half-width so their outputs are
//! trimmed identically and can be subtracted index for index:
//!
//! ```text
//! low_long  = lowpass(series, fc = dt / period_long)
//! low_short = lowpass(series, fc = dt / period_short)
//! bandpass  = low_long − low_short
//! ```
use ndarray::{Array, ArrayBase, Axis, Data, Dimension};

use crate::config::BandpassConfig;
use crate::error::{FilterError, Result};
use crate::filter::{apply_filter, apply_filter_axis, cutoff_from_period, generate_weights};

/// A ready-to-apply pair of low-pass weight vectors.
///
/// Construction does all parameter validation; the weights are read-only
/// afterwards and can be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Bandpass {
    weights_short: Vec<f64>,
    weights_long: Vec<f64>,
    half_width: usize,
}

impl Bandpass {
    /// Design the two low-pass filters for the band `(period_short, period_long)`.
    ///
    /// `sampling_interval` and the periods must share a unit.
    pub fn new(
        sampling_interval: f64,
        period_short: f64,
        period_long: f64,
        half_width: usize,
    ) -> Result<Self> {
        if !(period_short < period_long) {
            return Err(FilterError::InvalidParameter(format!(
                "period_short ({period_short}) must be < period_long ({period_long})"
            )));
        }
        let fc_short = cutoff_from_period(sampling_interval, period_short)?;
        let fc_long = cutoff_from_period(sampling_interval, period_long)?;
        let weights_short = generate_weights(fc_short, half_width)?;
        let weights_long = generate_weights(fc_long, half_width)?;
        log::debug!(
            "band-pass {period_short}..{period_long} @ dt={sampling_interval}: \
             fc_short={fc_short:.5} fc_long={fc_long:.5} taps={}",
            weights_short.len()
        );
        Ok(Self { weights_short, weights_long, half_width })
    }

    /// Design the filters for the averaged series described by `cfg`.
    pub fn from_config(cfg: &BandpassConfig) -> Result<Self> {
        cfg.validate()?;
        Self::new(
            cfg.filtered_interval(),
            cfg.period_short,
            cfg.period_long,
            cfg.half_width,
        )
    }

    pub fn weights_short(&self) -> &[f64] {
        &self.weights_short
    }

    pub fn weights_long(&self) -> &[f64] {
        &self.weights_long
    }

    /// Samples dropped at each end; also the input index of output sample 0.
    pub fn half_width(&self) -> usize {
        self.half_width
    }

    /// Band-pass a 1-D series.
    pub fn apply(&self, series: &[f64]) -> Result<Vec<f64>> {
        let low_long = apply_filter(series, &self.weights_long)?;
        let low_short = apply_filter(series, &self.weights_short)?;
        Ok(low_long
            .iter()
            .zip(&low_short)
            .map(|(l, s)| l - s)
            .collect())
    }

    /// Band-pass every lane of `data` along `axis`.
    ///
    /// The two low-pass passes run concurrently.
    pub fn apply_axis<S, D>(&self, data: &ArrayBase<S, D>, axis: Axis) -> Result<Array<f64, D>>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        let view = data.view();
        let (low_long, low_short) = rayon::join(
            || apply_filter_axis(&view, &self.weights_long, axis),
            || apply_filter_axis(&view, &self.weights_short, axis),
        );
        Ok(low_long? - &low_short?)
    }
}

/// Band-pass a 1-D series between `period_short` and `period_long`.
///
/// Output has `series.len() − 2·half_width` samples.
///
/// # Errors
///
/// * [`FilterError::InvalidParameter`] if `period_short >= period_long`, a
///   period does not map to a cutoff in (0, 0.5), or `half_width` is 0.
/// * [`FilterError::InvalidInput`] if the series is too short or non-finite.
///
/// # Examples
///
/// ```
/// // Daily data, 3–10 day band.
/// let x: Vec<f64> = (0..120).map(|t| (t as f64 * 0.9).sin()).collect();
/// let y = tcseed::bandpass(&x, 1.0, 3.0, 10.0, 25).unwrap();
/// assert_eq!(y.len(), 70);
/// ```
pub fn bandpass(
    series: &[f64],
    sampling_interval: f64,
    period_short: f64,
    period_long: f64,
    half_width: usize,
) -> Result<Vec<f64>> {
    Bandpass::new(sampling_interval, period_short, period_long, half_width)?.apply(series)
}

/// Band-pass every lane of an N-D array along `axis`.
pub fn bandpass_axis<S, D>(
    data: &ArrayBase<S, D>,
    sampling_interval: f64,
    period_short: f64,
    period_long: f64,
    half_width: usize,
    axis: Axis,
) -> Result<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    Bandpass::new(sampling_interval, period_short, period_long, half_width)?
        .apply_axis(data, axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use std::f64::consts::PI;

    fn sine(n: usize, period: f64) -> Vec<f64> {
        (0..n).map(|t| (2.0 * PI * t as f64 / period).sin()).collect()
    }

    fn cosine(n: usize, period: f64) -> Vec<f64> {
        (0..n).map(|t| (2.0 * PI * t as f64 / period).cos()).collect()
    }

    #[test]
    fn output_is_long_minus_short() {
        let x: Vec<f64> = (0..100).map(|t| (t as f64 * 0.37).cos() + 0.01 * t as f64).collect();
        let bp = Bandpass::new(1.0, 3.0, 10.0, 12).unwrap();
        let long = apply_filter(&x, bp.weights_long()).unwrap();
        let short = apply_filter(&x, bp.weights_short()).unwrap();
        let y = bp.apply(&x).unwrap();
        assert_eq!(y.len(), 76);
        for i in 0..y.len() {
            approx::assert_abs_diff_eq!(y[i], long[i] - short[i], epsilon = 1e-15);
        }
    }

    #[test]
    fn constant_series_gives_zero() {
        let y = bandpass(&vec![3.0; 80], 1.0, 3.0, 10.0, 25).unwrap();
        for &v in &y {
            approx::assert_abs_diff_eq!(v, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn in_band_sine_keeps_amplitude() {
        // 5-day wave on daily data sits inside the 3–10 day band.
        let x = cosine(400, 5.0);
        let y = bandpass(&x, 1.0, 3.0, 10.0, 50).unwrap();
        let peak = y.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        assert!((peak - 1.0).abs() < 0.02, "peak={peak}");
    }

    #[test]
    fn out_of_band_sines_are_removed() {
        for period in [2.2, 60.0] {
            let x = sine(400, period);
            let y = bandpass(&x, 1.0, 3.0, 10.0, 50).unwrap();
            let peak = y.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
            assert!(peak < 0.05, "period={period} peak={peak}");
        }
    }

    #[test]
    fn invalid_band_rejected() {
        let x = vec![0.0; 100];
        for (ps, pl) in [(10.0, 3.0), (5.0, 5.0), (f64::NAN, 10.0)] {
            assert!(matches!(
                bandpass(&x, 1.0, ps, pl, 10),
                Err(FilterError::InvalidParameter(_))
            ));
        }
        // 1.5-day period is above Nyquist for daily data.
        assert!(bandpass(&x, 1.0, 1.5, 10.0, 10).is_err());
        assert!(bandpass(&x, 1.0, 3.0, 10.0, 0).is_err());
    }

    #[test]
    fn short_series_rejected() {
        assert!(matches!(
            bandpass(&[1.0; 20], 1.0, 3.0, 10.0, 10),
            Err(FilterError::InvalidInput(_))
        ));
    }

    #[test]
    fn axis_matches_1d() {
        let data = Array2::from_shape_fn((4, 90), |(p, t)| {
            (2.0 * PI * t as f64 / (4.0 + p as f64)).sin()
        });
        let out = bandpass_axis(&data, 1.0, 3.0, 10.0, 20, Axis(1)).unwrap();
        assert_eq!(out.dim(), (4, 50));
        for p in 0..4 {
            let y = bandpass(&data.row(p).to_vec(), 1.0, 3.0, 10.0, 20).unwrap();
            for (t, &v) in y.iter().enumerate() {
                approx::assert_abs_diff_eq!(out[[p, t]], v, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn from_config_uses_averaged_interval() {
        let cfg = BandpassConfig::default();
        let bp = Bandpass::from_config(&cfg).unwrap();
        let direct = Bandpass::new(1.0, 3.0, 10.0, 25).unwrap();
        assert_eq!(bp.half_width(), 25);
        for (a, b) in bp.weights_short().iter().zip(direct.weights_short()) {
            approx::assert_abs_diff_eq!(*a, *b, epsilon = 1e-14);
        }
    }
}
