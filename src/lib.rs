//! # tcseed — Lanczos band-pass filtering for synoptic-scale variability
//!
//! `tcseed` isolates 3–10 day variability in a gridded time series (typically
//! 850 hPa relative vorticity) by differencing two Lanczos low-pass filters
//! (Duchon 1979). The variance of the band-passed field is the "TC seed
//! index" of pre-tropical-cyclone synoptic disturbances (Li et al. 2010).
//!
//! ## Pipeline overview
//!
//! ```text
//! vorticity [T_hourly, lat, lon]
//!   │
//!   ├─ resample::block_mean()     hourly → daily means (block_size = 24)
//!   ├─ generate_weights()         Lanczos low-pass at 10 d and at 3 d (2N+1 taps)
//!   ├─ apply_filter_axis() ×2     weighted running mean along time, N lost per edge
//!   ├─ low_long − low_short       3–10 day band-pass
//!   └─ stats::variance_axis()     variance over time
//!        │
//!        └─→ SeedIndex { bandpass [T_daily − 2N, lat, lon], variance [lat, lon] }
//! ```
//!
//! ## Quick start
//!
//! ```
//! use tcseed::{seed_index, BandpassConfig};
//! use ndarray::{Array3, Axis};
//!
//! // 60 days of hourly data on a 2 × 3 grid.
//! let field = Array3::from_shape_fn((60 * 24, 2, 3), |(t, i, j)| {
//!     let day = t as f64 / 24.0;
//!     (2.0 * std::f64::consts::PI * day / 5.0).sin() * (1 + i + j) as f64
//! });
//!
//! let cfg = BandpassConfig::default();
//! let index = seed_index(&field, Axis(0), &cfg).unwrap();
//! assert_eq!(index.bandpass.shape(), &[60 - 2 * 25, 2, 3]);
//! assert_eq!(index.variance.shape(), &[2, 3]);
//! ```
//!
//! ## Running individual steps
//!
//! ```
//! use tcseed::{apply_filter, bandpass, generate_weights};
//!
//! let series: Vec<f64> = (0..200).map(|t| (t as f64 * 1.3).sin()).collect();
//!
//! // One low-pass filter: 10-day cutoff on daily data, N = 25.
//! let w = generate_weights(1.0 / 10.0, 25).unwrap();
//! let low = apply_filter(&series, &w).unwrap();
//! assert_eq!(low.len(), 150);
//!
//! // The 3–10 day band in one call.
//! let band = bandpass(&series, 1.0, 3.0, 10.0, 25).unwrap();
//! assert_eq!(band.len(), 150);
//! ```

pub mod bandpass;
pub mod config;
pub mod error;
pub mod filter;
pub mod io;
pub mod resample;
pub mod stats;

use ndarray::{Array, ArrayBase, Axis, Data, Dimension, RemoveAxis};

// ── Crate-root re-exports ─────────────────────────────────────────────────

pub use bandpass::{bandpass, bandpass_axis, Bandpass};
pub use config::BandpassConfig;
pub use error::{FilterError, Result};
pub use filter::{
    apply_filter, apply_filter_axis, cutoff_from_period, frequency_response, generate_weights,
    half_width_for_window, half_width_of, lanczos_sigma,
};
pub use io::{FieldData, StWriter};
pub use resample::block_mean;
pub use stats::variance_axis;

/// Output of [`seed_index`].
#[derive(Debug, Clone)]
pub struct SeedIndex<D: Dimension> {
    /// Band-passed field on the averaged time grid, time axis shortened by 2N.
    pub bandpass: Array<f64, D>,
    /// Variance of `bandpass` over time (`ddof = 0`).
    pub variance: Array<f64, D::Smaller>,
    /// Index in the averaged series of the first band-passed sample (= N).
    pub time_offset: usize,
    /// Number of input samples per averaged sample.
    pub block_size: usize,
    pub weights_short: Vec<f64>,
    pub weights_long: Vec<f64>,
}

impl<D: Dimension> SeedIndex<D> {
    /// Index in the raw (pre-averaging) input of the first sample of the
    /// block that `bandpass[0]` was computed from.
    pub fn input_time_offset(&self) -> usize {
        self.time_offset * self.block_size
    }
}

/// Run the **full seed-index pipeline** on a field whose time axis is
/// `time_axis`.
///
/// # Pipeline steps
///
/// 1. Average over blocks of [`BandpassConfig::block_size`] samples.
/// 2. Band-pass between [`BandpassConfig::period_short`] and
///    [`BandpassConfig::period_long`] with half-width
///    [`BandpassConfig::half_width`].
/// 3. Variance over time at every remaining grid point.
///
/// # Errors
///
/// Any [`FilterError`] from validation or from the individual steps: invalid
/// configuration, non-finite data, or too few samples for the filter after
/// averaging.
pub fn seed_index<S, D>(
    data: &ArrayBase<S, D>,
    time_axis: Axis,
    cfg: &BandpassConfig,
) -> Result<SeedIndex<D>>
where
    S: Data<Elem = f64>,
    D: Dimension + RemoveAxis,
{
    // 1. Validate and design both filters before touching the data.
    let filter = Bandpass::from_config(cfg)?;

    // 2. Time averaging.
    let averaged = resample::block_mean(data, time_axis, cfg.block_size)?;

    // 3. Band-pass along time.
    let band = filter.apply_axis(&averaged, time_axis)?;

    // 4. Variance over time.
    let variance = stats::variance_axis(&band, time_axis, 0)?;

    log::info!(
        "seed index: {} → {} averaged → {} filtered samples (N={})",
        data.len_of(time_axis),
        averaged.len_of(time_axis),
        band.len_of(time_axis),
        filter.half_width()
    );

    Ok(SeedIndex {
        bandpass: band,
        variance,
        time_offset: filter.half_width(),
        block_size: cfg.block_size,
        weights_short: filter.weights_short().to_vec(),
        weights_long: filter.weights_long().to_vec(),
    })
}
