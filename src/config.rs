//! Band-pass configuration.
//!
//! [`BandpassConfig`] holds every tunable parameter of the seed-index
//! pipeline. The defaults reproduce the synoptic 3–10 day band on hourly
//! reanalysis data averaged to daily means.
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::filter::cutoff_from_period;

/// Configuration of the band-pass filter and its pre-averaging step.
///
/// All fields are `pub` so you can construct one with struct-update syntax:
///
/// ```
/// use tcseed::BandpassConfig;
///
/// let cfg = BandpassConfig {
///     block_size: 1,    // input is already daily
///     sampling_interval: 24.0,
///     ..BandpassConfig::default()
/// };
/// assert_eq!(cfg.filtered_interval(), 24.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BandpassConfig {
    /// Time between consecutive input samples.
    ///
    /// Any unit works as long as the periods below use the same one.
    ///
    /// Default: `1.0` (hours).
    pub sampling_interval: f64,

    /// Number of consecutive input samples averaged into one sample before
    /// filtering (`24` turns hourly data into daily means).
    ///
    /// `1` disables averaging.
    ///
    /// Default: `24`.
    pub block_size: usize,

    /// Short edge of the band, the period of the higher-cutoff low-pass.
    ///
    /// Default: `72.0` (3 days in hours).
    pub period_short: f64,

    /// Long edge of the band, the period of the lower-cutoff low-pass.
    ///
    /// Default: `240.0` (10 days in hours).
    pub period_long: f64,

    /// Filter half-width `N`, counted in averaged samples.
    ///
    /// Both low-pass filters have `2N + 1` taps and `N` samples are lost at
    /// each end of the series. Larger values sharpen the cutoff at the cost
    /// of edge loss and compute.
    ///
    /// Default: `25` (a 50-sample window).
    pub half_width: usize,
}

impl Default for BandpassConfig {
    /// Hourly input · daily means · 3–10 day band · N = 25.
    fn default() -> Self {
        Self {
            sampling_interval: 1.0,
            block_size: 24,
            period_short: 72.0,
            period_long: 240.0,
            half_width: 25,
        }
    }
}

impl BandpassConfig {
    /// Load a partial or complete configuration from a JSON file.
    ///
    /// Missing fields keep their defaults. The result is validated.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let cfg: BandpassConfig = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        cfg.validate().context("invalid band-pass configuration")?;
        Ok(cfg)
    }

    /// Check every parameter without touching any data.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.block_size == 0 {
            return Err(FilterError::InvalidParameter(
                "block_size must be >= 1".into(),
            ));
        }
        if self.half_width == 0 {
            return Err(FilterError::InvalidParameter(
                "half_width must be >= 1".into(),
            ));
        }
        if !(self.period_short < self.period_long) {
            return Err(FilterError::InvalidParameter(format!(
                "period_short ({}) must be < period_long ({})",
                self.period_short, self.period_long
            )));
        }
        self.cutoff_short()?;
        self.cutoff_long()?;
        Ok(())
    }

    /// Sampling interval of the series the filter sees, after averaging.
    pub fn filtered_interval(&self) -> f64 {
        self.sampling_interval * self.block_size as f64
    }

    /// Cutoff (cycles per averaged sample) of the short-period low-pass.
    pub fn cutoff_short(&self) -> Result<f64, FilterError> {
        cutoff_from_period(self.filtered_interval(), self.period_short)
    }

    /// Cutoff (cycles per averaged sample) of the long-period low-pass.
    pub fn cutoff_long(&self) -> Result<f64, FilterError> {
        cutoff_from_period(self.filtered_interval(), self.period_long)
    }
}
