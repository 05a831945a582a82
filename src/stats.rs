//! Statistics over the filtered field.
//!
//! `variance_axis` — per-grid-point variance over time of the band-passed
//! signal, the "TC seed index" of Li et al. (2010):
//!   σ² = Σ (x − μ)² / (n − ddof)
use ndarray::{Array, ArrayBase, Axis, Data, Dimension, RemoveAxis};

use crate::error::{FilterError, Result};
use crate::filter::apply::check_axis;

/// Variance of `data` along `axis` with `ddof` delta degrees of freedom
/// (`0` = population variance).
///
/// The result drops `axis`: a `[T, lat, lon]` field gives a `[lat, lon]` map.
pub fn variance_axis<S, D>(
    data: &ArrayBase<S, D>,
    axis: Axis,
    ddof: usize,
) -> Result<Array<f64, D::Smaller>>
where
    S: Data<Elem = f64>,
    D: Dimension + RemoveAxis,
{
    check_axis(data.ndim(), axis)?;
    let n = data.len_of(axis);
    if n <= ddof {
        return Err(FilterError::InvalidInput(format!(
            "variance needs more than {ddof} samples along axis {}, got {n}",
            axis.index()
        )));
    }

    // Two-pass in f64: mean first, then squared deviations.
    let inv = 1.0 / (n - ddof) as f64;
    Ok(data.map_axis(axis, |lane| {
        let mean = lane.sum() / n as f64;
        lane.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>() * inv
    }))
}
