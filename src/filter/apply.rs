//! Weighted running mean (direct FIR convolution) with edge truncation.
//!
//! For weights of length `2N + 1`, output sample `i − N` is the dot product of
//! the weights with `series[i − N ..= i + N]`. Only fully covered positions are
//! produced: the first and last `N` input samples have no output. There is no
//! padding, reflection or wraparound.
use ndarray::{Array, ArrayBase, ArrayView1, Axis, Data, Dimension, Zip};

use crate::error::{FilterError, Result};

/// Filter a single 1-D series.
///
/// Returns `series.len() − 2N` samples; output index `i` corresponds to input
/// index `i + N`.
///
/// # Errors
///
/// * [`FilterError::InvalidParameter`] if `weights` does not have odd length ≥ 3.
/// * [`FilterError::InvalidInput`] if `series.len() <= 2N` or the series has
///   a NaN/Inf value.
///
/// # Examples
///
/// ```
/// use tcseed::{apply_filter, generate_weights};
///
/// let w = generate_weights(0.1, 2).unwrap();
/// let y = apply_filter(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0], &w).unwrap();
/// assert_eq!(y.len(), 3);
/// ```
pub fn apply_filter(series: &[f64], weights: &[f64]) -> Result<Vec<f64>> {
    let half_width = half_width_of(weights)?;
    check_length(series.len(), half_width)?;
    check_finite(series.iter())?;

    Ok(series
        .windows(weights.len())
        .map(|win| win.iter().zip(weights).map(|(x, w)| x * w).sum())
        .collect())
}

/// Filter every lane of `data` along `axis` with the same weights.
///
/// The result has the shape of `data` with `axis` shortened by `2N`. Lanes are
/// independent and processed in parallel.
///
/// # Errors
///
/// As [`apply_filter`], plus [`FilterError::InvalidParameter`] if `axis` is
/// not an axis of `data`. The whole array is validated before any lane is
/// filtered.
pub fn apply_filter_axis<S, D>(
    data: &ArrayBase<S, D>,
    weights: &[f64],
    axis: Axis,
) -> Result<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let half_width = half_width_of(weights)?;
    check_axis(data.ndim(), axis)?;
    let n_t = data.len_of(axis);
    check_length(n_t, half_width)?;
    check_finite(data.iter())?;

    let mut dim = data.raw_dim();
    dim[axis.index()] = n_t - 2 * half_width;
    let mut out = Array::<f64, D>::zeros(dim);

    let w = ArrayView1::from(weights);
    Zip::from(out.lanes_mut(axis))
        .and(data.lanes(axis))
        .par_for_each(|mut y, x| {
            for (o, win) in y.iter_mut().zip(x.windows(weights.len())) {
                *o = win.dot(&w);
            }
        });

    Ok(out)
}

/// Half-width `N` of a weight vector of length `2N + 1`.
pub fn half_width_of(weights: &[f64]) -> Result<usize> {
    let n = weights.len();
    if n < 3 || n % 2 == 0 {
        return Err(FilterError::InvalidParameter(format!(
            "weight vector must have odd length >= 3, got {n}"
        )));
    }
    Ok(n / 2)
}

// ── Helpers ──────────────────────────────────────────────────────────────────

pub(crate) fn check_axis(ndim: usize, axis: Axis) -> Result<()> {
    if axis.index() >= ndim {
        return Err(FilterError::InvalidParameter(format!(
            "axis {} out of range for a {ndim}-D array",
            axis.index()
        )));
    }
    Ok(())
}

fn check_length(n_t: usize, half_width: usize) -> Result<()> {
    if n_t <= 2 * half_width {
        return Err(FilterError::InvalidInput(format!(
            "series has {n_t} samples, need at least {} for half-width {half_width}",
            2 * half_width + 1
        )));
    }
    Ok(())
}

pub(crate) fn check_finite<'a, I>(values: I) -> Result<()>
where
    I: IntoIterator<Item = &'a f64>,
{
    if let Some((idx, v)) = values.into_iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(FilterError::InvalidInput(format!(
            "non-finite value {v} at flat index {idx}; fill gaps before filtering"
        )));
    }
    Ok(())
}
