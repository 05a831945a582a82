//! Block-mean downsampling along the time axis (e.g. hourly → daily).
//!
//! Consecutive, non-overlapping groups of `block_size` samples are replaced
//! by their mean. A trailing group shorter than `block_size` is discarded, so
//! every output sample averages the same number of inputs.
use ndarray::{Array, ArrayBase, Axis, Data, Dimension, Zip};

use crate::error::{FilterError, Result};
use crate::filter::apply::check_axis;

/// Average `data` over non-overlapping blocks of `block_size` samples along
/// `axis`.
///
/// Output length along `axis` is `floor(n / block_size)`; output sample `i`
/// covers input samples `i·block_size .. (i+1)·block_size`.
///
/// # Errors
///
/// * [`FilterError::InvalidParameter`] if `block_size == 0` or `axis` is out
///   of range.
/// * [`FilterError::InvalidInput`] if the axis holds fewer than `block_size`
///   samples.
pub fn block_mean<S, D>(data: &ArrayBase<S, D>, axis: Axis, block_size: usize) -> Result<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if block_size == 0 {
        return Err(FilterError::InvalidParameter(
            "block_size must be >= 1".into(),
        ));
    }
    check_axis(data.ndim(), axis)?;
    let n_in = data.len_of(axis);
    if n_in < block_size {
        return Err(FilterError::InvalidInput(format!(
            "{n_in} samples cannot fill one block of {block_size}"
        )));
    }
    if block_size == 1 {
        return Ok(data.to_owned());
    }

    let mut dim = data.raw_dim();
    dim[axis.index()] = n_in / block_size;
    let mut out = Array::<f64, D>::zeros(dim);

    let scale = 1.0 / block_size as f64;
    Zip::from(out.lanes_mut(axis))
        .and(data.lanes(axis))
        .par_for_each(|mut y, x| {
            for (o, block) in y.iter_mut().zip(x.exact_chunks(block_size)) {
                *o = block.sum() * scale;
            }
        });

    log::debug!(
        "block mean: {n_in} → {} samples (block_size={block_size})",
        n_in / block_size
    );
    Ok(out)
}
