//! Lanczos low-pass FIR design and application.
//!
//! - [`design`]: windowed-sinc weights with the Lanczos sigma taper,
//!   normalised to unit DC gain (Duchon 1979).
//! - [`apply`]: direct weighted running mean along the time axis, truncating
//!   `N` samples at each edge.

pub mod apply;
pub mod design;

pub use design::{
    cutoff_from_period, frequency_response, generate_weights, half_width_for_window,
    lanczos_sigma,
};
pub use apply::{apply_filter, apply_filter_axis, half_width_of};
