//! Error type shared by the filtering core.
//!
//! Every public entry point validates its arguments before touching the data,
//! so an `Err` always means no output was produced.
use thiserror::Error;

/// Failure raised by weight design, convolution, averaging or statistics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// A filter parameter is out of range: cutoff outside (0, 0.5),
    /// half-width < 1, `period_short >= period_long`, bad axis, ...
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The data cannot be filtered: too short for the window or contains
    /// NaN/Inf.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, FilterError>;
