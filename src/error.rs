//! Errors raised while building dates and week batches.

use thiserror::Error;

/// Errors that can arise while generating the month view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The string is not a real `YYYY-MM-DD` Gregorian date
    #[error("`{0}` is not a valid YYYY-MM-DD date")]
    InvalidDate(String),

    /// The lunar calendar has no data for the date
    #[error("no lunar calendar data for {0}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, Error>;
