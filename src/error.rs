//! Error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for temperature blanket operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied a value outside the domain of the operation.
    InvalidInput,
    /// Persisted ledger data could not be read or written.
    Serialization,
}

/// Errors raised at the library boundary.
///
/// Samples are expected to be validated upstream; the library does not
/// try to recover from weather fetch failures.
#[derive(Error, Debug)]
pub enum Error {
    /// NaN or infinite temperature.
    #[error("temperature must be finite, got {0}")]
    NonFiniteTemperature(f64),

    /// Clamp bounds that are not finite or not strictly increasing.
    #[error("invalid clamp range [{min}, {max}]: bounds must be finite with min < max")]
    InvalidRange { min: f64, max: f64 },

    /// A palette needs at least two swatches.
    #[error("palette must contain at least 2 swatches, got {0}")]
    PaletteTooShort(usize),

    /// A color string that is not `#rrggbb` or `#rgb`.
    #[error("not a hex color: {0:?}")]
    InvalidColor(String),

    /// A project was built without any temperature sample.
    #[error("a project needs at least one temperature sample")]
    NoSamples,

    /// A sample dated outside the project's year.
    #[error("sample dated {date} is outside year {year}")]
    SampleOutOfYear { date: NaiveDate, year: i32 },

    /// Two samples for the same day.
    #[error("more than one sample for {0}")]
    DuplicateSample(NaiveDate),

    /// Ledger JSON could not be encoded or decoded.
    #[cfg(feature = "serde")]
    #[error("ledger serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            #[cfg(feature = "serde")]
            Error::Json(_) => ErrorKind::Serialization,
            _ => ErrorKind::InvalidInput,
        }
    }
}
