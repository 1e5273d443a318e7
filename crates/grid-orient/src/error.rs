//! Error types for grid reorientation.

use std::path::PathBuf;

use thiserror::Error;

/// A grid record that is malformed or internally inconsistent.
///
/// Raised before any transform is attempted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StructuralError {
    /// The record has no `header` or no `data` section.
    #[error("record is missing its '{0}' section")]
    MissingSection(&'static str),

    /// A required header field is absent.
    #[error("missing essential key in header: '{0}'")]
    MissingField(&'static str),

    /// A required header field is present but is not a number.
    #[error("header field '{field}' must be numeric, got {value}")]
    NonNumeric { field: &'static str, value: String },

    /// `nx` or `ny` is zero or negative.
    #[error("grid dimensions nx ({nx}) and ny ({ny}) must be positive")]
    NonPositiveDimension { nx: f64, ny: f64 },

    /// `nx` or `ny` has a fractional part.
    #[error("grid dimension {field} ({value}) must be a whole number")]
    NonIntegralDimension { field: &'static str, value: f64 },

    /// `nx * ny` does not fit in memory-addressable range.
    #[error("grid dimensions nx ({nx}) and ny ({ny}) are too large")]
    DimensionOverflow { nx: f64, ny: f64 },

    /// The data payload does not hold exactly `nx * ny` elements.
    #[error("data length ({actual}) does not match nx * ny ({nx} * {ny} = {expected})")]
    LengthMismatch {
        actual: usize,
        nx: usize,
        ny: usize,
        expected: usize,
    },

    /// The record, its header or its data has the wrong JSON kind.
    #[error("{what} must be {expected}, got {found}")]
    Malformed {
        what: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

/// Errors raised while reorienting a single record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReorientError {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// The row split did not match the validated geometry.
    #[error("failed to reorder grid rows: {0}")]
    Processing(String),
}

impl ReorientError {
    /// Create a Processing error.
    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing(msg.into())
    }

    /// Whether this error came from validation rather than the row reorder.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural(_))
    }
}

/// A record-level failure that aborted a batch.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("error processing record {index}")]
pub struct BatchError {
    /// Zero-based position of the failing record in the input list.
    pub index: usize,
    #[source]
    pub source: ReorientError,
}

impl BatchError {
    pub fn new(index: usize, source: impl Into<ReorientError>) -> Self {
        Self {
            index,
            source: source.into(),
        }
    }
}

/// Errors at the file boundary: reading, decoding and writing record lists.
#[derive(Error, Debug)]
pub enum RecordIoError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode JSON from {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected {} to hold a list of grid records, got {found}", path.display())]
    NotAList { path: PathBuf, found: &'static str },

    #[error("failed to encode grid records")]
    Encode(#[source] serde_json::Error),

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for reorientation operations.
pub type Result<T> = std::result::Result<T, ReorientError>;
