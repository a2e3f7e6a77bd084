//! Error types shared by loading, clustering and parameter estimation.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the point store, the estimators and the pipeline.
///
/// Degenerate geometry (every point identical, `min_samples` larger than the
/// dataset) and a clustering with a single cluster are valid outcomes, not
/// errors.
#[derive(Debug, Error)]
pub enum Error {
    /// An estimator was asked to work on a dataset with no points.
    #[error("dataset is empty")]
    EmptyDataset,

    /// A record could not be parsed into a point.
    #[error("malformed record on line {line}: {message}")]
    MalformedInput {
        /// 1-based line number of the offending record.
        line: usize,
        /// What was wrong with it.
        message: String,
    },

    /// Feature matrix shape does not match the point store's layout.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected size.
        expected: usize,
        /// Size actually provided.
        found: usize,
    },

    /// A parameter value is outside its domain.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value was rejected.
        message: String,
    },

    /// Neither `eps` nor `min_samples` was supplied; only one may be estimated.
    #[error("at least one of eps or min_samples must be supplied")]
    MissingParameters,

    /// Reading a dataset or writing a report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a `MalformedInput` error.
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            message: message.into(),
        }
    }

    /// Create an `InvalidParameter` error.
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}
