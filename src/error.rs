use std::path::PathBuf;

use thiserror::Error;

use crate::estimators::error::EstimatorError;

/// Simplified `Result` using [`EdaError`] as error type
pub type Result<T> = std::result::Result<T, EdaError>;

/// Error variants raised by the pipeline stages
///
/// Every variant is fatal: the run stops at the first error. Non-fatal
/// problems are reported through
/// [`EvaluationWarning`](crate::metrics::EvaluationWarning) instead.
#[derive(Debug, Error)]
pub enum EdaError {
    /// The source file does not exist
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    /// The source is not delimited tabular data with a header row
    #[error("failed to parse tabular data: {0}")]
    Parse(String),
    #[error("required column `{0}` is absent from the dataset")]
    MissingColumn(String),
    #[error("required column `{0}` is not numeric")]
    NonNumeric(String),
    #[error("required column `{column}` has {count} missing values")]
    MissingValues { column: String, count: usize },
    /// Too few rows to form a train/test split with two non-empty partitions
    #[error("insufficient data: {rows} rows available, at least {required} required")]
    InsufficientData { rows: usize, required: usize },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("failed to render plot: {0}")]
    Render(String),
    #[error(transparent)]
    Estimator(#[from] EstimatorError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for EdaError {
    fn from(err: csv::Error) -> Self {
        EdaError::Parse(err.to_string())
    }
}
