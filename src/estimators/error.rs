use thiserror::Error;

/// Simplified `Result` using [`EstimatorError`] as error type
pub type Result<T> = std::result::Result<T, EstimatorError>;

/// Error variants from hyperparameter construction or model estimation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimatorError {
    #[error("invalid alpha {0}")]
    InvalidRegularization(f32),
    #[error("invalid tolerance {0}")]
    InvalidTolerance(f32),
    #[error("invalid max epochs {0}")]
    InvalidMaxEpochs(usize),
    #[error("invalid max iterations {0}")]
    InvalidMaxIterations(usize),
    #[error("invalid working set size {0}")]
    InvalidWorkingSetSize(usize),
    /// The input has not enough samples
    #[error("not enough samples: {0} given, at least 2 required")]
    NotEnoughSamples(usize),
    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("the normal equations are singular, the features are collinear")]
    SingularMatrix,
}
