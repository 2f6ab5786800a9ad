use std::marker::PhantomData;

use super::error::{EstimatorError, Result};
use crate::param_guard::ParamGuard;
use crate::Float;

/// A verified hyperparameter set ready for the fitting of an ordinary least
/// squares model
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressionValidParams<F> {
    fit_intercept: bool,
    phantom: PhantomData<F>,
}

impl<F: Float> LinearRegressionValidParams<F> {
    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }
}

/// A hyper-parameter set during construction
///
/// Configures and minimizes the following objective function:
/// ```ignore
/// ||y - Xw - b||^2_2
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressionParams<F>(LinearRegressionValidParams<F>);

impl<F: Float> Default for LinearRegressionParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> LinearRegressionParams<F> {
    pub fn new() -> LinearRegressionParams<F> {
        Self(LinearRegressionValidParams {
            fit_intercept: true,
            phantom: PhantomData,
        })
    }

    /// Whether to fit an unpenalized intercept. When disabled, the data is
    /// assumed to be centered.
    /// Defaults to `true` if not set.
    pub fn fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.0.fit_intercept = fit_intercept;
        self
    }
}

impl<F: Float> ParamGuard for LinearRegressionParams<F> {
    type Checked = LinearRegressionValidParams<F>;
    type Error = EstimatorError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// A verified hyperparameter set ready for the fitting of a Ridge regression
/// model
#[derive(Debug, Clone, PartialEq)]
pub struct RidgeValidParams<F> {
    alpha: F,
    fit_intercept: bool,
}

impl<F: Float> RidgeValidParams<F> {
    pub fn alpha(&self) -> F {
        self.alpha
    }

    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }
}

/// A hyper-parameter set during construction
///
/// Configures and minimizes the following objective function:
/// ```ignore
/// ||y - Xw - b||^2_2 + alpha * ||w||^2_2
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RidgeParams<F>(RidgeValidParams<F>);

impl<F: Float> Default for RidgeParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Configure and fit a Ridge model
impl<F: Float> RidgeParams<F> {
    /// Create default Ridge hyper parameters
    pub fn new() -> RidgeParams<F> {
        Self(RidgeValidParams {
            alpha: F::one(),
            fit_intercept: true,
        })
    }

    /// Set the strength of the L2 penalty.
    /// Defaults to `1` if not set.
    pub fn alpha(mut self, alpha: F) -> Self {
        self.0.alpha = alpha;
        self
    }

    /// Defaults to `true` if not set.
    pub fn fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.0.fit_intercept = fit_intercept;
        self
    }
}

impl<F: Float> ParamGuard for RidgeParams<F> {
    type Checked = RidgeValidParams<F>;
    type Error = EstimatorError;

    /// Validate the hyper parameters
    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.alpha.is_negative() || !self.0.alpha.is_finite() {
            Err(EstimatorError::InvalidRegularization(
                self.0.alpha.to_f32().unwrap_or(f32::NAN),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// A verified hyperparameter set ready for the fitting of a Lasso regression model
#[derive(Debug, Clone, PartialEq)]
pub struct LassoValidParams<F> {
    alpha: F,
    fit_intercept: bool,
    max_iterations: usize,
    max_epochs: usize,
    ws_start_size: usize,
    tolerance: F,
    verbose: bool,
}

impl<F: Float> LassoValidParams<F> {
    pub fn alpha(&self) -> F {
        self.alpha
    }

    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn max_epochs(&self) -> usize {
        self.max_epochs
    }

    pub fn ws_start_size(&self) -> usize {
        self.ws_start_size
    }

    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

/// A hyper-parameter set during construction
///
/// Configures and minimizes the following objective function:
/// ```ignore
/// 1 / (2 * n_samples) * ||y - Xw - b||^2_2
///     + alpha * ||w||_1
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LassoParams<F>(LassoValidParams<F>);

impl<F: Float> Default for LassoParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Configure and fit a Lasso model
impl<F: Float> LassoParams<F> {
    /// Create default Lasso hyper parameters
    pub fn new() -> LassoParams<F> {
        Self(LassoValidParams {
            alpha: F::one(),
            fit_intercept: true,
            max_iterations: 50,
            max_epochs: 1000,
            ws_start_size: 10,
            tolerance: F::cast(1e-6),
            verbose: false,
        })
    }

    /// Set the regularization hyperparameter. A higher value yields sparser
    /// solutions.
    /// Defaults to `1` if not set.
    pub fn alpha(mut self, alpha: F) -> Self {
        self.0.alpha = alpha;
        self
    }

    /// Defaults to `true` if not set.
    pub fn fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.0.fit_intercept = fit_intercept;
        self
    }

    /// Set the maximum number of iterations in the outer loop used to build
    /// working set.
    /// Defaults to `50` if not set.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.0.max_iterations = max_iterations;
        self
    }

    /// Set the maximum number of epochs in the inner loop during the descent
    /// routine.
    /// Defaults to `1000` if not set.
    pub fn max_epochs(mut self, max_epochs: usize) -> Self {
        self.0.max_epochs = max_epochs;
        self
    }

    /// Set the initial working set size.
    ///
    /// Defaults to `10` if not set.
    pub fn ws_start_size(mut self, ws_start_size: usize) -> Self {
        self.0.ws_start_size = ws_start_size;
        self
    }

    /// Set the stopping criterion for the optimization routine (KKT violation).
    ///
    /// Defaults to `1e-6` if not set.
    pub fn tolerance(mut self, tolerance: F) -> Self {
        self.0.tolerance = tolerance;
        self
    }

    /// Logs the progress of the solver at the debug level.
    ///
    /// Defaults to `false` if not set.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.0.verbose = verbose;
        self
    }
}

impl<F: Float> ParamGuard for LassoParams<F> {
    type Checked = LassoValidParams<F>;
    type Error = EstimatorError;

    /// Validate the hyper parameters
    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.alpha.is_negative() || !self.0.alpha.is_finite() {
            Err(EstimatorError::InvalidRegularization(
                self.0.alpha.to_f32().unwrap_or(f32::NAN),
            ))
        } else if !(self.0.tolerance > F::zero()) {
            Err(EstimatorError::InvalidTolerance(
                self.0.tolerance.to_f32().unwrap_or(f32::NAN),
            ))
        } else if self.0.max_epochs == 0 {
            Err(EstimatorError::InvalidMaxEpochs(self.0.max_epochs))
        } else if self.0.max_iterations == 0 {
            Err(EstimatorError::InvalidMaxIterations(self.0.max_iterations))
        } else if self.0.ws_start_size == 0 {
            Err(EstimatorError::InvalidWorkingSetSize(self.0.ws_start_size))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
