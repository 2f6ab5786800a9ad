use log::debug;
use ndarray::{Array1, Array2, ArrayView1, Axis};

use super::error::{EstimatorError, Result};
use super::hyperparams::{
    LassoParams, LassoValidParams, LinearRegressionParams, LinearRegressionValidParams,
    RidgeParams, RidgeValidParams,
};
use crate::cd::{coordinate_descent, SolverOptions};
use crate::datafits::Quadratic;
use crate::datasets::DatasetBase;
use crate::helpers::linalg::solve_cholesky;
use crate::penalties::L1;
use crate::traits::{Fit, LinearModel};
use crate::Float;

/// Centered copy of a dataset and the means that were removed from it.
///
/// Fitting on centered data leaves the intercept out of the penalty; it is
/// recovered afterwards as `y_mean - x_mean . w`.
struct Centered<F> {
    X: Array2<F>,
    y: Array1<F>,
    x_mean: Array1<F>,
    y_mean: F,
}

impl<F: Float> Centered<F> {
    fn new(dataset: &DatasetBase<F>, fit_intercept: bool) -> Result<Centered<F>> {
        let n_samples = dataset.n_samples();
        if dataset.targets().len() != n_samples {
            return Err(EstimatorError::ShapeMismatch {
                expected: n_samples,
                found: dataset.targets().len(),
            });
        }
        if n_samples < 2 {
            return Err(EstimatorError::NotEnoughSamples(n_samples));
        }

        let X = dataset.records();
        let y = dataset.targets();
        if !fit_intercept {
            return Ok(Centered {
                X: X.to_owned(),
                y: y.to_owned(),
                x_mean: Array1::zeros(dataset.n_features()),
                y_mean: F::zero(),
            });
        }

        let x_mean = X
            .mean_axis(Axis(0))
            .ok_or(EstimatorError::NotEnoughSamples(n_samples))?;
        let y_mean = y.mean().ok_or(EstimatorError::NotEnoughSamples(n_samples))?;
        Ok(Centered {
            X: &X - &x_mean,
            y: &y - y_mean,
            x_mean,
            y_mean,
        })
    }

    fn intercept(&self, coefficients: ArrayView1<F>) -> F {
        self.y_mean - self.x_mean.dot(&coefficients)
    }

    /// Solves `(XᵀX + alpha I) w = Xᵀy` on the centered data.
    fn solve_normal_equations(&self, alpha: F) -> Result<Array1<F>> {
        let n_features = self.X.ncols();
        let mut gram = self.X.t().dot(&self.X);
        if alpha > F::zero() {
            gram += &(Array2::<F>::eye(n_features) * alpha);
        }
        let Xty = self.X.t().dot(&self.y);
        solve_cholesky(gram.view(), Xty.view())
    }
}

/// Ordinary least squares
///
/// Fitted by solving the normal equations with a Cholesky factorization.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression<F> {
    intercept: F,
    coefficients: Array1<F>,
}

impl<F: Float> LinearRegression<F> {
    /// This method instantiates an ordinary least squares estimator with
    /// default parameters.
    pub fn params() -> LinearRegressionParams<F> {
        LinearRegressionParams::new()
    }
}

impl<F: Float> LinearModel<F> for LinearRegression<F> {
    fn intercept(&self) -> F {
        self.intercept
    }

    fn coefficients(&self) -> ArrayView1<F> {
        self.coefficients.view()
    }
}

impl<F: Float> Fit<F, EstimatorError> for LinearRegressionValidParams<F> {
    type Object = LinearRegression<F>;

    fn fit(&self, dataset: &DatasetBase<F>) -> Result<Self::Object> {
        let centered = Centered::new(dataset, self.fit_intercept())?;
        let coefficients = centered.solve_normal_equations(F::zero())?;
        let intercept = centered.intercept(coefficients.view());
        debug!(
            "Least squares fit on {} samples: intercept {}",
            dataset.n_samples(),
            intercept
        );
        Ok(LinearRegression {
            intercept,
            coefficients,
        })
    }
}

/// The Ridge estimator
///
/// Least squares with an L2 penalty on the coefficients, solved in closed
/// form. The intercept is not penalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Ridge<F> {
    alpha: F,
    intercept: F,
    coefficients: Array1<F>,
}

impl<F: Float> Ridge<F> {
    /// This method instantiates a Ridge estimator with default parameters.
    pub fn params() -> RidgeParams<F> {
        RidgeParams::new()
    }

    /// The regularization strength the model was fitted with.
    pub fn alpha(&self) -> F {
        self.alpha
    }
}

impl<F: Float> LinearModel<F> for Ridge<F> {
    fn intercept(&self) -> F {
        self.intercept
    }

    fn coefficients(&self) -> ArrayView1<F> {
        self.coefficients.view()
    }
}

impl<F: Float> Fit<F, EstimatorError> for RidgeValidParams<F> {
    type Object = Ridge<F>;

    fn fit(&self, dataset: &DatasetBase<F>) -> Result<Self::Object> {
        let centered = Centered::new(dataset, self.fit_intercept())?;
        let coefficients = centered.solve_normal_equations(self.alpha())?;
        let intercept = centered.intercept(coefficients.view());
        debug!(
            "Ridge fit on {} samples with alpha {}",
            dataset.n_samples(),
            self.alpha()
        );
        Ok(Ridge {
            alpha: self.alpha(),
            intercept,
            coefficients,
        })
    }
}

/// The Lasso estimator
///
/// The Lasso estimator solves a regularized least-square regression problem.
/// The L1-regularization used yields sparse solutions: coefficients can be
/// exactly zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Lasso<F> {
    alpha: F,
    intercept: F,
    coefficients: Array1<F>,
    converged: bool,
}

impl<F: Float> Lasso<F> {
    /// This method instantiates a Lasso estimator with default parameters
    /// for the coordinate descent solver.
    pub fn params() -> LassoParams<F> {
        LassoParams::new()
    }

    /// The regularization strength the model was fitted with.
    pub fn alpha(&self) -> F {
        self.alpha
    }

    /// Whether the solver reached the tolerance within its iteration budget.
    pub fn converged(&self) -> bool {
        self.converged
    }
}

impl<F: Float> LinearModel<F> for Lasso<F> {
    fn intercept(&self) -> F {
        self.intercept
    }

    fn coefficients(&self) -> ArrayView1<F> {
        self.coefficients.view()
    }
}

/// This implements the coordinate descent optimization procedure on the
/// centered design matrix.
impl<F: Float> Fit<F, EstimatorError> for LassoValidParams<F> {
    /// If successful, the output of the coordinate descent solver is an instance
    /// of [`Lasso`] containing the fitted coefficients.
    type Object = Lasso<F>;

    fn fit(&self, dataset: &DatasetBase<F>) -> Result<Self::Object> {
        let centered = Centered::new(dataset, self.fit_intercept())?;
        let problem = DatasetBase::new(centered.X.clone(), centered.y.clone());

        let mut datafit = Quadratic::new();
        let penalty = L1::new(self.alpha());
        let options = SolverOptions {
            ws_start_size: self.ws_start_size(),
            max_iterations: self.max_iterations(),
            max_epochs: self.max_epochs(),
            tolerance: self.tolerance(),
            verbose: self.verbose(),
        };

        let (coefficients, converged) =
            coordinate_descent(&problem, &mut datafit, &penalty, &options);
        let intercept = centered.intercept(coefficients.view());
        debug!(
            "Lasso fit on {} samples with alpha {}: {} null coefficients",
            dataset.n_samples(),
            self.alpha(),
            coefficients.iter().filter(|&&w| w == F::zero()).count()
        );
        Ok(Lasso {
            alpha: self.alpha(),
            intercept,
            coefficients,
            converged,
        })
    }
}
