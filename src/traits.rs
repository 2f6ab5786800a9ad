use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::datasets::DatasetBase;
use crate::Float;

/// Fit trait
///
/// The fittable trait allows an estimator to be fitted to a dataset (a combination
/// of design matrix and targets). More formally, the model estimates coefficients
/// that minimizes an empirical risk (loss function).
pub trait Fit<F: Float, E: std::error::Error> {
    type Object;

    fn fit(&self, dataset: &DatasetBase<F>) -> Result<Self::Object, E>;
}

/// A fitted linear model: an intercept plus one coefficient per feature.
///
/// The coefficient order is the column order of the design matrix the model
/// was fitted on; records passed to [`LinearModel::predict`] must use the same
/// order.
pub trait LinearModel<F: Float> {
    fn intercept(&self) -> F;

    fn coefficients(&self) -> ArrayView1<F>;

    fn predict(&self, records: ArrayView2<F>) -> Array1<F> {
        records.dot(&self.coefficients()) + self.intercept()
    }
}
