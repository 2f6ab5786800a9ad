use ndarray::{Array1, ArrayView1, Axis};

use super::Float;
use crate::datasets::DatasetBase;

#[cfg(test)]
mod tests;

/// This trait provides three main methods [`Datafit::initialize`],
/// [`Datafit::value`] and [`Datafit::gradient_j`] to compute useful quantities
/// during the optimization routine.
pub trait Datafit<F: Float> {
    /// This method is called before looping onto the features, to precompute
    /// the Lipschitz constants (used as stepsizes) and the matrix-vector
    /// product XTy.
    fn initialize(&mut self, dataset: &DatasetBase<F>);

    /// This method is called when evaluating the objective value.
    ///
    /// It is jointly used with [`Penalty::value`](crate::penalties::Penalty::value)
    /// in order to compute the value of the objective.
    fn value(&self, dataset: &DatasetBase<F>, Xw: ArrayView1<F>) -> F;

    /// This method computes the gradient of the datafit with respect to the
    /// j-th coefficient.
    fn gradient_j(&self, dataset: &DatasetBase<F>, Xw: ArrayView1<F>, j: usize) -> F;

    /// This method computes the full gradient by calling
    /// [`Datafit::gradient_j`].
    fn full_grad(&self, dataset: &DatasetBase<F>, Xw: ArrayView1<F>) -> Array1<F> {
        Array1::from_iter((0..dataset.n_features()).map(|j| self.gradient_j(dataset, Xw, j)))
    }

    /// The per-coordinate Lipschitz constants of the gradient. The coordinate
    /// descent step size of feature j is their inverse.
    fn lipschitz(&self) -> ArrayView1<F>;
}

/// Quadratic datafit
///
/// The squared-norm residuals datafit `1 / (2 * n_samples) * ||y - Xw||^2_2`
/// used by least-squares regression. Conjointly used with the
/// [`L1`](crate::penalties::L1) penalty it yields the Lasso. It stores the
/// pre-computed quantities useful during the optimization routine.
#[derive(Debug, Clone, PartialEq)]
pub struct Quadratic<F: Float> {
    lipschitz: Array1<F>,
    Xty: Array1<F>,
}

impl<F: Float> Default for Quadratic<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> Quadratic<F> {
    pub fn new() -> Self {
        Quadratic {
            lipschitz: Array1::<F>::zeros(1),
            Xty: Array1::<F>::zeros(1),
        }
    }
}

impl<F: Float> Datafit<F> for Quadratic<F> {
    /// This method pre-computes the Lipschitz constants and the matrix-vector
    /// product XTy useful during the optimization routine.
    fn initialize(&mut self, dataset: &DatasetBase<F>) {
        let n_samples = F::cast(dataset.n_samples());
        let X = dataset.records();
        self.Xty = X.t().dot(&dataset.targets());
        self.lipschitz = X.map_axis(Axis(0), |Xj| Xj.dot(&Xj) / n_samples);
    }

    /// This method computes the value of the datafit given the model fit.
    fn value(&self, dataset: &DatasetBase<F>, Xw: ArrayView1<F>) -> F {
        let n_samples = dataset.n_samples();
        let r = &dataset.targets() - &Xw;
        r.dot(&r) / F::cast(2 * n_samples)
    }

    /// This method computes the value of the gradient at some point w for
    /// coordinate j.
    fn gradient_j(&self, dataset: &DatasetBase<F>, Xw: ArrayView1<F>, j: usize) -> F {
        let n_samples = F::cast(dataset.n_samples());
        let XjTXw = dataset.records().column(j).dot(&Xw);
        (XjTXw - self.Xty[j]) / n_samples
    }

    fn lipschitz(&self) -> ArrayView1<F> {
        self.lipschitz.view()
    }
}
