use log::{debug, warn};
use ndarray::{Array1, ArrayView1};

use super::Float;
use crate::datafits::Datafit;
use crate::datasets::DatasetBase;
use crate::helpers::helpers::argsort_by;
use crate::penalties::Penalty;

#[cfg(test)]
mod tests;

/// Stopping and sizing parameters of [`coordinate_descent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions<F> {
    pub ws_start_size: usize,
    pub max_iterations: usize,
    pub max_epochs: usize,
    pub tolerance: F,
    pub verbose: bool,
}

/// This function allows to construct the gradient of a datafit restricted to
/// the features present in the working set. It is used in [`kkt_violation`] to
/// rank features included in the working set.
pub fn construct_grad<F, DF>(
    dataset: &DatasetBase<F>,
    Xw: ArrayView1<F>,
    ws: ArrayView1<usize>,
    datafit: &DF,
) -> Array1<F>
where
    F: Float,
    DF: Datafit<F>,
{
    ws.iter()
        .map(|&j| datafit.gradient_j(dataset, Xw, j))
        .collect::<Array1<F>>()
}

/// This function computes the distance of the gradient of the datafit to the
/// subdifferential of the penalty restricted to the working set. It returns
/// an array containing the distances for each feature in the working set as well
/// as the maximum distance.
pub fn kkt_violation<F, DF, P>(
    dataset: &DatasetBase<F>,
    w: ArrayView1<F>,
    Xw: ArrayView1<F>,
    ws: ArrayView1<usize>,
    datafit: &DF,
    penalty: &P,
) -> (Array1<F>, F)
where
    F: Float,
    DF: Datafit<F>,
    P: Penalty<F>,
{
    let grad_ws = construct_grad(dataset, Xw, ws, datafit);
    penalty.subdiff_distance(w, grad_ws.view(), ws)
}

/// This function is used to construct a working set by sorting the indices
/// of the features having the largest distance between their gradient and
/// the subdifferential of the penalty. Features with a non-null weight always
/// belong to the working set. The inner coordinate descent solver then cycles
/// through the working set (a subset of the features in the design matrix).
pub fn construct_ws_from_kkt<F: Float>(
    kkt: &mut Array1<F>,
    w: ArrayView1<F>,
    ws_start_size: usize,
) -> Array1<usize> {
    let n_features = w.len();
    let mut nnz_features: usize = 0;

    for j in 0..n_features {
        if w[j] != F::zero() {
            nnz_features += 1;
            kkt[j] = F::infinity();
        }
    }

    // Geometric growth of the working set size
    let ws_size = usize::max(ws_start_size, usize::min(2 * nnz_features, n_features));

    // Swapped order for sorting in descending order
    let mut sorted_indices = argsort_by(kkt, |a, b| {
        b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted_indices.truncate(ws_size);

    Array1::from_vec(sorted_indices)
}

/// This is the solver behind the [`Lasso`](crate::estimators::Lasso)
/// estimator. It implements the usual coordinate descent optimization routine
/// using working sets. This routine is composed of two nested loops.
///
/// The outer loop is used to progressively increase the size of the working
/// set until the KKT violation of every feature falls below the tolerance.
/// It selects the features in the design matrix whose gradient is the
/// farthest from the subdifferential of the penalty by calling
/// [`kkt_violation`] and [`construct_ws_from_kkt`].
///
/// The inner loop solves the optimization problem restricted to the working
/// set by cycling through its features and applying the proximal operator of
/// the penalty to a gradient step of size `1 / lipschitz[j]`.
///
/// Returns the weights and whether the KKT violation over all features
/// ended below the tolerance. Running out of iterations is logged as a
/// warning.
pub fn coordinate_descent<F, DF, P>(
    dataset: &DatasetBase<F>,
    datafit: &mut DF,
    penalty: &P,
    options: &SolverOptions<F>,
) -> (Array1<F>, bool)
where
    F: Float,
    DF: Datafit<F>,
    P: Penalty<F>,
{
    let n_samples = dataset.n_samples();
    let n_features = dataset.n_features();

    // Pre-computes the Lipschitz constants and the matrix-vector Xty product
    // that is later used in the optimization procedure.
    datafit.initialize(dataset);

    let all_feats = Array1::from_iter(0..n_features);

    // The starting working set can't be greater than the number of features
    let ws_start_size = usize::min(options.ws_start_size, n_features);

    let mut w = Array1::<F>::zeros(n_features);
    let mut Xw = Array1::<F>::zeros(n_samples);
    let mut converged = false;

    // Outer loop in charge of constructing the working set
    for t in 0..options.max_iterations {
        let (mut kkt, kkt_max) = kkt_violation(
            dataset,
            w.view(),
            Xw.view(),
            all_feats.view(),
            datafit,
            penalty,
        );

        if options.verbose {
            debug!("KKT max violation: {:?}", kkt_max);
        }
        if kkt_max <= options.tolerance {
            converged = true;
            break;
        }

        let ws = construct_ws_from_kkt(&mut kkt, w.view(), ws_start_size);
        let ws_size = ws.len();

        if options.verbose {
            debug!("Iteration {}, {} features in subproblem.", t + 1, ws_size);
        }

        // Inner loop that implements the actual coordinate descent routine
        for epoch in 0..options.max_epochs {
            cd_epoch(dataset, datafit, penalty, &mut w, &mut Xw, ws.view());

            // Check that the maximum distance between the gradient of the datafit
            // and the subdifferential of the penalty is smaller than the tolerance
            if epoch % 10 == 0 {
                let (_, kkt_ws_max) =
                    kkt_violation(dataset, w.view(), Xw.view(), ws.view(), datafit, penalty);

                if options.verbose {
                    let p_obj = datafit.value(dataset, Xw.view()) + penalty.value(w.view());
                    debug!("epoch: {} :: obj: {:?} :: kkt: {:?}", epoch, p_obj, kkt_ws_max);
                }

                if ws_size == n_features {
                    if kkt_ws_max <= options.tolerance {
                        break;
                    }
                } else if kkt_ws_max < F::cast(0.3) * kkt_max {
                    if options.verbose {
                        debug!("Early exit.");
                    }
                    break;
                }
            }
        }
    }

    if !converged {
        // The last inner loop may have reached the optimum without the outer
        // loop checking it.
        let (_, kkt_max) = kkt_violation(
            dataset,
            w.view(),
            Xw.view(),
            all_feats.view(),
            datafit,
            penalty,
        );
        converged = kkt_max <= options.tolerance;
        if !converged {
            warn!(
                "Coordinate descent did not converge after {} iterations: KKT violation {:?} above tolerance {:?}",
                options.max_iterations, kkt_max, options.tolerance
            );
        }
    }

    (w, converged)
}

/// This function runs one cycle of coordinate descent over the working set,
/// keeping the model fit `Xw` up to date with the weights.
pub fn cd_epoch<F, DF, P>(
    dataset: &DatasetBase<F>,
    datafit: &DF,
    penalty: &P,
    w: &mut Array1<F>,
    Xw: &mut Array1<F>,
    ws: ArrayView1<usize>,
) where
    F: Float,
    DF: Datafit<F>,
    P: Penalty<F>,
{
    let lipschitz = datafit.lipschitz();
    let X = dataset.records();

    for &j in ws.iter() {
        // A null column carries no information and keeps a null weight
        if lipschitz[j] == F::zero() {
            continue;
        }
        let old_w_j = w[j];
        let grad_j = datafit.gradient_j(dataset, Xw.view(), j);
        w[j] = penalty.prox(old_w_j - grad_j / lipschitz[j], F::one() / lipschitz[j]);

        let diff = w[j] - old_w_j;
        if diff != F::zero() {
            Xw.scaled_add(diff, &X.column(j));
        }
    }
}
