use approx::assert_abs_diff_eq;
use ndarray::{array, Array1, Array2};

use crate::cd::*;
use crate::datafits::Quadratic;
use crate::helpers::helpers::compute_alpha_max;
use crate::helpers::test_helpers::*;
use crate::penalties::L1;

fn options(tolerance: f64) -> SolverOptions<f64> {
    SolverOptions {
        ws_start_size: 10,
        max_iterations: 50,
        max_epochs: 1000,
        tolerance,
        verbose: false,
    }
}

#[test]
fn test_kkt_violation() {
    let X = Array2::from_shape_vec((2, 3), vec![1.6, -1.3, 2.9, 10.8, -3.8, -0.1]).unwrap();
    let y = Array1::from_shape_vec(2, vec![1.4, -0.2]).unwrap();
    let ws = Array1::from_shape_vec(3, (0..3).collect()).unwrap();

    let w = Array1::from_shape_vec(3, vec![0.2, -0.3, 1.5]).unwrap();
    let Xw = X.dot(&w);

    let dataset = DatasetBase::from((X, y));

    let mut datafit = Quadratic::new();
    datafit.initialize(&dataset);

    let penalty = L1::new(0.3);

    let (kkt, kkt_max) =
        kkt_violation(&dataset, w.view(), Xw.view(), ws.view(), &datafit, &penalty);
    let true_kkt = Array1::from_shape_vec(3, vec![21.318, 9.044, 5.4395]).unwrap();

    assert_array_all_close(kkt.view(), true_kkt.view(), 1e-8);
    assert_abs_diff_eq!(kkt_max, 21.318, epsilon = 1e-10);
}

#[test]
fn test_cd_epoch() {
    let X = Array2::from_shape_vec((2, 3), vec![3.4, -1.2, 2.3, 9.8, -2.7, -0.2]).unwrap();
    let y = Array1::from_shape_vec(2, vec![1.2, -0.9]).unwrap();
    let ws = Array1::from_shape_vec(3, (0..3).collect()).unwrap();

    let mut w = Array1::from_shape_vec(3, vec![1.3, -1.4, 1.5]).unwrap();
    let mut Xw = X.dot(&w);

    let dataset = DatasetBase::from((X, y));

    let mut datafit = Quadratic::new();
    datafit.initialize(&dataset);

    let penalty = L1::new(0.3);

    cd_epoch(&dataset, &datafit, &penalty, &mut w, &mut Xw, ws.view());

    let true_w = Array1::from_shape_vec(3, vec![-0.51752788, -1.24688448, 0.48867352]).unwrap();
    let true_Xw = Array1::from_shape_vec(2, vec![0.86061567, -1.80291985]).unwrap();

    assert_array_all_close(w.view(), true_w.view(), 1e-8);
    assert_array_all_close(Xw.view(), true_Xw.view(), 1e-8);
}

#[test]
fn test_construct_ws_from_kkt() {
    let mut kkt = array![0.5, 0.1, 2.3, 0.7];
    let w = array![0., 1.2, 0., 0.];

    let ws = construct_ws_from_kkt(&mut kkt, w.view(), 2);

    // The non-null weight is ranked first, then the largest violation.
    assert_eq!(ws, array![1, 2]);
}

#[test]
fn test_kkt_check() {
    let (X, y) = generate_random_data(30, 50);
    let alpha_max = compute_alpha_max(X.view(), y.view());
    let alpha = alpha_max * 0.1;

    let dataset = DatasetBase::from((X.clone(), y.clone()));
    let mut datafit = Quadratic::new();
    let penalty = L1::new(alpha);
    let (w, converged) = coordinate_descent(&dataset, &mut datafit, &penalty, &options(1e-9));
    assert!(converged);

    // At the optimum |X^T (y - Xw)| / n <= alpha for every feature
    let r = &y - &X.dot(&w);
    let xr = X.t().dot(&r) / 30.;
    for &xr_j in xr.iter() {
        assert!(xr_j.abs() <= alpha + 1e-8, "{} > {}", xr_j.abs(), alpha);
    }
}

#[test]
fn test_null_weight() {
    let (X, y) = generate_random_data(30, 50);
    let alpha_max = compute_alpha_max(X.view(), y.view());

    let dataset = DatasetBase::from((X, y));
    let mut datafit = Quadratic::new();
    let penalty = L1::new(alpha_max);
    let (w, converged) = coordinate_descent(&dataset, &mut datafit, &penalty, &options(1e-9));
    assert!(converged);

    assert_eq!(w, Array1::<f64>::zeros(50));
}

#[test]
fn test_reports_non_convergence() {
    let (X, y) = generate_random_data(30, 50);
    let alpha_max = compute_alpha_max(X.view(), y.view());

    let dataset = DatasetBase::from((X, y));
    let mut datafit = Quadratic::new();
    let penalty = L1::new(alpha_max * 0.01);

    // A single epoch on a working set of 10 features leaves the 40 others
    // violating the optimality conditions.
    let starved = SolverOptions {
        ws_start_size: 10,
        max_iterations: 1,
        max_epochs: 1,
        tolerance: 1e-12,
        verbose: false,
    };
    let (w, converged) = coordinate_descent(&dataset, &mut datafit, &penalty, &starved);

    assert!(!converged);
    assert!(w.iter().filter(|&&w_j| w_j != 0.).count() <= 10);
}
