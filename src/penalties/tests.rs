use approx::assert_abs_diff_eq;
use ndarray::array;

use crate::helpers::test_helpers::assert_array_all_close;
use crate::penalties::*;

#[test]
fn test_value() {
    let a = array![3.4, 2.1, -2.3, -0.3, 4.5];
    let penalty = L1::new(0.5);
    assert_abs_diff_eq!(penalty.value(a.view()), 6.3, epsilon = 1e-12);
}

#[test]
fn test_prox() {
    let penalty = L1::new(0.5);

    assert_eq!(penalty.prox(0.3, 1. / 0.5), 0.);
    assert_abs_diff_eq!(penalty.prox(12.4, 1. / 0.5), 11.4, epsilon = 1e-12);
    assert_abs_diff_eq!(penalty.prox(-49.2, 1. / 0.5), -48.2, epsilon = 1e-12);
}

#[test]
fn test_subdiff_dist() {
    let w = array![-3.3, 0., 3.2];
    let grad = array![0.4, 3.2, -3.4];
    let ws = array![0, 1, 2];

    let penalty = L1::new(0.5);
    let (subdiff_dist, max_dist) = penalty.subdiff_distance(w.view(), grad.view(), ws.view());

    assert_array_all_close(subdiff_dist.view(), array![0.1, 2.7, 2.9].view(), 1e-12);
    assert_abs_diff_eq!(max_dist, 2.9, epsilon = 1e-12);
}

#[test]
fn test_subdiff_dist_inside_subdifferential() {
    let w = array![0., 0.];
    let grad = array![0.2, -0.4];
    let ws = array![0, 1];

    let penalty = L1::new(0.5);
    let (subdiff_dist, max_dist) = penalty.subdiff_distance(w.view(), grad.view(), ws.view());

    assert_eq!(subdiff_dist, array![0., 0.]);
    assert_eq!(max_dist, 0.);
}
