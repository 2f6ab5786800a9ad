use ndarray::array;

use crate::datafits::*;
use crate::helpers::test_helpers::*;

#[test]
fn test_initialization() {
    let x = array![[3.4, 2.1, 2.3], [3.4, -1.2, 0.2]];
    let y = array![-3.4, 2.1];

    let dataset = DatasetBase::from((x, y));
    let mut df = Quadratic::new();
    df.initialize(&dataset);

    let lipschitz = array![11.56, 2.925, 2.665];
    assert_array_all_close(df.lipschitz(), lipschitz.view(), 1e-8);
    let Xty = array![-4.42, -9.66, -7.4];
    assert_array_all_close(df.Xty.view(), Xty.view(), 1e-8);
}

#[test]
fn test_value() {
    let x = array![[3.6, 1.1, 2.2], [3.4, -1.2, 0.2]];
    let y = array![-3.3, 2.7];
    let w = array![-3.2, -0.21, 2.3];
    let xw = x.dot(&w);
    let dataset = DatasetBase::from((x, y));

    let df = Quadratic::new();
    let val = df.value(&dataset, xw.view());
    let r = &dataset.targets() - &xw;
    approx::assert_abs_diff_eq!(val, r.dot(&r) / 4., epsilon = 1e-12);
}

#[test]
fn test_gradient() {
    let x = array![[3.0, 1.1, 3.2], [3.4, -1.2, 0.2]];
    let y = array![-3.3, 2.4];
    let w = array![-3.2, -0.25, 3.3];
    let xw = x.dot(&w);

    let dataset = DatasetBase::from((x.clone(), y.clone()));

    let mut df = Quadratic::new();
    df.initialize(&dataset);

    // grad = X^T (Xw - y) / n
    let expected = x.t().dot(&(&xw - &y)) / 2.;
    let grad = df.full_grad(&dataset, xw.view());
    assert_array_all_close(grad.view(), expected.view(), 1e-10);
    approx::assert_abs_diff_eq!(df.gradient_j(&dataset, xw.view(), 1), expected[1], epsilon = 1e-10);
}
