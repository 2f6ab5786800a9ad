use approx::assert_abs_diff_eq;
use ndarray::{array, Array1};

use super::*;
use crate::estimators::LinearRegression;
use crate::helpers::test_helpers::generate_linear_housing_data;
use crate::traits::Fit;

struct FixedModel {
    intercept: f64,
    coefficients: Array1<f64>,
}

impl LinearModel<f64> for FixedModel {
    fn intercept(&self) -> f64 {
        self.intercept
    }

    fn coefficients(&self) -> ArrayView1<f64> {
        self.coefficients.view()
    }
}

#[test]
fn test_mean_squared_error() {
    let y_true = array![3., -0.5, 2., 7.];
    let y_pred = array![2.5, 0., 2., 8.];

    assert_abs_diff_eq!(
        mean_squared_error(y_true.view(), y_pred.view()).unwrap(),
        0.375,
        epsilon = 1e-12
    );
    assert_eq!(mean_squared_error(y_true.view(), y_true.view()), Some(0.));
    assert_eq!(
        mean_squared_error(Array1::<f64>::zeros(0).view(), Array1::zeros(0).view()),
        None
    );
}

#[test]
fn test_r2_score() {
    let y_true = array![3., -0.5, 2., 7.];
    let y_pred = array![2.5, 0., 2., 8.];

    assert_abs_diff_eq!(
        r2_score(y_true.view(), y_pred.view()).unwrap(),
        0.9486081370449679,
        epsilon = 1e-12
    );
    assert_eq!(r2_score(y_true.view(), y_true.view()), Some(1.));

    // Predicting the mean scores zero, anything worse is negative
    let mean = Array1::from_elem(4, 2.875);
    assert_abs_diff_eq!(r2_score(y_true.view(), mean.view()).unwrap(), 0., epsilon = 1e-12);
    let bad = array![7., 2., -0.5, 3.];
    assert!(r2_score(y_true.view(), bad.view()).unwrap() < 0.);

    assert_eq!(r2_score(array![1., 1.].view(), array![1., 2.].view()), None);
}

#[test]
fn test_evaluate_perfect_fit() {
    let (X, y) = generate_linear_housing_data(120);
    let dataset = DatasetBase::from((X, y));
    let model = LinearRegression::params().fit(&dataset).unwrap();

    let evaluation = evaluate("Linear Regression", &model, &dataset).unwrap();

    assert_eq!(evaluation.name, "Linear Regression");
    assert_eq!(evaluation.predicted.len(), 120);
    assert_abs_diff_eq!(evaluation.mse, 0., epsilon = 1e-6);
    assert_abs_diff_eq!(evaluation.r2, 1., epsilon = 1e-6);
    assert!(evaluation.warnings.is_empty());
}

#[test]
fn test_evaluate_constant_targets() {
    let records = array![[1.], [2.], [3.]];
    let test = DatasetBase::from((records, array![4., 4., 4.]));

    let exact = FixedModel {
        intercept: 4.,
        coefficients: array![0.],
    };
    let evaluation = evaluate("exact", &exact, &test).unwrap();
    assert_eq!(evaluation.warnings, vec![EvaluationWarning::DegenerateTarget]);
    assert!(evaluation.is_degenerate());
    assert_eq!(evaluation.r2, 1.);

    let off = FixedModel {
        intercept: 3.,
        coefficients: array![0.5],
    };
    let evaluation = evaluate("off", &off, &test).unwrap();
    assert!(evaluation.is_degenerate());
    assert_eq!(evaluation.r2, 0.);
    assert!(evaluation.mse > 0.);
}

#[test]
fn test_evaluate_shape_mismatch() {
    let test = DatasetBase::from((array![[1., 2.], [3., 4.]], array![1., 2.]));
    let model = FixedModel {
        intercept: 0.,
        coefficients: array![1.],
    };

    assert_eq!(
        evaluate("mismatch", &model, &test),
        Err(EstimatorError::ShapeMismatch {
            expected: 1,
            found: 2
        })
    );
}
