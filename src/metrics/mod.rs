//! Regression metrics and the evaluation of a fitted model on held-out data.

use std::fmt;

use log::warn;
use ndarray::{Array1, ArrayView1};

use crate::datasets::DatasetBase;
use crate::estimators::error::{EstimatorError, Result};
use crate::traits::LinearModel;
use crate::Float;

#[cfg(test)]
mod tests;

/// Mean of the squared differences between targets and predictions.
///
/// Returns `None` for empty inputs.
pub fn mean_squared_error<F: Float>(y_true: ArrayView1<F>, y_pred: ArrayView1<F>) -> Option<F> {
    if y_true.is_empty() || y_true.len() != y_pred.len() {
        return None;
    }
    let residuals = &y_true - &y_pred;
    residuals.mapv(|r| r * r).mean()
}

/// Coefficient of determination, `1 - SS_res / SS_tot`.
///
/// Returns `None` when it is undefined: empty inputs or constant targets.
pub fn r2_score<F: Float>(y_true: ArrayView1<F>, y_pred: ArrayView1<F>) -> Option<F> {
    if y_true.is_empty() || y_true.len() != y_pred.len() {
        return None;
    }
    let mean = y_true.mean()?;
    let ss_tot = y_true.fold(F::zero(), |acc, &y| acc + (y - mean) * (y - mean));
    if ss_tot == F::zero() {
        return None;
    }
    let ss_res = y_true
        .iter()
        .zip(y_pred.iter())
        .fold(F::zero(), |acc, (&y, &p)| acc + (y - p) * (y - p));
    Some(F::one() - ss_res / ss_tot)
}

/// Non-fatal problems found while scoring a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationWarning {
    /// Every test target has the same value, so R² is undefined. The reported
    /// R² is 1 for a perfect prediction and 0 otherwise.
    DegenerateTarget,
}

impl fmt::Display for EvaluationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationWarning::DegenerateTarget => write!(
                f,
                "test targets are constant, R² is undefined and reported by convention"
            ),
        }
    }
}

/// Scores of one model on the test partition, together with the values they
/// were computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<F> {
    pub name: String,
    pub actual: Array1<F>,
    pub predicted: Array1<F>,
    pub mse: F,
    pub r2: F,
    pub warnings: Vec<EvaluationWarning>,
}

impl<F: Float> Evaluation<F> {
    pub fn is_degenerate(&self) -> bool {
        self.warnings.contains(&EvaluationWarning::DegenerateTarget)
    }
}

/// Predicts the test records with `model` and scores the predictions.
pub fn evaluate<F, M>(name: &str, model: &M, test: &DatasetBase<F>) -> Result<Evaluation<F>>
where
    F: Float,
    M: LinearModel<F> + ?Sized,
{
    if test.n_samples() == 0 {
        return Err(EstimatorError::NotEnoughSamples(0));
    }
    if model.coefficients().len() != test.n_features() {
        return Err(EstimatorError::ShapeMismatch {
            expected: model.coefficients().len(),
            found: test.n_features(),
        });
    }

    let actual = test.targets().to_owned();
    let predicted = model.predict(test.records());
    let mse = mean_squared_error(actual.view(), predicted.view())
        .ok_or(EstimatorError::NotEnoughSamples(0))?;

    let mut warnings = Vec::new();
    let r2 = match r2_score(actual.view(), predicted.view()) {
        Some(r2) => r2,
        None => {
            warn!("{}: {}", name, EvaluationWarning::DegenerateTarget);
            warnings.push(EvaluationWarning::DegenerateTarget);
            match mse == F::zero() {
                true => F::one(),
                false => F::zero(),
            }
        }
    };

    Ok(Evaluation {
        name: name.to_string(),
        actual,
        predicted,
        mse,
        r2,
        warnings,
    })
}
