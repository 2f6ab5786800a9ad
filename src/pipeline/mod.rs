//! The analysis as a sequence of stages: load, explore, select, train and
//! evaluate. Each stage is a plain function so it can be run on its own;
//! [`run`] chains them once over the configured input.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::analysis::{
    correlation_matrix, describe, dtypes, null_counts, target_correlations, CorrelationMatrix,
    Description,
};
use crate::datasets::{read_csv, train_test_split, DType, DataFrame, DatasetBase};
use crate::error::{EdaError, Result};
use crate::estimators::error::EstimatorError;
use crate::estimators::{Lasso, LinearRegression, Ridge};
use crate::metrics::{evaluate, Evaluation};
use crate::param_guard::ParamGuard;
use crate::plots;
use crate::traits::{Fit, LinearModel};


mod config;
mod report;

pub use config::{ExperimentParams, ExperimentValidParams, FEATURES, TARGET};
pub use report::Report;

pub const LINEAR_REGRESSION: &str = "Linear Regression";
pub const RIDGE_REGRESSION: &str = "Ridge Regression";
pub const LASSO_REGRESSION: &str = "Lasso Regression";

/// Rows shown in the head preview.
pub const HEAD_ROWS: usize = 5;

/// Descriptive statistics of the loaded table
#[derive(Debug, Clone, PartialEq)]
pub struct Exploration {
    pub null_counts: Vec<(String, usize)>,
    pub dtypes: Vec<(String, DType)>,
    pub description: Description,
    pub correlations: CorrelationMatrix,
    /// Correlation of every numeric column with the target, strongest first
    pub target_correlations: Vec<(String, f64)>,
}

/// The three fitted models, in comparison order
#[derive(Debug, Clone, PartialEq)]
pub struct Models {
    pub linear: LinearRegression<f64>,
    pub ridge: Ridge<f64>,
    pub lasso: Lasso<f64>,
}

impl Models {
    /// Display name and model, least squares first.
    pub fn named(&self) -> [(&'static str, &dyn LinearModel<f64>); 3] {
        [
            (LINEAR_REGRESSION, &self.linear),
            (RIDGE_REGRESSION, &self.ridge),
            (LASSO_REGRESSION, &self.lasso),
        ]
    }
}

/// Reads the configured input file.
pub fn load(params: &ExperimentValidParams) -> Result<DataFrame> {
    read_csv(params.input())
}

/// Computes null counts, column types, summary statistics and correlations.
///
/// Fails when `target` is not a numeric column, since the correlation ranking
/// is taken against it.
pub fn explore(frame: &DataFrame, target: &str) -> Result<Exploration> {
    let column = frame
        .column(target)
        .ok_or_else(|| EdaError::MissingColumn(target.to_string()))?;
    if !column.dtype().is_numeric() {
        return Err(EdaError::NonNumeric(target.to_string()));
    }

    let correlations = correlation_matrix(frame);
    let ranked = target_correlations(&correlations, target)?;
    info!(
        "Explored {} columns, strongest correlation with {}: {:?}",
        frame.shape().1,
        target,
        ranked.iter().find(|(name, _)| name != target)
    );

    Ok(Exploration {
        null_counts: null_counts(frame),
        dtypes: dtypes(frame),
        description: describe(frame),
        correlations,
        target_correlations: ranked,
    })
}

/// Writes a plot through `render` and records its path, or logs why it could
/// not be written.
fn render_or_warn<R>(path: PathBuf, render: R, rendered: &mut Vec<PathBuf>)
where
    R: FnOnce(&Path) -> Result<()>,
{
    match render(&path) {
        Ok(()) => {
            info!("Saved plot to {}", path.display());
            rendered.push(path);
        }
        Err(err) => warn!("Could not render {}: {}", path.display(), err),
    }
}

fn ensure_dir(dir: &Path) -> bool {
    match fs::create_dir_all(dir) {
        Ok(()) => true,
        Err(err) => {
            warn!("Could not create plot directory {}: {}", dir.display(), err);
            false
        }
    }
}

/// Renders the target distribution, the pairwise grid of `features` and
/// `target`, and the correlation heatmap into `dir`. Failures are logged and
/// skipped; the paths of the plots actually written are returned.
pub fn render_exploration<S: AsRef<str>>(
    frame: &DataFrame,
    exploration: &Exploration,
    features: &[S],
    target: &str,
    dir: &Path,
) -> Vec<PathBuf> {
    let mut rendered = Vec::new();
    if !ensure_dir(dir) {
        return rendered;
    }

    let name = format!("{}_distribution.svg", target.to_lowercase());
    render_or_warn(
        dir.join(name),
        |path| {
            let values = frame.column(target).and_then(|c| c.as_numeric());
            let values = values.ok_or_else(|| EdaError::NonNumeric(target.to_string()))?;
            plots::render_target_distribution(values.into(), target, path)
        },
        &mut rendered,
    );
    render_or_warn(
        dir.join("pairplot.svg"),
        |path| {
            let mut columns: Vec<&str> = features.iter().map(AsRef::as_ref).collect();
            columns.push(target);
            plots::render_pairplot(frame, &columns, path)
        },
        &mut rendered,
    );
    render_or_warn(
        dir.join("correlation_heatmap.svg"),
        |path| plots::render_correlation_heatmap(&exploration.correlations, path),
        &mut rendered,
    );
    rendered
}

/// Projects the table onto `features` and `target`.
///
/// The returned dataset keeps the feature order given here, which is also the
/// order of the fitted coefficients.
pub fn select_features<S: AsRef<str>>(
    frame: &DataFrame,
    features: &[S],
    target: &str,
) -> Result<DatasetBase<f64>> {
    let records = frame.to_matrix(features)?;
    let targets = frame.numeric_column(target)?;
    let names: Vec<&str> = features.iter().map(AsRef::as_ref).collect();
    info!("Selected features {:?} for target {}", names, target);
    Ok(DatasetBase::new(records, targets).with_feature_names(names))
}

fn fit_model<P>(params: P, train: &DatasetBase<f64>) -> Result<P::Object>
where
    P: Fit<f64, EstimatorError>,
{
    Ok(params.fit(train)?)
}

/// Fits least squares, ridge and lasso on the training partition.
pub fn train(train: &DatasetBase<f64>, params: &ExperimentValidParams) -> Result<Models> {
    let linear = fit_model(LinearRegression::params(), train)?;
    let ridge = fit_model(Ridge::params().alpha(params.ridge_alpha()), train)?;
    let lasso = fit_model(Lasso::params().alpha(params.lasso_alpha()), train)?;
    info!("Fitted 3 models on {} samples", train.n_samples());
    Ok(Models {
        linear,
        ridge,
        lasso,
    })
}

/// Scores every model on the test partition, in comparison order.
pub fn evaluate_models(models: &Models, test: &DatasetBase<f64>) -> Result<Vec<Evaluation<f64>>> {
    let evaluations = models
        .named()
        .iter()
        .map(|(name, model)| evaluate(name, *model, test))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(evaluations)
}

/// Runs every stage once and collects what is printed.
///
/// Any stage error aborts the run. Plot rendering never does: a plot that
/// cannot be written is logged and left out of [`Report::plots`].
pub fn run(params: &ExperimentParams) -> Result<Report> {
    let params = params.check_ref()?;

    let frame = load(params)?;
    let exploration = explore(&frame, params.target())?;
    let mut rendered = match params.plot_dir() {
        Some(dir) => render_exploration(&frame, &exploration, params.features(), params.target(), dir),
        None => Vec::new(),
    };

    let dataset = select_features(&frame, params.features(), params.target())?;
    let (train_set, test_set) = train_test_split(&dataset, params.test_size(), params.seed())?;

    let models = train(&train_set, params)?;
    let evaluations = evaluate_models(&models, &test_set)?;

    if let (Some(dir), Some(linear)) = (params.plot_dir(), evaluations.first()) {
        if ensure_dir(dir) {
            render_or_warn(
                dir.join("actual_vs_predicted.svg"),
                |path| plots::render_actual_vs_predicted(linear, params.target(), path),
                &mut rendered,
            );
        }
    }

    Ok(Report {
        shape: frame.shape(),
        head: frame.head(HEAD_ROWS),
        exploration,
        target: params.target().to_string(),
        train_shape: train_set.shape(),
        test_shape: test_set.shape(),
        feature_names: train_set.feature_names().to_vec(),
        intercept: models.linear.intercept(),
        coefficients: models.linear.coefficients().to_owned(),
        evaluations,
        plots: rendered,
    })
}
