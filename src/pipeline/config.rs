use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{EdaError, Result};
use crate::param_guard::ParamGuard;

/// Features the models are fitted on. The list is a manual choice informed
/// by the correlation ranking, not derived from it.
pub const FEATURES: [&str; 3] = ["RM", "LSTAT", "PTRATIO"];

/// Column the models predict.
pub const TARGET: &str = "MEDV";

/// A verified experiment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentValidParams {
    input: PathBuf,
    features: Vec<String>,
    target: String,
    test_size: f64,
    seed: u64,
    ridge_alpha: f64,
    lasso_alpha: f64,
    plot_dir: Option<PathBuf>,
}

impl ExperimentValidParams {
    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn test_size(&self) -> f64 {
        self.test_size
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn ridge_alpha(&self) -> f64 {
        self.ridge_alpha
    }

    pub fn lasso_alpha(&self) -> f64 {
        self.lasso_alpha
    }

    /// Directory receiving the SVG plots, `None` when rendering is disabled.
    pub fn plot_dir(&self) -> Option<&Path> {
        self.plot_dir.as_deref()
    }
}

/// An experiment configuration during construction
///
/// The defaults reproduce the reference analysis: `housing.csv`, features
/// [`FEATURES`], target [`TARGET`], a 20% test partition drawn with seed 42,
/// ridge alpha 1, lasso alpha 0.1 and plots written to `plots/`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentParams(ExperimentValidParams);

impl Default for ExperimentParams {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperimentParams {
    pub fn new() -> ExperimentParams {
        Self(ExperimentValidParams {
            input: PathBuf::from("housing.csv"),
            features: FEATURES.iter().map(|f| f.to_string()).collect(),
            target: TARGET.to_string(),
            test_size: 0.2,
            seed: 42,
            ridge_alpha: 1.,
            lasso_alpha: 0.1,
            plot_dir: Some(PathBuf::from("plots")),
        })
    }

    pub fn input<P: Into<PathBuf>>(mut self, input: P) -> Self {
        self.0.input = input.into();
        self
    }

    pub fn features<S: Into<String>>(mut self, features: Vec<S>) -> Self {
        self.0.features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn target<S: Into<String>>(mut self, target: S) -> Self {
        self.0.target = target.into();
        self
    }

    /// Fraction of the rows held out for evaluation, in `(0, 1)`.
    pub fn test_size(mut self, test_size: f64) -> Self {
        self.0.test_size = test_size;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.0.seed = seed;
        self
    }

    pub fn ridge_alpha(mut self, alpha: f64) -> Self {
        self.0.ridge_alpha = alpha;
        self
    }

    pub fn lasso_alpha(mut self, alpha: f64) -> Self {
        self.0.lasso_alpha = alpha;
        self
    }

    pub fn plot_dir<P: Into<PathBuf>>(mut self, plot_dir: P) -> Self {
        self.0.plot_dir = Some(plot_dir.into());
        self
    }

    /// Skips rendering altogether.
    pub fn without_plots(mut self) -> Self {
        self.0.plot_dir = None;
        self
    }
}

impl ParamGuard for ExperimentParams {
    type Checked = ExperimentValidParams;
    type Error = EdaError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let params = &self.0;
        if !(params.test_size > 0. && params.test_size < 1.) {
            return Err(EdaError::InvalidParameter(format!(
                "test size must lie in (0, 1), got {}",
                params.test_size
            )));
        }
        for (name, alpha) in [("ridge", params.ridge_alpha), ("lasso", params.lasso_alpha)] {
            if !alpha.is_finite() || alpha < 0. {
                return Err(EdaError::InvalidParameter(format!(
                    "{} alpha must be a non-negative number, got {}",
                    name, alpha
                )));
            }
        }
        if params.features.is_empty() {
            return Err(EdaError::InvalidParameter(
                "at least one feature is required".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for feature in params.features.iter() {
            if !seen.insert(feature.as_str()) {
                return Err(EdaError::InvalidParameter(format!(
                    "feature `{}` is listed twice",
                    feature
                )));
            }
        }
        if seen.contains(params.target.as_str()) {
            return Err(EdaError::InvalidParameter(format!(
                "target `{}` is also listed as a feature",
                params.target
            )));
        }
        Ok(params)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
