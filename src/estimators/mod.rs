
pub mod error;
#[allow(clippy::module_inception)]
pub mod estimators;
pub mod hyperparams;

pub use estimators::{Lasso, LinearRegression, Ridge};
