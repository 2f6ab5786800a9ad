//! Descriptive statistics of a loaded [`DataFrame`].
//!
//! Everything here is read-only: the analysis never alters the table it is
//! given and never influences which features are later selected.

use crate::datasets::{DType, DataFrame};

#[cfg(test)]
mod tests;

mod correlation;
mod density;
mod describe;

pub use correlation::{correlation_matrix, target_correlations, CorrelationMatrix};
pub use density::{gaussian_kde, histogram, GaussianKde, Histogram};
pub use describe::{describe, ColumnSummary, Description};

/// Number of missing cells per column, in table order.
pub fn null_counts(frame: &DataFrame) -> Vec<(String, usize)> {
    frame
        .columns()
        .iter()
        .map(|column| (column.name().to_string(), column.null_count()))
        .collect()
}

/// Inferred type of every column, in table order.
pub fn dtypes(frame: &DataFrame) -> Vec<(String, DType)> {
    frame
        .columns()
        .iter()
        .map(|column| (column.name().to_string(), column.dtype()))
        .collect()
}
