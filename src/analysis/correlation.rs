use std::cmp::Ordering;

use ndarray::{Array1, Array2};
use ndarray_stats::CorrelationExt;

use crate::datasets::DataFrame;
use crate::error::{EdaError, Result};
use crate::helpers::helpers::argsort_by;

/// Symmetric matrix of Pearson correlations between the numeric columns of a
/// table. Row and column `i` both belong to `names[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub names: Vec<String>,
    pub values: Array2<f64>,
}

impl CorrelationMatrix {
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        Some(self.values[[self.index_of(row)?, self.index_of(col)?]])
    }
}

/// Pearson correlation of every pair of numeric columns.
///
/// Each pair only uses the rows where both cells are present. A pair where
/// either side has no variance gets NaN. The diagonal is 1.
pub fn correlation_matrix(frame: &DataFrame) -> CorrelationMatrix {
    let columns: Vec<(&str, &[f64])> = frame.numeric_columns().collect();
    let n = columns.len();

    let mut values = Array2::<f64>::from_elem((n, n), f64::NAN);
    for i in 0..n {
        values[[i, i]] = 1.;
        for j in (i + 1)..n {
            let r = pairwise_pearson(columns[i].1, columns[j].1);
            values[[i, j]] = r;
            values[[j, i]] = r;
        }
    }

    CorrelationMatrix {
        names: columns.iter().map(|(name, _)| name.to_string()).collect(),
        values,
    }
}

fn pairwise_pearson(x: &[f64], y: &[f64]) -> f64 {
    let complete: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(&a, &b)| (a, b))
        .collect();
    let m = complete.len();
    if m < 2 {
        return f64::NAN;
    }

    // One row per variable, one column per observation
    let mut observations = Array2::<f64>::zeros((2, m));
    for (k, (a, b)) in complete.into_iter().enumerate() {
        observations[[0, k]] = a;
        observations[[1, k]] = b;
    }
    match observations.pearson_correlation() {
        Ok(corr) if corr[[0, 1]].is_finite() => corr[[0, 1]].clamp(-1., 1.),
        _ => f64::NAN,
    }
}

/// Correlations of every numeric column with `target`, strongest first.
///
/// Columns are ranked by the magnitude of their correlation; NaN entries go
/// last. The target itself is included with a correlation of 1.
pub fn target_correlations(
    matrix: &CorrelationMatrix,
    target: &str,
) -> Result<Vec<(String, f64)>> {
    let row = matrix
        .index_of(target)
        .ok_or_else(|| EdaError::MissingColumn(target.to_string()))?;
    let correlations: Array1<f64> = matrix.values.row(row).to_owned();

    let order = argsort_by(&correlations, |a, b| match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.abs().partial_cmp(&a.abs()).unwrap_or(Ordering::Equal),
    });

    Ok(order
        .into_iter()
        .map(|j| (matrix.names[j].clone(), correlations[j]))
        .collect())
}
