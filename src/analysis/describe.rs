use ndarray::Array1;
use ndarray_stats::interpolate::Linear;
use ndarray_stats::{Quantile1dExt, QuantileExt};
use noisy_float::types::{n64, N64};

use crate::datasets::DataFrame;

/// Summary statistics of one numeric column, computed over its non-missing
/// cells.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (ddof = 1)
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Statistics in display order: count, mean, std, min, 25%, 50%, 75%, max.
    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Per-column summaries of every numeric column of a table
#[derive(Debug, Clone, PartialEq)]
pub struct Description {
    pub columns: Vec<ColumnSummary>,
}

impl Description {
    /// Row labels matching [`ColumnSummary::values`].
    pub const STATISTICS: [&'static str; 8] =
        ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|summary| summary.name == name)
    }
}

/// Computes count, mean, standard deviation, extrema and quartiles of every
/// numeric column. Quartiles interpolate linearly between order statistics.
pub fn describe(frame: &DataFrame) -> Description {
    let columns = frame
        .numeric_columns()
        .map(|(name, values)| summarize(name, values))
        .collect();
    Description { columns }
}

fn summarize(name: &str, values: &[f64]) -> ColumnSummary {
    let mut present: Array1<N64> = values
        .iter()
        .filter(|v| !v.is_nan())
        .map(|&v| n64(v))
        .collect();
    let count = present.len();

    if count == 0 {
        return ColumnSummary {
            name: name.to_string(),
            count,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        };
    }

    let raw = present.mapv(|v| v.raw());
    let mean = raw.mean().unwrap_or(f64::NAN);
    let std = match count {
        1 => f64::NAN,
        _ => raw.std(1.),
    };
    let min = present.min().map_or(f64::NAN, |&v| v.raw());
    let max = present.max().map_or(f64::NAN, |&v| v.raw());

    let mut quantile = |q: f64| {
        present
            .quantile_mut(n64(q), &Linear)
            .map_or(f64::NAN, |v| v.raw())
    };
    let q25 = quantile(0.25);
    let median = quantile(0.5);
    let q75 = quantile(0.75);

    ColumnSummary {
        name: name.to_string(),
        count,
        mean,
        std,
        min,
        q25,
        median,
        q75,
        max,
    }
}
