use std::f64::consts::PI;

use ndarray::{Array1, ArrayView1};
use ndarray_stats::histogram::{Bins, Edges};
use noisy_float::types::n64;

/// Equal-width bins over the range of the data
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` increasing edges; bin `k` spans `edges[k]..edges[k + 1]`
    pub edges: Array1<f64>,
    pub counts: Array1<usize>,
}

impl Histogram {
    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    /// Counts scaled so that the histogram integrates to 1.
    pub fn densities(&self) -> Array1<f64> {
        let total = self.counts.sum() as f64;
        let width = self.edges[1] - self.edges[0];
        self.counts.mapv(|c| c as f64 / (total * width))
    }
}

/// Builds a histogram of the finite values with `bins` equal-width bins.
///
/// The last bin is closed on the right so that the maximum is counted. When
/// all values are equal the range is widened by 0.5 on each side. Returns
/// `None` when there is no finite value or `bins` is zero.
pub fn histogram(values: ArrayView1<f64>, bins: usize) -> Option<Histogram> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return None;
    }

    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges = Array1::from_shape_fn(bins + 1, |k| lo + width * k as f64);
    let grid = Bins::new(Edges::from(edges.iter().map(|&e| n64(e)).collect::<Vec<_>>()));

    // Bins are half-open, so the values at or past the last edge belong to
    // the closed last bin.
    let mut counts = Array1::<usize>::zeros(bins);
    for v in finite {
        let k = grid.index_of(&n64(v)).map_or(bins - 1, |k| k.min(bins - 1));
        counts[k] += 1;
    }

    Some(Histogram { edges, counts })
}

/// Gaussian kernel density estimate
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKde {
    samples: Array1<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Estimated density at `x`.
    pub fn density(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let norm = 1. / (self.samples.len() as f64 * h * (2. * PI).sqrt());
        self.samples
            .iter()
            .map(|&s| (-0.5 * ((x - s) / h).powi(2)).exp())
            .sum::<f64>()
            * norm
    }

    /// Evaluates the density on `n_points` evenly spaced points spanning the
    /// samples extended by three bandwidths on each side.
    pub fn curve(&self, n_points: usize) -> Vec<(f64, f64)> {
        let lo = self.samples.iter().copied().fold(f64::INFINITY, f64::min) - 3. * self.bandwidth;
        let hi =
            self.samples.iter().copied().fold(f64::NEG_INFINITY, f64::max) + 3. * self.bandwidth;
        let step = (hi - lo) / (n_points.max(2) - 1) as f64;
        (0..n_points.max(2))
            .map(|k| {
                let x = lo + step * k as f64;
                (x, self.density(x))
            })
            .collect()
    }
}

/// Fits a Gaussian kernel density estimate with Scott's bandwidth,
/// `std * n^(-1/5)`.
///
/// Returns `None` with fewer than two finite samples or when the samples have
/// no spread, since the bandwidth would be zero.
pub fn gaussian_kde(values: ArrayView1<f64>) -> Option<GaussianKde> {
    let samples: Array1<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let n = samples.len();
    if n < 2 {
        return None;
    }
    let std = samples.std(1.);
    if !(std > 0.) {
        return None;
    }
    let bandwidth = std * (n as f64).powf(-0.2);
    Some(GaussianKde { samples, bandwidth })
}
