use approx::assert_abs_diff_eq;
use ndarray::array;

use super::*;
use crate::datasets::{read_csv_from, Column, DType, DataFrame};
use crate::error::EdaError;

fn sample_frame() -> DataFrame {
    let csv = "\
RM,LSTAT,CHAS,TOWN,MEDV
6.575,4.98,0,Nahant,24.0
6.421,9.14,0,Swampscott,21.6
7.185,4.03,0,,34.7
6.998,,0,Marblehead,33.4
7.147,5.33,0,Marblehead,36.2
";
    read_csv_from(csv.as_bytes()).unwrap()
}

#[test]
fn test_null_counts_and_dtypes() {
    let frame = sample_frame();

    assert_eq!(
        null_counts(&frame),
        vec![
            ("RM".to_string(), 0),
            ("LSTAT".to_string(), 1),
            ("CHAS".to_string(), 0),
            ("TOWN".to_string(), 1),
            ("MEDV".to_string(), 0),
        ]
    );
    assert_eq!(
        dtypes(&frame)
            .into_iter()
            .map(|(_, dtype)| dtype)
            .collect::<Vec<_>>(),
        vec![
            DType::Float64,
            DType::Float64,
            DType::Int64,
            DType::Object,
            DType::Float64
        ]
    );
}

#[test]
fn test_describe() {
    let frame = sample_frame();
    let description = describe(&frame);

    // Text columns are skipped
    assert_eq!(description.columns.len(), 4);
    assert!(description.column("TOWN").is_none());

    let medv = description.column("MEDV").unwrap();
    assert_eq!(medv.count, 5);
    assert_abs_diff_eq!(medv.mean, 29.98, epsilon = 1e-10);
    assert_abs_diff_eq!(medv.std, 6.682963414534, epsilon = 1e-9);
    assert_eq!(medv.min, 21.6);
    assert_abs_diff_eq!(medv.q25, 24.0, epsilon = 1e-12);
    assert_abs_diff_eq!(medv.median, 33.4, epsilon = 1e-12);
    assert_abs_diff_eq!(medv.q75, 34.7, epsilon = 1e-12);
    assert_eq!(medv.max, 36.2);

    // Missing cells are left out of every statistic
    let lstat = description.column("LSTAT").unwrap();
    assert_eq!(lstat.count, 4);
    assert_abs_diff_eq!(lstat.mean, 5.87, epsilon = 1e-10);
    assert_abs_diff_eq!(lstat.q25, 4.7425, epsilon = 1e-10);
    assert_abs_diff_eq!(lstat.median, 5.155, epsilon = 1e-10);
    assert_abs_diff_eq!(lstat.q75, 6.2825, epsilon = 1e-10);
}

#[test]
fn test_describe_degenerate_columns() {
    let frame = DataFrame::new(vec![
        Column::numeric("single", DType::Float64, vec![f64::NAN, 3.5, f64::NAN]),
        Column::numeric("empty", DType::Float64, vec![f64::NAN; 3]),
    ])
    .unwrap();
    let description = describe(&frame);

    let single = description.column("single").unwrap();
    assert_eq!(single.count, 1);
    assert_eq!(single.mean, 3.5);
    assert!(single.std.is_nan());
    assert_abs_diff_eq!(single.median, 3.5, epsilon = 1e-12);

    let empty = description.column("empty").unwrap();
    assert_eq!(empty.count, 0);
    assert!(empty.values()[1..].iter().all(|v| v.is_nan()));
}

#[test]
fn test_correlation_matrix() {
    let frame = DataFrame::new(vec![
        Column::numeric("a", DType::Float64, vec![1., 2., 3., 4.]),
        Column::numeric("b", DType::Float64, vec![2., 4., 6., 8.]),
        Column::numeric("c", DType::Float64, vec![4., 3., 2., 1.]),
        Column::numeric("d", DType::Float64, vec![5., 5., 5., 5.]),
        Column::text("e", vec![None; 4]),
    ])
    .unwrap();
    let matrix = correlation_matrix(&frame);

    assert_eq!(matrix.names, vec!["a", "b", "c", "d"]);
    assert_eq!(matrix.values.dim(), (4, 4));
    assert_abs_diff_eq!(matrix.get("a", "b").unwrap(), 1., epsilon = 1e-12);
    assert_abs_diff_eq!(matrix.get("a", "c").unwrap(), -1., epsilon = 1e-12);
    assert!(matrix.get("a", "d").unwrap().is_nan());
    assert_eq!(matrix.get("d", "d"), Some(1.));
}

#[test]
fn test_correlation_uses_pairwise_complete_rows() {
    let frame = DataFrame::new(vec![
        Column::numeric("x", DType::Float64, vec![1., 2., f64::NAN, 4., 5.]),
        Column::numeric("y", DType::Float64, vec![2., 4., 100., 8., f64::NAN]),
    ])
    .unwrap();
    let matrix = correlation_matrix(&frame);

    assert_abs_diff_eq!(matrix.get("x", "y").unwrap(), 1., epsilon = 1e-12);
}

#[test]
fn test_target_correlations_sorted_by_magnitude() {
    let frame = DataFrame::new(vec![
        Column::numeric("weak", DType::Float64, vec![1., 3., 2., 4., 3.]),
        Column::numeric("flat", DType::Float64, vec![1., 1., 1., 1., 1.]),
        Column::numeric("neg", DType::Float64, vec![5., 4., 3., 2., 1.]),
        Column::numeric("MEDV", DType::Float64, vec![1., 2., 3., 4., 5.2]),
    ])
    .unwrap();
    let matrix = correlation_matrix(&frame);

    let ranked = target_correlations(&matrix, "MEDV").unwrap();
    let names: Vec<&str> = ranked.iter().map(|(name, _)| name.as_str()).collect();

    assert_eq!(names, vec!["MEDV", "neg", "weak", "flat"]);
    assert_eq!(ranked[0].1, 1.);
    assert!(ranked[1].1 < -0.99);
    assert!(ranked[3].1.is_nan());
}

#[test]
fn test_target_correlations_missing_target() {
    let matrix = correlation_matrix(&sample_frame());

    assert!(matches!(
        target_correlations(&matrix, "PRICE"),
        Err(EdaError::MissingColumn(name)) if name == "PRICE"
    ));
}

#[test]
fn test_histogram() {
    let values = array![0., 1., 2., 3., 4., 5., 6., 7., 8., 9., 10., f64::NAN];
    let hist = histogram(values.view(), 5).unwrap();

    assert_eq!(hist.n_bins(), 5);
    assert_eq!(hist.edges, array![0., 2., 4., 6., 8., 10.]);
    // The last bin is closed on the right
    assert_eq!(hist.counts, array![2, 2, 2, 2, 3]);
    assert_abs_diff_eq!(hist.densities().sum() * 2., 1., epsilon = 1e-12);

    let thirds = histogram(array![1., 0.5, 0., 1. / 3.].view(), 3).unwrap();
    assert_eq!(thirds.counts, array![1, 2, 1]);

    let constant = histogram(array![3., 3., 3.].view(), 4).unwrap();
    assert_eq!(constant.counts.sum(), 3);
    assert!(histogram(array![f64::NAN].view(), 4).is_none());
}

#[test]
fn test_gaussian_kde() {
    let values = array![-1., 0., 1.];
    let kde = gaussian_kde(values.view()).unwrap();

    // std = 1 with ddof = 1, Scott factor 3^(-1/5)
    assert_abs_diff_eq!(kde.bandwidth(), 3f64.powf(-0.2), epsilon = 1e-12);

    // The density integrates to one on a wide grid
    let curve = kde.curve(2001);
    let step = curve[1].0 - curve[0].0;
    let area: f64 = curve.iter().map(|(_, d)| d * step).sum();
    assert_abs_diff_eq!(area, 1., epsilon = 1e-2);

    // Symmetric samples give a symmetric density
    assert_abs_diff_eq!(kde.density(0.7), kde.density(-0.7), epsilon = 1e-12);

    assert!(gaussian_kde(array![2., 2., 2.].view()).is_none());
    assert!(gaussian_kde(array![2.].view()).is_none());
}
