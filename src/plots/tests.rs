use std::fs;

use ndarray::{array, Array1};
use tempfile::tempdir;

use super::*;
use crate::analysis::correlation_matrix;
use crate::datasets::{Column, DType};
use crate::helpers::test_helpers::fill_random_vector;

fn random_frame(n: usize) -> DataFrame {
    let columns = ["RM", "LSTAT", "PTRATIO", "MEDV"]
        .iter()
        .enumerate()
        .map(|(j, name)| Column::numeric(*name, DType::Float64, fill_random_vector(n, j as u64)))
        .collect();
    DataFrame::new(columns).unwrap()
}

fn assert_svg(path: &Path) {
    let content = fs::read_to_string(path).unwrap();
    assert!(content.contains("<svg"), "{} is not an SVG file", path.display());
}

#[test]
fn test_padded_range() {
    assert_eq!(padded_range(vec![0., 10., f64::NAN]), -0.5..10.5);
    assert_eq!(padded_range(vec![2., 2.]), 1.5..2.5);
    assert_eq!(padded_range(Vec::new()), 0.0..1.0);
}

#[test]
fn test_diverging_color() {
    assert_eq!(diverging_color(0.), RGBColor(221, 221, 221));
    assert_eq!(diverging_color(-1.), RGBColor(59, 76, 192));
    assert_eq!(diverging_color(1.), RGBColor(180, 4, 38));
    assert_eq!(diverging_color(3.), diverging_color(1.));
    assert_eq!(diverging_color(f64::NAN), RGBColor(240, 240, 240));
}

#[test]
fn test_render_target_distribution() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("medv_distribution.svg");
    let values = Array1::from_vec(fill_random_vector(200, 3));

    render_target_distribution(values.view(), "MEDV", &path).unwrap();
    assert_svg(&path);

    let missing = array![f64::NAN, f64::NAN];
    assert!(matches!(
        render_target_distribution(missing.view(), "MEDV", &path),
        Err(EdaError::Render(_))
    ));
}

#[test]
fn test_render_pairplot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pairplot.svg");
    let frame = random_frame(50);

    render_pairplot(&frame, &["RM", "LSTAT", "PTRATIO", "MEDV"], &path).unwrap();
    assert_svg(&path);

    assert!(matches!(
        render_pairplot(&frame, &["RM", "CRIM"], &path),
        Err(EdaError::MissingColumn(name)) if name == "CRIM"
    ));
}

#[test]
fn test_render_correlation_heatmap() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("correlation_heatmap.svg");
    let matrix = correlation_matrix(&random_frame(40));

    render_correlation_heatmap(&matrix, &path).unwrap();
    assert_svg(&path);
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("1.00"));
}

#[test]
fn test_render_actual_vs_predicted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("actual_vs_predicted.svg");
    let evaluation = Evaluation {
        name: "Linear Regression".to_string(),
        actual: array![24., 21.6, 34.7, 33.4],
        predicted: array![25.1, 22.0, 30.2, 31.9],
        mse: 6.0,
        r2: 0.8,
        warnings: Vec::new(),
    };

    render_actual_vs_predicted(&evaluation, "MEDV", &path).unwrap();
    assert_svg(&path);
}
