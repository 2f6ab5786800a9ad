//! SVG rendering of the exploratory and evaluation plots.
//!
//! Every function writes one file and returns [`EdaError::Render`] when the
//! drawing backend fails. Rendering is a side effect only: nothing computed
//! here feeds back into the pipeline.

use std::fmt::Display;
use std::ops::Range;
use std::path::Path;

use log::debug;
use ndarray::ArrayView1;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::analysis::{gaussian_kde, histogram, CorrelationMatrix};
use crate::datasets::DataFrame;
use crate::error::{EdaError, Result};
use crate::metrics::Evaluation;

#[cfg(test)]
mod tests;

/// Number of bins of the target histogram.
pub const HISTOGRAM_BINS: usize = 30;

const KDE_POINTS: usize = 200;

fn render_error<E: Display>(err: E) -> EdaError {
    EdaError::Render(err.to_string())
}

/// Range spanning the finite values, padded by 5% on each side.
fn padded_range<I: IntoIterator<Item = f64>>(values: I) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return 0.0..1.0;
    }
    if lo == hi {
        return (lo - 0.5)..(hi + 0.5);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}

/// Blue-white-red diverging scale over [-1, 1]. NaN is drawn light grey.
fn diverging_color(value: f64) -> RGBColor {
    const COLD: (f64, f64, f64) = (59., 76., 192.);
    const NEUTRAL: (f64, f64, f64) = (221., 221., 221.);
    const WARM: (f64, f64, f64) = (180., 4., 38.);

    if value.is_nan() {
        return RGBColor(240, 240, 240);
    }
    let t = value.clamp(-1., 1.);
    let (from, to, s) = match t < 0. {
        true => (NEUTRAL, COLD, -t),
        false => (NEUTRAL, WARM, t),
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * s).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

/// Left or bottom edge of segment `k`; the far edge of the last segment is
/// `Last`.
fn cell_edge(k: usize, n: usize) -> SegmentValue<usize> {
    match k < n {
        true => SegmentValue::Exact(k),
        false => SegmentValue::Last,
    }
}

fn numeric_cells<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a [f64]> {
    frame
        .column(name)
        .ok_or_else(|| EdaError::MissingColumn(name.to_string()))?
        .as_numeric()
        .ok_or_else(|| EdaError::NonNumeric(name.to_string()))
}

/// Histogram of `values` with a kernel density estimate on top, scaled to
/// the bin counts.
pub fn render_target_distribution(values: ArrayView1<f64>, name: &str, path: &Path) -> Result<()> {
    let hist = histogram(values, HISTOGRAM_BINS)
        .ok_or_else(|| EdaError::Render(format!("`{}` has no finite value to plot", name)))?;
    let scale = hist.counts.sum() as f64 * (hist.edges[1] - hist.edges[0]);
    let curve: Vec<(f64, f64)> = gaussian_kde(values)
        .map(|kde| kde.curve(KDE_POINTS))
        .unwrap_or_default()
        .into_iter()
        .map(|(x, density)| (x, density * scale))
        .collect();

    let x_range = padded_range(
        hist.edges
            .iter()
            .copied()
            .chain(curve.iter().map(|&(x, _)| x)),
    );
    let y_max = hist
        .counts
        .iter()
        .map(|&count| count as f64)
        .chain(curve.iter().map(|&(_, y)| y))
        .fold(0., f64::max);

    let root = SVGBackend::new(path, (900, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Distribution of {} (Target Variable)", name),
            ("sans-serif", 28),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, 0f64..y_max * 1.1)
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .x_desc(name)
        .y_desc("Frequency")
        .draw()
        .map_err(render_error)?;

    chart
        .draw_series(hist.counts.iter().enumerate().map(|(k, &count)| {
            Rectangle::new(
                [(hist.edges[k], 0.), (hist.edges[k + 1], count as f64)],
                BLUE.mix(0.4).filled(),
            )
        }))
        .map_err(render_error)?;
    chart
        .draw_series(LineSeries::new(curve, BLUE.stroke_width(2)))
        .map_err(render_error)?;

    root.present().map_err(render_error)?;
    debug!("Rendered {}", path.display());
    Ok(())
}

/// Grid of pairwise scatter plots with density curves on the diagonal.
///
/// Cell `(i, j)` plots `columns[j]` on the x axis against `columns[i]`. Each
/// scatter only uses the rows where both cells are present.
pub fn render_pairplot<S: AsRef<str>>(frame: &DataFrame, columns: &[S], path: &Path) -> Result<()> {
    let names: Vec<&str> = columns.iter().map(AsRef::as_ref).collect();
    let cells = names
        .iter()
        .map(|name| numeric_cells(frame, name))
        .collect::<Result<Vec<_>>>()?;
    let k = names.len();
    if k == 0 {
        return Err(EdaError::Render("no column to plot".to_string()));
    }

    let root = SVGBackend::new(path, (280 * k as u32, 280 * k as u32)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    for (idx, area) in root.split_evenly((k, k)).iter().enumerate() {
        let (i, j) = (idx / k, idx % k);
        let x_desc = match i == k - 1 {
            true => names[j],
            false => "",
        };
        let y_desc = match j == 0 {
            true => names[i],
            false => "",
        };

        if i == j {
            draw_density_cell(area, cells[i], x_desc, y_desc)?;
        } else {
            draw_scatter_cell(area, cells[j], cells[i], x_desc, y_desc)?;
        }
    }

    root.present().map_err(render_error)?;
    debug!("Rendered {}", path.display());
    Ok(())
}

fn draw_density_cell(
    area: &DrawingArea<SVGBackend, Shift>,
    values: &[f64],
    x_desc: &str,
    y_desc: &str,
) -> Result<()> {
    let curve = gaussian_kde(ArrayView1::from(values))
        .map(|kde| kde.curve(KDE_POINTS))
        .unwrap_or_default();
    let x_range = padded_range(values.iter().copied().chain(curve.iter().map(|&(x, _)| x)));
    let y_max = curve.iter().map(|&(_, y)| y).fold(0., f64::max);
    let y_range = match y_max > 0. {
        true => 0f64..y_max * 1.1,
        false => 0f64..1.,
    };

    let mut chart = ChartBuilder::on(area)
        .margin(8)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(x_range, y_range)
        .map_err(render_error)?;
    chart
        .configure_mesh()
        .x_labels(4)
        .y_labels(4)
        .x_desc(x_desc)
        .y_desc(y_desc)
        .label_style(("sans-serif", 11))
        .draw()
        .map_err(render_error)?;
    chart
        .draw_series(LineSeries::new(curve, BLUE.stroke_width(2)))
        .map_err(render_error)?;
    Ok(())
}

fn draw_scatter_cell(
    area: &DrawingArea<SVGBackend, Shift>,
    x: &[f64],
    y: &[f64],
    x_desc: &str,
    y_desc: &str,
) -> Result<()> {
    let points: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .collect();

    let mut chart = ChartBuilder::on(area)
        .margin(8)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(
            padded_range(points.iter().map(|p| p.0)),
            padded_range(points.iter().map(|p| p.1)),
        )
        .map_err(render_error)?;
    chart
        .configure_mesh()
        .x_labels(4)
        .y_labels(4)
        .x_desc(x_desc)
        .y_desc(y_desc)
        .label_style(("sans-serif", 11))
        .draw()
        .map_err(render_error)?;
    chart
        .draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, 2, BLUE.mix(0.5).filled())),
        )
        .map_err(render_error)?;
    Ok(())
}

/// Correlation matrix drawn as colored cells annotated with two decimals.
pub fn render_correlation_heatmap(matrix: &CorrelationMatrix, path: &Path) -> Result<()> {
    let n = matrix.names.len();
    if n == 0 {
        return Err(EdaError::Render("no numeric column to correlate".to_string()));
    }

    let side = (120 + 60 * n) as u32;
    let root = SVGBackend::new(path, (side + 80, side)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    // Row 0 is drawn at the top
    let label = |v: &SegmentValue<usize>, flip: bool| match v {
        SegmentValue::CenterOf(k) if *k < n => {
            let idx = if flip { n - 1 - k } else { *k };
            matrix.names[idx].clone()
        }
        _ => String::new(),
    };

    let mut chart = ChartBuilder::on(&root)
        .caption("Correlation Matrix", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d((0..n).into_segmented(), (0..n).into_segmented())
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&|v| label(v, false))
        .y_label_formatter(&|v| label(v, true))
        .draw()
        .map_err(render_error)?;

    let cells = matrix.values.indexed_iter().map(|((i, j), &r)| {
        let row = n - 1 - i;
        Rectangle::new(
            [
                (cell_edge(j, n), cell_edge(row, n)),
                (cell_edge(j + 1, n), cell_edge(row + 1, n)),
            ],
            diverging_color(r).filled(),
        )
    });
    chart.draw_series(cells).map_err(render_error)?;

    let centered = ("sans-serif", 14)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let annotations = matrix.values.indexed_iter().map(|((i, j), &r)| {
        Text::new(
            format!("{:.2}", r),
            (SegmentValue::CenterOf(j), SegmentValue::CenterOf(n - 1 - i)),
            centered.clone(),
        )
    });
    chart.draw_series(annotations).map_err(render_error)?;

    root.present().map_err(render_error)?;
    debug!("Rendered {}", path.display());
    Ok(())
}

/// Scatter of actual against predicted targets with the identity line drawn
/// over the range of the actual values.
pub fn render_actual_vs_predicted(
    evaluation: &Evaluation<f64>,
    target: &str,
    path: &Path,
) -> Result<()> {
    let points: Vec<(f64, f64)> = evaluation
        .actual
        .iter()
        .copied()
        .zip(evaluation.predicted.iter().copied())
        .collect();
    let lo = evaluation.actual.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = evaluation
        .actual
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    if points.is_empty() || !lo.is_finite() || !hi.is_finite() {
        return Err(EdaError::Render("no prediction to plot".to_string()));
    }

    let root = SVGBackend::new(path, (800, 800)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Actual vs Predicted {} ({})", target, evaluation.name),
            ("sans-serif", 26),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            padded_range(points.iter().map(|p| p.0)),
            padded_range(points.iter().flat_map(|p| [p.0, p.1])),
        )
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .x_desc(format!("Actual {}", target))
        .y_desc(format!("Predicted {}", target))
        .draw()
        .map_err(render_error)?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, 3, BLUE.mix(0.6).filled())),
        )
        .map_err(render_error)?
        .label("Predictions")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, BLUE.filled()));

    chart
        .draw_series(LineSeries::new(vec![(lo, lo), (hi, hi)], RED.stroke_width(2)))
        .map_err(render_error)?
        .label("Perfect Prediction")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(render_error)?;

    root.present().map_err(render_error)?;
    debug!("Rendered {}", path.display());
    Ok(())
}
