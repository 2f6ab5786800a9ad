use std::io::{self, Write};
use std::path::PathBuf;

use comfy_table::presets::NOTHING;
use comfy_table::{Cell, CellAlignment, Table};
use ndarray::Array1;

use super::Exploration;
use crate::analysis::Description;
use crate::datasets::DataFrame;
use crate::metrics::Evaluation;

/// Everything a run prints, in printing order
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub shape: (usize, usize),
    pub head: DataFrame,
    pub exploration: Exploration,
    pub target: String,
    pub train_shape: (usize, usize),
    pub test_shape: (usize, usize),
    pub feature_names: Vec<String>,
    /// Least squares intercept
    pub intercept: f64,
    /// Least squares coefficients, one per entry of `feature_names`
    pub coefficients: Array1<f64>,
    /// Least squares, ridge and lasso scores, in that order
    pub evaluations: Vec<Evaluation<f64>>,
    /// Plots written during the run
    pub plots: Vec<PathBuf>,
}

fn format_stat(value: f64) -> String {
    match value.is_nan() {
        true => "NaN".to_string(),
        false => format!("{:.6}", value),
    }
}

fn right_aligned(table: &mut Table) {
    table.column_iter_mut().skip(1).for_each(|c| {
        c.set_cell_alignment(CellAlignment::Right);
    });
}

fn head_table(head: &DataFrame) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);

    let mut header = vec![Cell::new("")];
    header.extend(head.column_names().into_iter().map(Cell::new));
    table.set_header(header);

    for row in 0..head.n_rows() {
        let mut cells = vec![row.to_string()];
        cells.extend(head.columns().iter().map(|column| column.format_cell(row)));
        table.add_row(cells);
    }
    right_aligned(&mut table);
    table
}

fn listing<V: ToString>(entries: impl Iterator<Item = (String, V)>) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    for (name, value) in entries {
        table.add_row(vec![name, value.to_string()]);
    }
    right_aligned(&mut table);
    table
}

fn description_table(description: &Description) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);

    let mut header = vec![Cell::new("")];
    header.extend(description.columns.iter().map(|c| Cell::new(&c.name)));
    table.set_header(header);

    for (k, label) in Description::STATISTICS.iter().enumerate() {
        let mut cells = vec![label.to_string()];
        cells.extend(
            description
                .columns
                .iter()
                .map(|summary| format_stat(summary.values()[k])),
        );
        table.add_row(cells);
    }
    right_aligned(&mut table);
    table
}

fn comparison_table(evaluations: &[Evaluation<f64>]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Model", "MSE", "R2"]);
    for evaluation in evaluations {
        table.add_row(vec![
            evaluation.name.clone(),
            format!("{:.2}", evaluation.mse),
            format!("{:.2}", evaluation.r2),
        ]);
    }
    right_aligned(&mut table);
    table
}

impl Report {
    /// Prints the report to `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Dataset Shape: {:?}", self.shape)?;
        writeln!(out, "\n{}", head_table(&self.head))?;

        let exploration = &self.exploration;
        writeln!(out, "\nMissing Values:")?;
        writeln!(
            out,
            "{}",
            listing(exploration.null_counts.iter().cloned())
        )?;
        writeln!(out, "\nData Types:")?;
        writeln!(out, "{}", listing(exploration.dtypes.iter().cloned()))?;
        writeln!(out, "\nStatistical Summary:")?;
        writeln!(out, "{}", description_table(&exploration.description))?;

        writeln!(out, "\nCorrelation with {}:", self.target)?;
        writeln!(
            out,
            "{}",
            listing(
                exploration
                    .target_correlations
                    .iter()
                    .map(|(name, r)| (name.clone(), format_stat(*r)))
            )
        )?;

        writeln!(out, "\nTraining Data Shape: {:?}", self.train_shape)?;
        writeln!(out, "Testing Data Shape: {:?}", self.test_shape)?;

        writeln!(out, "\nIntercept: {}", self.intercept)?;
        let coefficients: Vec<String> = self.coefficients.iter().map(|c| c.to_string()).collect();
        writeln!(out, "Coefficients: [{}]", coefficients.join(", "))?;
        writeln!(out, "\nFeature-Coefficient Mapping:")?;
        for (feature, coefficient) in self.feature_names.iter().zip(self.coefficients.iter()) {
            writeln!(out, "{}: {}", feature, coefficient)?;
        }

        if let Some(linear) = self.evaluations.first() {
            writeln!(out, "\nModel Performance Metrics:")?;
            writeln!(out, "Mean Squared Error (MSE): {:.2}", linear.mse)?;
            writeln!(out, "R-squared (R2): {:.2}", linear.r2)?;
        }
        for evaluation in self.evaluations.iter() {
            for warning in evaluation.warnings.iter() {
                writeln!(out, "Warning ({}): {}", evaluation.name, warning)?;
            }
        }

        writeln!(out, "\nComparison of Models:")?;
        writeln!(out, "{}", comparison_table(&self.evaluations))?;

        if !self.plots.is_empty() {
            writeln!(out, "\nPlots:")?;
            for plot in self.plots.iter() {
                writeln!(out, "{}", plot.display())?;
            }
        }
        Ok(())
    }
}
