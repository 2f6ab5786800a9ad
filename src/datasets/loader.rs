use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::{debug, info};

use super::frame::{Column, DType, DataFrame};
use crate::error::{EdaError, Result};

/// Cell contents treated as missing values.
const MISSING_TOKENS: [&str; 7] = ["", "NA", "N/A", "NaN", "nan", "null", "NULL"];

fn is_missing(cell: &str) -> bool {
    MISSING_TOKENS.contains(&cell)
}

/// Reads a comma-delimited file with a header row into a [`DataFrame`].
///
/// Column types are inferred from the cells; no other transformation is
/// applied.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(EdaError::InputNotFound(path.to_path_buf()));
    }
    info!("Loading dataset from {}", path.display());
    let frame = read_csv_from(File::open(path)?)?;
    let (n_rows, n_cols) = frame.shape();
    info!("Loaded {} rows and {} columns", n_rows, n_cols);
    Ok(frame)
}

/// Same as [`read_csv`] for any reader.
pub fn read_csv_from<R: Read>(reader: R) -> Result<DataFrame> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(EdaError::Parse("input is empty".to_string()));
    }
    if headers.iter().all(|name| name.parse::<f64>().is_ok()) {
        return Err(EdaError::Parse(
            "header row is missing: every header cell is numeric".to_string(),
        ));
    }

    let names: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(j, name)| match name.is_empty() {
            true => format!("Unnamed: {}", j),
            false => name.to_string(),
        })
        .collect();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); names.len()];
    for record in reader.records() {
        let record = record?;
        for (j, cell) in record.iter().enumerate() {
            cells[j].push(cell.to_string());
        }
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, column_cells)| infer_column(name, column_cells))
        .collect();
    DataFrame::new(columns)
}

/// Infers the narrowest type that every non-missing cell parses as.
fn infer_column(name: String, cells: Vec<String>) -> Column {
    let present = || cells.iter().filter(|cell| !is_missing(cell));

    let dtype = if present().all(|cell| cell.parse::<i64>().is_ok()) {
        DType::Int64
    } else if present().all(|cell| cell.parse::<f64>().is_ok()) {
        DType::Float64
    } else {
        DType::Object
    };

    // Integers have no missing marker, so a gap promotes the column to floats.
    // A column of missing cells only carries no type information and is read
    // as floats too.
    let has_missing = cells.iter().any(|cell| is_missing(cell));
    let dtype = match (present().next(), dtype) {
        (None, _) => DType::Float64,
        (Some(_), DType::Int64) if has_missing => DType::Float64,
        (Some(_), dtype) => dtype,
    };
    debug!("Column `{}` inferred as {}", name, dtype);

    match dtype {
        DType::Object => Column::text(
            name,
            cells
                .into_iter()
                .map(|cell| match is_missing(&cell) {
                    true => None,
                    false => Some(cell),
                })
                .collect(),
        ),
        _ => Column::numeric(
            name,
            dtype,
            cells
                .iter()
                .map(|cell| match is_missing(cell) {
                    true => f64::NAN,
                    false => cell.parse::<f64>().unwrap_or(f64::NAN),
                })
                .collect(),
        ),
    }
}
