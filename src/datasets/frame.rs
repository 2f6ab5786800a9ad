use std::collections::HashSet;
use std::fmt;

use ndarray::{Array1, Array2};

use crate::error::{EdaError, Result};

/// Column type inferred when loading a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    Int64,
    Float64,
    Object,
}

impl DType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, DType::Int64 | DType::Float64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::Int64 => write!(f, "int64"),
            DType::Float64 => write!(f, "float64"),
            DType::Object => write!(f, "object"),
        }
    }
}

/// Cell storage of a column. Missing numeric cells are stored as NaN, missing
/// text cells as `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<f64>),
    Text(Vec<Option<String>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: DType,
    values: ColumnValues,
}

impl Column {
    /// Creates a numeric column. NaN marks a missing cell.
    pub fn numeric<S: Into<String>>(name: S, dtype: DType, values: Vec<f64>) -> Column {
        debug_assert!(dtype.is_numeric());
        Column {
            name: name.into(),
            dtype,
            values: ColumnValues::Numeric(values),
        }
    }

    pub fn text<S: Into<String>>(name: S, values: Vec<Option<String>>) -> Column {
        Column {
            name: name.into(),
            dtype: DType::Object,
            values: ColumnValues::Text(values),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    pub fn len(&self) -> usize {
        match &self.values {
            ColumnValues::Numeric(values) => values.len(),
            ColumnValues::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric cells of the column, or `None` for a text column.
    pub fn as_numeric(&self) -> Option<&[f64]> {
        match &self.values {
            ColumnValues::Numeric(values) => Some(values),
            ColumnValues::Text(_) => None,
        }
    }

    pub fn null_count(&self) -> usize {
        match &self.values {
            ColumnValues::Numeric(values) => values.iter().filter(|v| v.is_nan()).count(),
            ColumnValues::Text(values) => values.iter().filter(|v| v.is_none()).count(),
        }
    }

    /// Renders a cell the way the head preview prints it.
    pub fn format_cell(&self, row: usize) -> String {
        match &self.values {
            ColumnValues::Numeric(values) => {
                let value = values[row];
                if value.is_nan() {
                    "NaN".to_string()
                } else if self.dtype == DType::Int64 {
                    format!("{}", value as i64)
                } else {
                    format!("{:.5}", value)
                        .trim_end_matches('0')
                        .trim_end_matches('.')
                        .to_string()
                }
            }
            ColumnValues::Text(values) => values[row].clone().unwrap_or_else(|| "NaN".to_string()),
        }
    }

    fn take(&self, rows: usize) -> Column {
        let values = match &self.values {
            ColumnValues::Numeric(values) => {
                ColumnValues::Numeric(values.iter().take(rows).copied().collect())
            }
            ColumnValues::Text(values) => {
                ColumnValues::Text(values.iter().take(rows).cloned().collect())
            }
        };
        Column {
            name: self.name.clone(),
            dtype: self.dtype,
            values,
        }
    }
}

/// An in-memory table of named, equally long columns
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
    columns: Vec<Column>,
    n_rows: usize,
}

impl DataFrame {
    /// Assembles a table from columns. Column names must be unique and all
    /// columns must have the same length.
    pub fn new(columns: Vec<Column>) -> Result<DataFrame> {
        let n_rows = columns.first().map_or(0, Column::len);

        let mut seen = HashSet::new();
        for column in columns.iter() {
            if !seen.insert(column.name()) {
                return Err(EdaError::Parse(format!(
                    "duplicate column name `{}`",
                    column.name()
                )));
            }
            if column.len() != n_rows {
                return Err(EdaError::Parse(format!(
                    "column `{}` has {} rows, expected {}",
                    column.name(),
                    column.len(),
                    n_rows
                )));
            }
        }
        Ok(DataFrame { columns, n_rows })
    }

    /// `(rows, columns)`, header excluded from the rows.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name() == name)
    }

    /// Iterates over the numeric columns in table order.
    pub fn numeric_columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns
            .iter()
            .filter_map(|column| column.as_numeric().map(|values| (column.name(), values)))
    }

    /// The first `n` rows of the table.
    pub fn head(&self, n: usize) -> DataFrame {
        let rows = usize::min(n, self.n_rows);
        DataFrame {
            columns: self.columns.iter().map(|column| column.take(rows)).collect(),
            n_rows: rows,
        }
    }

    /// Looks a column up and returns its cells as a numeric vector.
    ///
    /// Fails when the column is absent, is not numeric or has missing cells.
    pub fn numeric_column(&self, name: &str) -> Result<Array1<f64>> {
        let column = self
            .column(name)
            .ok_or_else(|| EdaError::MissingColumn(name.to_string()))?;
        let values = column
            .as_numeric()
            .ok_or_else(|| EdaError::NonNumeric(name.to_string()))?;
        let count = column.null_count();
        if count > 0 {
            return Err(EdaError::MissingValues {
                column: name.to_string(),
                count,
            });
        }
        Ok(Array1::from_vec(values.to_vec()))
    }

    /// Projects the table onto the given numeric columns, in the given order.
    pub fn to_matrix<S: AsRef<str>>(&self, names: &[S]) -> Result<Array2<f64>> {
        let mut matrix = Array2::<f64>::zeros((self.n_rows, names.len()));
        for (j, name) in names.iter().enumerate() {
            let column = self.numeric_column(name.as_ref())?;
            matrix.column_mut(j).assign(&column);
        }
        Ok(matrix)
    }
}
