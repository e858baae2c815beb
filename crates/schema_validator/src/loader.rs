//! CSV loading with per-column storage type inference.
//!
//! Every cell is read as text and each column then gets the narrowest type
//! that holds all of its values: `int64` when every cell is an integer,
//! `float64` when every present cell is a number (missing cells become NaN,
//! an entirely empty column is `float64` as well), `bool` for `true`/`false`
//! columns and `object` otherwise.

use crate::{Column, DataFrame, TableError};
use schema_core::{DType, Scalar};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Cell texts read as missing values.
const MISSING_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "<NA>", "NaN", "nan", "null", "NULL", "None",
];

/// CSV reader configuration.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter.
    pub delimiter: u8,
    /// Column moved into the row index after loading.
    pub index_column: Option<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            index_column: None,
        }
    }
}

impl CsvOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_index_column(mut self, column: impl Into<String>) -> Self {
        self.index_column = Some(column.into());
        self
    }
}

/// Loads a CSV file with a header row into a [`DataFrame`].
///
/// # Example
///
/// ```no_run
/// use schema_validator::{read_csv, CsvOptions};
/// use std::path::Path;
///
/// let frame = read_csv(Path::new("data/orders.csv"), &CsvOptions::default()).unwrap();
/// ```
pub fn read_csv(path: &Path, options: &CsvOptions) -> Result<DataFrame, TableError> {
    let frame = read_csv_from_reader(File::open(path)?, options)?;
    debug!(path = %path.display(), "Loaded CSV file");
    Ok(frame)
}

/// Loads CSV data with a header row from any reader.
///
/// # Errors
///
/// Returns `TableError::Csv` for malformed or ragged rows,
/// `TableError::DuplicateColumn` for repeated headers and
/// `TableError::UnknownColumn` if the index column does not exist.
pub fn read_csv_from_reader<R: Read>(
    reader: R,
    options: &CsvOptions,
) -> Result<DataFrame, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (column, cell) in cells.iter_mut().zip(record.iter()) {
            column.push(cell.to_string());
        }
    }

    let frame = DataFrame::from_columns(
        headers
            .into_iter()
            .zip(cells)
            .map(|(name, texts)| infer_column(name, &texts)),
    )?;
    debug!(
        columns = frame.columns().count(),
        rows = frame.index().len(),
        "Parsed CSV data"
    );

    match &options.index_column {
        Some(name) => frame.set_index_column(name),
        None => Ok(frame),
    }
}

fn is_missing(text: &str) -> bool {
    MISSING_MARKERS.contains(&text.trim())
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim() {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

fn infer_column(name: String, texts: &[String]) -> Column {
    let present: Vec<&str> = texts
        .iter()
        .map(String::as_str)
        .filter(|t| !is_missing(t))
        .collect();
    let complete = present.len() == texts.len();

    if complete && !texts.is_empty() {
        if let Some(ints) = parse_all(texts, |t| t.trim().parse::<i64>().ok().map(Scalar::Int)) {
            return Column::new(name, DType::Int64, ints);
        }
        if let Some(flags) = parse_all(texts, |t| parse_bool(t).map(Scalar::Bool)) {
            return Column::new(name, DType::from("bool"), flags);
        }
    }

    if present.iter().all(|t| t.trim().parse::<f64>().is_ok()) {
        let floats = texts
            .iter()
            .map(|t| {
                let value = if is_missing(t) {
                    f64::NAN
                } else {
                    t.trim().parse::<f64>().unwrap_or(f64::NAN)
                };
                Scalar::Float(value)
            })
            .collect();
        return Column::new(name, DType::Float64, floats);
    }

    let objects = texts
        .iter()
        .map(|t| {
            if is_missing(t) {
                Scalar::Null
            } else {
                Scalar::Str(t.clone())
            }
        })
        .collect();
    Column::new(name, DType::Object, objects)
}

fn parse_all(texts: &[String], parse: impl Fn(&str) -> Option<Scalar>) -> Option<Vec<Scalar>> {
    texts.iter().map(|t| parse(t.as_str())).collect()
}
