use anyhow::{Context, Result};
use schema_parser::parse_file;
use schema_validator::{Validator, read_csv};
use std::path::Path;
use tracing::info;

use crate::{OutputFormat, output};

pub fn execute(
    schema_path: &Path,
    data_path: &Path,
    index_column: Option<String>,
    delimiter: char,
    format: OutputFormat,
) -> Result<()> {
    info!("Validating {} against {}", data_path.display(), schema_path.display());

    let schemas = parse_file(schema_path)
        .with_context(|| format!("Failed to parse schema file: {}", schema_path.display()))?;

    let options = super::csv_options(index_column, delimiter)?;
    let table = read_csv(data_path, &options)
        .with_context(|| format!("Failed to load data file: {}", data_path.display()))?;

    if format == OutputFormat::Text {
        output::print_info(&format!(
            "Loaded {} column schemas and {} rows",
            schemas.len(),
            table.index().len()
        ));
    }

    let report = Validator::new().report(&table, &schemas);
    output::print_validation_report(&report, format)?;

    if !report.passed {
        if format == OutputFormat::Text {
            output::print_error(&format!("{} validation errors", report.error_count()));
        }
        std::process::exit(1);
    }

    Ok(())
}
