use anyhow::{Context, Result};
use schema_parser::{EncodingStyle, to_json, to_yaml};
use schema_validator::{infer_schema, read_csv};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(
    data_path: &Path,
    output_path: Option<&Path>,
    index_column: Option<String>,
    delimiter: char,
) -> Result<()> {
    info!("Inferring schema from {}", data_path.display());

    let options = super::csv_options(index_column, delimiter)?;
    let table = read_csv(data_path, &options)
        .with_context(|| format!("Failed to load data file: {}", data_path.display()))?;

    let schemas = infer_schema(&table);
    info!("Inferred {} column schemas", schemas.len());

    let as_json = output_path
        .and_then(Path::extension)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let rendered = if as_json {
        to_json(&schemas, EncodingStyle::Tagged)?
    } else {
        to_yaml(&schemas, EncodingStyle::Tagged)?
    };

    match output_path {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write schema to {}", path.display()))?;
            output::print_success(&format!("Schema written to {}", path.display()));
            output::print_info("Add value constraints under each column's valid_vals");
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
