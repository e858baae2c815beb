use anyhow::{Context, Result};
use schema_parser::parse_file;
use std::path::Path;
use tracing::info;

use crate::{OutputFormat, output};

pub fn execute(schema_path: &Path, format: OutputFormat) -> Result<()> {
    info!("Checking schema: {}", schema_path.display());

    let schemas = parse_file(schema_path)
        .with_context(|| format!("Failed to parse schema file: {}", schema_path.display()))?;

    if format == OutputFormat::Text {
        output::print_success("Schema is valid");
    }
    output::print_schema_summary(&schemas, format)
}
