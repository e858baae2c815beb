use crate::OutputFormat;
use anyhow::Result;
use colored::*;
use schema_core::{ColumnSchema, ValidationReport};
use serde_json::json;

pub fn print_validation_report(report: &ValidationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json_report(report),
        OutputFormat::Text => {
            print_text_report(report);
            Ok(())
        }
    }
}

fn print_text_report(report: &ValidationReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if report.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    if !report.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for (i, error) in report.errors.iter().enumerate() {
            println!("  {}. {}", i + 1, error.red());
        }
    }

    let stats = &report.stats;
    println!("\n{}", "Summary:".bold());
    println!("  Total errors:          {}", report.error_count());
    println!("  Rows validated:        {}", stats.rows_validated);
    println!("  Columns checked:       {}", stats.columns_checked);
    println!("  Constraints evaluated: {}", stats.constraints_evaluated);
    println!("  Duration:              {} ms", stats.duration_ms);
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport) -> Result<()> {
    let output = json!({
        "passed": report.passed,
        "errors": report.errors,
        "summary": {
            "error_count": report.error_count(),
            "rows_validated": report.stats.rows_validated,
            "columns_checked": report.stats.columns_checked,
            "constraints_evaluated": report.stats.constraints_evaluated,
            "duration_ms": report.stats.duration_ms,
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Prints one line per column: name, storage type, nullability and constraints.
pub fn print_schema_summary(schemas: &[ColumnSchema], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let columns: Vec<_> = schemas
                .iter()
                .map(|schema| {
                    json!({
                        "column": schema.column,
                        "dtype": schema.dtype.name(),
                        "nullable": schema.nullable,
                        "constraints": schema
                            .valid_vals
                            .iter()
                            .map(|c| c.to_string())
                            .collect::<Vec<_>>(),
                    })
                })
                .collect();
            let output = json!({ "valid": true, "columns": columns });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("\nSchema Summary:");
            println!("  Columns: {}", schemas.len());
            for schema in schemas {
                let nullability = if schema.nullable {
                    "nullable"
                } else {
                    "not null"
                };
                let constraints = if schema.valid_vals.is_empty() {
                    "any value".dimmed().to_string()
                } else {
                    schema
                        .valid_vals
                        .iter()
                        .map(|c| c.to_string())
                        .collect::<Vec<_>>()
                        .join(" or ")
                };
                println!(
                    "  - {} ({}, {}): {}",
                    schema.column.bold(),
                    schema.dtype,
                    nullability,
                    constraints
                );
            }
        }
    }
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
