//! Parser for column schema documents (YAML/TOML/JSON formats).
//!
//! This module parses schema files into a list of strongly-typed
//! [`ColumnSchema`] values and renders schemas back to text. The conversion
//! between schemas and their plain description lives in [`codec`].
//!
//! # Example
//!
//! ```rust
//! use schema_parser::parse_yaml;
//!
//! let yaml = r#"
//! - column: age
//!   dtype: int64
//!   nullable: false
//!   valid_vals:
//!     - minval: 0
//!       maxval: 120
//! - column: country
//!   dtype: object
//!   valid_vals:
//!     - allowed: [IT, FR, DE]
//! "#;
//!
//! let schemas = parse_yaml(yaml).expect("Failed to parse schema");
//! assert_eq!(schemas.len(), 2);
//! assert_eq!(schemas[0].column, "age");
//! ```

pub mod codec;

pub use codec::{
    decode_column, decode_constraint, decode_schema, encode_column, encode_constraint,
    encode_schema, EncodingStyle,
};

use schema_core::{ColumnSchema, Scalar, ValueConstraint};
use serde_yaml_ng::Value;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during schema parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or serialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// JSON parsing or serialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// The document parsed but does not describe a valid schema
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported schema file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// Parse a schema from a YAML string.
///
/// The document is either a list of column descriptions or a mapping with a
/// `columns` list.
///
/// # Example
///
/// ```rust
/// use schema_parser::parse_yaml;
///
/// let yaml = r#"
/// columns:
///   - column: price
///     dtype: float64
/// "#;
///
/// let schemas = parse_yaml(yaml).unwrap();
/// assert!(schemas[0].nullable);
/// ```
pub fn parse_yaml(content: &str) -> Result<Vec<ColumnSchema>> {
    let document: Value = serde_yaml_ng::from_str(content)?;
    decode_schema(&document)
}

/// Parse a schema from a TOML string.
///
/// TOML documents have no top-level list, so columns are given as an array of
/// tables named `columns`.
///
/// # Example
///
/// ```rust
/// use schema_parser::parse_toml;
///
/// let toml = r#"
/// [[columns]]
/// column = "price"
/// dtype = "float64"
/// valid_vals = [{ minval = 0.0 }]
/// "#;
///
/// let schemas = parse_toml(toml).unwrap();
/// assert_eq!(schemas[0].valid_vals.len(), 1);
/// ```
pub fn parse_toml(content: &str) -> Result<Vec<ColumnSchema>> {
    let document: Value =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    decode_schema(&document)
}

/// Parse a schema from a JSON string.
pub fn parse_json(content: &str) -> Result<Vec<ColumnSchema>> {
    let document: Value = serde_json::from_str(content)?;
    decode_schema(&document)
}

/// Detect the schema format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `SchemaFormat::Yaml`
/// * `.toml` → `SchemaFormat::Toml`
/// * `.json` → `SchemaFormat::Json`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<SchemaFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(SchemaFormat::Yaml),
        "toml" => Ok(SchemaFormat::Toml),
        "json" => Ok(SchemaFormat::Json),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a schema from a file with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use schema_parser::parse_file;
/// use std::path::Path;
///
/// let schemas = parse_file(Path::new("schemas/orders.yml")).unwrap();
/// println!("Loaded {} columns", schemas.len());
/// ```
pub fn parse_file(path: &Path) -> Result<Vec<ColumnSchema>> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    let schemas = match format {
        SchemaFormat::Yaml => parse_yaml(&content),
        SchemaFormat::Toml => parse_toml(&content),
        SchemaFormat::Json => parse_json(&content),
    }?;

    debug!(path = %path.display(), columns = schemas.len(), "Parsed schema file");
    Ok(schemas)
}

/// Render schemas as a YAML list of column descriptions.
pub fn to_yaml(schemas: &[ColumnSchema], style: EncodingStyle) -> Result<String> {
    Ok(serde_yaml_ng::to_string(&encode_schema(schemas, style)?)?)
}

/// Render schemas as a pretty-printed JSON list of column descriptions.
///
/// # Errors
///
/// JSON has no infinity or NaN, so a schema holding a non-finite bound or
/// allowed value is rejected with `ParserError::Configuration`. Such schemas
/// render to YAML.
pub fn to_json(schemas: &[ColumnSchema], style: EncodingStyle) -> Result<String> {
    if let Some((column, value)) = first_non_finite(schemas) {
        return Err(ParserError::Configuration(format!(
            "Column '{column}': {value} cannot be written as JSON, use YAML instead"
        )));
    }
    Ok(serde_json::to_string_pretty(&encode_schema(schemas, style)?)?)
}

fn first_non_finite(schemas: &[ColumnSchema]) -> Option<(&str, f64)> {
    schemas.iter().find_map(|schema| {
        schema
            .valid_vals
            .iter()
            .flat_map(constraint_floats)
            .find(|v| !v.is_finite())
            .map(|v| (schema.column.as_str(), v))
    })
}

fn constraint_floats(constraint: &ValueConstraint) -> Vec<f64> {
    match constraint {
        ValueConstraint::Range(range) => range.minval().into_iter().chain(range.maxval()).collect(),
        ValueConstraint::Enumeration(enumeration) => enumeration
            .allowed()
            .iter()
            .filter_map(|v| match v {
                Scalar::Float(f) => Some(*f),
                _ => None,
            })
            .collect(),
    }
}
