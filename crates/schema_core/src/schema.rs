//! Column schema types.
//!
//! This module contains [`DType`], the storage type vocabulary shared by
//! schemas and tables, and [`ColumnSchema`], the declared requirements for one
//! column.

use crate::ValueConstraint;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Storage type of a column.
///
/// Integer and float widths are known to the engine. `object` is the generic
/// container type (typically strings or mixed values); every other name is kept
/// as an opaque type that only matches itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DType {
    Int8,
    Int16,
    Int32,
    Int64,
    Float8,
    Float16,
    Float32,
    Float64,
    /// Generic container type
    Object,
    /// Any other opaque type name (e.g. "bool", "datetime64")
    Other(String),
}

impl DType {
    /// Returns the canonical lowercase name of this type.
    pub fn name(&self) -> &str {
        match self {
            DType::Int8 => "int8",
            DType::Int16 => "int16",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::Float8 => "float8",
            DType::Float16 => "float16",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
            DType::Object => "object",
            DType::Other(name) => name,
        }
    }

    /// Returns true for the integer types.
    pub fn is_integer(&self) -> bool {
        matches!(self, DType::Int8 | DType::Int16 | DType::Int32 | DType::Int64)
    }

    /// Returns true for the float types.
    pub fn is_float(&self) -> bool {
        matches!(
            self,
            DType::Float8 | DType::Float16 | DType::Float32 | DType::Float64
        )
    }

    /// Returns true for the generic container type.
    pub fn is_object(&self) -> bool {
        matches!(self, DType::Object)
    }
}

impl FromStr for DType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Ok(match normalized.as_str() {
            "int8" => DType::Int8,
            "int16" => DType::Int16,
            "int32" => DType::Int32,
            "int64" => DType::Int64,
            "float8" => DType::Float8,
            "float16" => DType::Float16,
            "float32" => DType::Float32,
            "float64" => DType::Float64,
            "object" => DType::Object,
            _ => DType::Other(normalized),
        })
    }
}

impl From<&str> for DType {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(dtype) => dtype,
            Err(never) => match never {},
        }
    }
}

impl From<String> for DType {
    fn from(s: String) -> Self {
        DType::from(s.as_str())
    }
}

impl From<DType> for String {
    fn from(dtype: DType) -> Self {
        dtype.name().to_string()
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The declared requirements for a single column.
///
/// Constraints in `valid_vals` are combined with logical OR: a value is legal
/// when at least one constraint accepts it. An empty list places no restriction
/// on values, leaving only the type and null checks.
///
/// # Example
///
/// ```rust
/// use schema_core::{ColumnSchema, DType};
///
/// let schema = ColumnSchema::new("price", "float64");
/// assert_eq!(schema.dtype, DType::Float64);
/// assert!(schema.nullable);
/// assert!(schema.valid_vals.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSchema {
    /// Column name
    pub column: String,

    /// Declared storage type
    pub dtype: DType,

    /// Whether the column may contain null values
    #[serde(default = "default_nullable")]
    pub nullable: bool,

    /// Accepted values, combined with logical OR
    #[serde(default, alias = "constraints")]
    pub valid_vals: Vec<ValueConstraint>,
}

fn default_nullable() -> bool {
    true
}

impl ColumnSchema {
    /// Creates a nullable column schema without value constraints.
    pub fn new(column: impl Into<String>, dtype: impl Into<DType>) -> Self {
        Self {
            column: column.into(),
            dtype: dtype.into(),
            nullable: true,
            valid_vals: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Enumeration, Range};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dtype_parsing() {
        assert_eq!(DType::from("int64"), DType::Int64);
        assert_eq!(DType::from("  Float32 "), DType::Float32);
        assert_eq!(DType::from("object"), DType::Object);
        assert_eq!(DType::from("bool"), DType::Other("bool".to_string()));
    }

    #[test]
    fn test_dtype_families() {
        assert!(DType::Int16.is_integer());
        assert!(!DType::Int16.is_float());
        assert!(DType::Float8.is_float());
        assert!(DType::Object.is_object());
        assert!(!DType::Other("string".into()).is_object());
    }

    #[test]
    fn test_dtype_display_round_trip() {
        for name in ["int8", "int32", "float16", "float64", "object", "datetime64"] {
            assert_eq!(DType::from(name).to_string(), name);
        }
    }

    #[test]
    fn test_column_schema_defaults_from_description() {
        let schema: ColumnSchema =
            serde_json::from_str(r#"{"column": "a", "dtype": "int64"}"#).unwrap();
        assert_eq!(schema, ColumnSchema::new("a", "int64"));
    }

    #[test]
    fn test_column_schema_rejects_unknown_keys() {
        let result: Result<ColumnSchema, _> =
            serde_json::from_str(r#"{"column": "a", "dtype": "int64", "valid_values": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_column_schema_serialization_shape() {
        let schema = ColumnSchema {
            column: "a".to_string(),
            dtype: DType::Int64,
            nullable: false,
            valid_vals: vec![
                Range::between(0.0, 4.0).unwrap().into(),
                Enumeration::new([10, 11]).into(),
            ],
        };

        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "column": "a",
                "dtype": "int64",
                "nullable": false,
                "valid_vals": [
                    {"kind": "range", "minval": 0.0, "maxval": 4.0,
                     "include_lower": true, "include_upper": true},
                    {"kind": "enum", "allowed": [10, 11]}
                ]
            })
        );
    }
}
