//! Conversion between column schemas and their plain description.
//!
//! A plain description is the nested map/list/scalar form found in schema
//! files, held here as a [`serde_yaml_ng::Value`] regardless of the file format
//! it came from. YAML values keep non-finite floats (`.inf`, `.nan`), so
//! `decode(encode(c)) == c` holds for every constraint.

use crate::{ParserError, Result};
use schema_core::{ColumnSchema, ValueConstraint};
use serde_yaml_ng::{Mapping, Value};

/// Shape of encoded constraints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EncodingStyle {
    /// Constraints carry an explicit `kind` discriminator
    #[default]
    Tagged,
    /// Constraints are told apart by the keys they define
    Legacy,
}

/// Decodes a single constraint description.
///
/// # Errors
///
/// Returns `ParserError::Configuration` when the description is ambiguous,
/// names unknown keys or describes an invalid range.
pub fn decode_constraint(description: &Value) -> Result<ValueConstraint> {
    constraint_from_value(description).map_err(|e| ParserError::Configuration(e.to_string()))
}

fn constraint_from_value(description: &Value) -> serde_yaml_ng::Result<ValueConstraint> {
    serde_yaml_ng::from_value(description.clone())
}

/// Compact one-line rendering for error messages.
pub(crate) fn render(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"))
}

/// Decodes a column description.
///
/// Nested constraint descriptions are decoded first so that a bad entry is
/// reported with its column and position. A missing or `null` constraint list
/// means no value restriction.
pub fn decode_column(description: &Value) -> Result<ColumnSchema> {
    let object = description.as_mapping().ok_or_else(|| {
        ParserError::Configuration(format!(
            "Column description must be a mapping, got {}",
            render(description)
        ))
    })?;
    let name = object
        .get("column")
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>")
        .to_string();

    let mut rest = object.clone();
    let constraints = match (rest.remove("valid_vals"), rest.remove("constraints")) {
        (Some(_), Some(_)) => {
            return Err(ParserError::Configuration(format!(
                "Column '{name}' defines both valid_vals and constraints"
            )));
        }
        (Some(list), None) | (None, Some(list)) => list,
        (None, None) => Value::Null,
    };

    let valid_vals = match constraints {
        Value::Null => Vec::new(),
        Value::Sequence(entries) => entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                constraint_from_value(entry).map_err(|e| {
                    ParserError::Configuration(format!(
                        "Column '{name}', constraint #{}: {e}",
                        i + 1
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?,
        other => {
            return Err(ParserError::Configuration(format!(
                "Column '{name}': valid_vals must be a list, got {}",
                render(&other)
            )));
        }
    };

    let mut schema: ColumnSchema = serde_yaml_ng::from_value(Value::Mapping(rest))
        .map_err(|e| ParserError::Configuration(format!("Column '{name}': {e}")))?;
    schema.valid_vals = valid_vals;
    Ok(schema)
}

/// Decodes a schema document.
///
/// A document is either a list of column descriptions or a mapping whose
/// `columns` key holds that list.
pub fn decode_schema(document: &Value) -> Result<Vec<ColumnSchema>> {
    let entries = match document {
        Value::Sequence(entries) => entries,
        Value::Mapping(map) => match map.get("columns") {
            Some(Value::Sequence(entries)) if map.len() == 1 => entries,
            Some(Value::Sequence(_)) => {
                let extra: Vec<String> = map
                    .keys()
                    .filter(|k| k.as_str() != Some("columns"))
                    .map(|k| k.as_str().map_or_else(|| render(k), str::to_string))
                    .collect();
                return Err(ParserError::Configuration(format!(
                    "Unknown top-level keys in schema document: {}",
                    extra.join(", ")
                )));
            }
            Some(other) => {
                return Err(ParserError::Configuration(format!(
                    "'columns' must be a list, got {}",
                    render(other)
                )));
            }
            None => {
                return Err(ParserError::Configuration(
                    "Schema document must be a list of columns or contain a 'columns' list"
                        .to_string(),
                ));
            }
        },
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(ParserError::Configuration(format!(
                "Schema document must be a list of columns, got {}",
                render(other)
            )));
        }
    };

    entries.iter().map(decode_column).collect()
}

/// Encodes a constraint into its plain description.
pub fn encode_constraint(constraint: &ValueConstraint, style: EncodingStyle) -> Result<Value> {
    let mut value = serde_yaml_ng::to_value(constraint)?;
    if style == EncodingStyle::Legacy {
        if let Value::Mapping(map) = &mut value {
            map.remove("kind");
        }
    }
    Ok(value)
}

/// Encodes a column schema into its plain description.
pub fn encode_column(schema: &ColumnSchema, style: EncodingStyle) -> Result<Value> {
    let valid_vals = schema
        .valid_vals
        .iter()
        .map(|c| encode_constraint(c, style))
        .collect::<Result<Vec<_>>>()?;

    let mut map = Mapping::new();
    map.insert(
        Value::String("column".to_string()),
        Value::String(schema.column.clone()),
    );
    map.insert(
        Value::String("dtype".to_string()),
        Value::String(schema.dtype.to_string()),
    );
    map.insert(
        Value::String("nullable".to_string()),
        Value::Bool(schema.nullable),
    );
    map.insert(
        Value::String("valid_vals".to_string()),
        Value::Sequence(valid_vals),
    );
    Ok(Value::Mapping(map))
}

/// Encodes a schema collection into a list of column descriptions.
pub fn encode_schema(schemas: &[ColumnSchema], style: EncodingStyle) -> Result<Value> {
    schemas
        .iter()
        .map(|s| encode_column(s, style))
        .collect::<Result<Vec<_>>>()
        .map(Value::Sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema_core::{ColumnSchemaBuilder, DType, Enumeration, Range, Scalar};
    use serde_json::json;

    /// Parses an inline YAML description.
    fn desc(text: &str) -> Value {
        serde_yaml_ng::from_str(text).unwrap()
    }

    fn sample_schema() -> ColumnSchema {
        ColumnSchemaBuilder::new("a", "int64")
            .nullable(false)
            .constraint(Range::between(0.0, 4.0).unwrap())
            .allowed([10, 11, 12])
            .build()
    }

    #[test]
    fn test_decode_legacy_range() {
        let constraint = decode_constraint(&desc("{minval: 0, maxval: 4}")).unwrap();
        assert_eq!(constraint, ValueConstraint::Range(Range::between(0.0, 4.0).unwrap()));
    }

    #[test]
    fn test_decode_legacy_enumeration() {
        let constraint = decode_constraint(&desc("{vals: [x, y]}")).unwrap();
        assert_eq!(constraint, ValueConstraint::Enumeration(Enumeration::new(["x", "y"])));
    }

    #[test]
    fn test_decode_ambiguous_constraint_fails() {
        let err = decode_constraint(&desc("{minval: 0, allowed: [1]}")).unwrap_err();
        assert!(matches!(err, ParserError::Configuration(_)));
        assert!(err.to_string().contains("Unable to parse valid values"));
    }

    #[test]
    fn test_decode_empty_constraint_fails() {
        let err = decode_constraint(&desc("{}")).unwrap_err();
        assert!(matches!(err, ParserError::Configuration(_)));
    }

    #[test]
    fn test_decode_non_finite_values() {
        let constraint = decode_constraint(&desc("{allowed: [.inf, -.inf, .nan]}")).unwrap();
        match constraint {
            ValueConstraint::Enumeration(e) => {
                assert_eq!(e.allowed()[0], Scalar::Float(f64::INFINITY));
                assert_eq!(e.allowed()[1], Scalar::Float(f64::NEG_INFINITY));
                assert_eq!(e.allowed()[2], Scalar::Float(f64::NAN));
            }
            other => panic!("Expected enumeration, got {other:?}"),
        }

        let constraint = decode_constraint(&desc("{minval: 0, maxval: .inf}")).unwrap();
        assert_eq!(
            constraint,
            ValueConstraint::Range(Range::between(0.0, f64::INFINITY).unwrap())
        );
    }

    #[test]
    fn test_decode_column_reports_position() {
        let description = desc(
            "{column: price, dtype: float64, valid_vals: [{minval: 0}, {include_lower: false}]}",
        );
        let err = decode_column(&description).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'price'"), "{message}");
        assert!(message.contains("#2"), "{message}");
    }

    #[test]
    fn test_decode_column_defaults() {
        let schema = decode_column(&desc("{column: a, dtype: object}")).unwrap();
        assert_eq!(schema, ColumnSchema::new("a", DType::Object));

        let schema = decode_column(&desc("{column: a, dtype: object, valid_vals: null}")).unwrap();
        assert!(schema.valid_vals.is_empty());
    }

    #[test]
    fn test_decode_column_accepts_constraints_alias() {
        let schema = decode_column(&desc(
            "{column: a, dtype: int64, constraints: [{kind: enum, allowed: [1, 2]}]}",
        ))
        .unwrap();
        assert_eq!(
            schema.valid_vals,
            vec![ValueConstraint::Enumeration(Enumeration::new([1, 2]))]
        );
    }

    #[test]
    fn test_decode_column_rejects_unknown_keys() {
        let err = decode_column(&desc("{column: a, dtype: int64, unique: true}")).unwrap_err();
        assert!(matches!(err, ParserError::Configuration(_)));
    }

    #[test]
    fn test_decode_schema_document_shapes() {
        let list = desc("[{column: a, dtype: int64}]");
        let wrapped = desc("{columns: [{column: a, dtype: int64}]}");

        assert_eq!(decode_schema(&list).unwrap(), decode_schema(&wrapped).unwrap());
        assert!(decode_schema(&desc("{fields: []}")).is_err());
        assert!(decode_schema(&desc("a")).is_err());
        assert_eq!(decode_schema(&Value::Null).unwrap(), vec![]);
    }

    #[test]
    fn test_encode_tagged() {
        let value = encode_column(&sample_schema(), EncodingStyle::Tagged).unwrap();
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({
                "column": "a",
                "dtype": "int64",
                "nullable": false,
                "valid_vals": [
                    {"kind": "range", "minval": 0.0, "maxval": 4.0,
                     "include_lower": true, "include_upper": true},
                    {"kind": "enum", "allowed": [10, 11, 12]}
                ]
            })
        );
    }

    #[test]
    fn test_encode_legacy_drops_kind() {
        let value = encode_column(&sample_schema(), EncodingStyle::Legacy).unwrap();
        let value = serde_json::to_value(&value).unwrap();
        assert_eq!(value["valid_vals"][1], json!({"allowed": [10, 11, 12]}));
        assert!(value["valid_vals"][0].get("kind").is_none());
    }

    #[test]
    fn test_round_trip_both_styles() {
        let schemas = vec![sample_schema(), ColumnSchema::new("b", "object")];
        for style in [EncodingStyle::Tagged, EncodingStyle::Legacy] {
            let encoded = encode_schema(&schemas, style).unwrap();
            assert_eq!(decode_schema(&encoded).unwrap(), schemas);
        }
    }

    #[test]
    fn test_round_trip_non_finite_values() {
        let schemas = vec![
            ColumnSchemaBuilder::new("a", "float64")
                .constraint(Range::between(f64::NEG_INFINITY, f64::INFINITY).unwrap())
                .allowed([f64::INFINITY, f64::NAN])
                .build(),
        ];
        for style in [EncodingStyle::Tagged, EncodingStyle::Legacy] {
            let encoded = encode_schema(&schemas, style).unwrap();
            assert_eq!(decode_schema(&encoded).unwrap(), schemas);
        }
    }
}
