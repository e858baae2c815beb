//! Integration tests for the validation engine.
//!
//! These tests run complete schemas against realistic tables built in memory
//! and loaded from CSV.

use schema_core::{ColumnSchema, ColumnSchemaBuilder, Enumeration, Range, Scalar};
use schema_validator::{
    read_csv_from_reader, Column, CsvOptions, DataFrame, ValidationError, Validator,
};

/// Schema for column `a`: values in [0, 4] or one of 10, 11, 12.
fn range_or_list_schema() -> ColumnSchema {
    ColumnSchemaBuilder::new("a", "int64")
        .constraint(Range::between(0.0, 4.0).unwrap())
        .constraint(Enumeration::new([10, 11, 12]))
        .build()
}

/// Columns `a`, `b`, `c` with minimums 0, 1 and 2.
fn minimum_schema() -> Vec<ColumnSchema> {
    ["a", "b", "c"]
        .iter()
        .enumerate()
        .map(|(i, name)| {
            ColumnSchemaBuilder::new(*name, "int64")
                .constraint(Range::at_least(i as f64).unwrap())
                .build()
        })
        .collect()
}

/// Column `a` declared int64, column `b` declared float64.
fn mixed_numeric_schema() -> Vec<ColumnSchema> {
    vec![
        ColumnSchema::new("a", "int64"),
        ColumnSchema::new("b", "float64"),
    ]
}

fn frame(columns: Vec<Column>) -> DataFrame {
    DataFrame::from_columns(columns).unwrap()
}

fn validate(table: &DataFrame, schemas: &[ColumnSchema]) -> Vec<String> {
    Validator::new().validate(table, schemas)
}

#[test]
fn test_end_to_end_range_or_list() {
    let schemas = vec![ColumnSchemaBuilder::new("a", "int64")
        .nullable(false)
        .constraint(Range::between(0.0, 4.0).unwrap())
        .constraint(Enumeration::new([10, 11, 12]))
        .build()];
    let table = frame(vec![Column::infer("a", [0, 1, 2, 5, 10, 11, 12, -1])]);

    assert_eq!(
        validate(&table, &schemas),
        vec!["found illegal values [5, -1] in a, expected value in [[0.0, 4.0], {10, 11, 12}]"]
    );
}

#[test]
fn test_range_or_list_cases() {
    let cases: [(&[i64], bool); 4] = [
        (&[0, 1, 2], true),
        (&[0, 1, 5], false),
        (&[1, 10, 3], true),
        (&[-1, -1, -1], false),
    ];

    for (values, expected) in cases {
        let table = frame(vec![Column::infer("a", values.iter().copied())]);
        let passed = validate(&table, &[range_or_list_schema()]).is_empty();
        assert_eq!(passed, expected, "values {values:?}");
    }
}

#[test]
fn test_scrambled_index() {
    // Rows labelled 3, 1, 2 after moving `idx` into the index
    let table = frame(vec![
        Column::infer("idx", [3, 1, 2]),
        Column::infer("a", [2, 5, 1]),
    ])
    .set_index_column("idx")
    .unwrap();

    let findings = Validator::new().findings(&table, &[range_or_list_schema()]);
    assert_eq!(findings.len(), 1);
    match &findings[0] {
        ValidationError::IllegalValues { values, rows, .. } => {
            assert_eq!(values, &vec![Scalar::Int(5)]);
            assert_eq!(rows, &vec![Scalar::Int(1)]);
        }
        other => panic!("Expected illegal values, got {other:?}"),
    }
}

#[test]
fn test_valid_data_passes() {
    let table = frame(vec![
        Column::infer("a", (0..20).map(|i| i + 1)),
        Column::infer("b", (0..20).map(|i| i * 2 + 1)),
        Column::infer("c", (0..20).map(|i| i * 3 + 2)),
    ]);

    assert!(validate(&table, &minimum_schema()).is_empty());
}

#[test]
fn test_float_columns_accept_ints_floats_and_nulls() {
    let ints = frame(vec![
        Column::infer("a", 0..20),
        Column::infer("b", 0..20),
    ]);
    let halves = frame(vec![
        Column::infer("a", 0..20),
        Column::infer("b", (0..20i32).map(|i| f64::from(i) / 2.0)),
    ]);
    let nulls = frame(vec![
        Column::infer("a", 0..20),
        Column::infer("b", (0..20).map(|_| Scalar::Null)),
    ]);

    for table in [ints, halves, nulls] {
        let errors = validate(&table, &mixed_numeric_schema());
        assert!(errors.is_empty(), "Expected no errors, got {errors:?}");
    }
}

#[test]
fn test_invalid_dtype_reported_once_per_column() {
    let table = frame(vec![
        Column::infer("a", (0..20).map(|_| "a")),
        Column::infer("b", (0..20).map(|i| i * 2 + 1)),
        Column::infer("c", (0..20).map(|i| i * 3 + 2)),
    ]);

    assert_eq!(
        validate(&table, &minimum_schema()),
        vec!["invalid datatype for a: found object, expected int64"]
    );
}

#[test]
fn test_mixed_numeric_invalid_dtypes() {
    let decimals_in_ints = frame(vec![
        Column::infer("a", (0..20i32).map(|i| f64::from(i) / 2.0)),
        Column::infer("b", 0..20),
    ]);
    let nulls_in_ints = frame(vec![
        Column::infer("a", (0..20).map(|_| Scalar::Null)),
        Column::infer("b", 0..20),
    ]);
    let text_in_floats = frame(vec![
        Column::infer("a", 0..20),
        Column::infer(
            "b",
            (0..20).map(|i| if i % 2 == 0 { Scalar::Null } else { Scalar::from("b") }),
        ),
    ]);

    for table in [decimals_in_ints, nulls_in_ints, text_in_floats] {
        let errors = validate(&table, &mixed_numeric_schema());
        assert_eq!(errors.len(), 1, "Expected a single dtype error, got {errors:?}");
        assert!(errors[0].starts_with("invalid datatype"));
    }
}

#[test]
fn test_every_column_can_fail_dtype() {
    let table = frame(vec![
        Column::infer("a", (0..20).map(|_| "a")),
        Column::infer("b", (0..20).map(|_| "b")),
        Column::infer("c", (0..20i32).map(|i| f64::from(i + 1) / 3.0 * 12.0)),
    ]);

    assert_eq!(validate(&table, &minimum_schema()).len(), 3);
}

#[test]
fn test_values_below_minimum() {
    let table = frame(vec![
        Column::infer("a", (0..20).map(|i| -i)),
        Column::infer("b", (0..20).map(|i| i * 2 + 1)),
        Column::infer("c", (0..20).map(|i| i * 3 + 2)),
    ]);

    let errors = validate(&table, &minimum_schema());
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("found illegal values [-1, -2,"));
}

#[test]
fn test_exclusive_bounds_leave_a_gap() {
    let schemas = vec![ColumnSchemaBuilder::new("a", "int64")
        .constraint(Range::between(0.0, 1.0).unwrap().with_include_upper(false))
        .constraint(Range::between(1.0, 99.0).unwrap().with_include_lower(false))
        .build()];
    let table = frame(vec![Column::infer("a", 0..20)]);

    assert_eq!(
        validate(&table, &schemas),
        vec!["found illegal values [1] in a, expected value in [[0.0, 1.0), (1.0, 99.0]]"]
    );
}

#[test]
fn test_missing_column() {
    let table = frame(vec![
        Column::infer("b", (0..20).map(|i| i * 2 + 1)),
        Column::infer("c", (0..20).map(|i| i * 3 + 2)),
    ]);

    assert_eq!(
        validate(&table, &minimum_schema()),
        vec!["required column a not found"]
    );
}

#[test]
fn test_nullable_float_column_with_nulls_passes() {
    let schemas = vec![ColumnSchemaBuilder::new("a", "float64")
        .constraint(Range::at_least(0.0).unwrap())
        .build()];
    let table = frame(vec![Column::infer(
        "a",
        (0..20).map(|i| {
            if i % 2 == 0 {
                Scalar::Null
            } else {
                Scalar::Float(f64::NAN)
            }
        }),
    )]);

    assert!(validate(&table, &schemas).is_empty());
}

#[test]
fn test_csv_end_to_end() {
    let data = "\
id,price,status,quantity
r1,9.5,active,1
r2, 12 ,archived,2
r3,,active,
r4,-3,deleted,4
";
    let options = CsvOptions::default().with_index_column("id");
    let table = read_csv_from_reader(data.as_bytes(), &options).unwrap();

    let schemas = vec![
        ColumnSchemaBuilder::new("price", "float64")
            .nullable(false)
            .constraint(Range::at_least(0.0).unwrap())
            .build(),
        ColumnSchemaBuilder::new("status", "object")
            .nullable(false)
            .allowed(["active", "archived"])
            .build(),
        ColumnSchema::new("quantity", "float64"),
        ColumnSchema::new("discount", "float64"),
    ];

    let findings = Validator::new().findings(&table, &schemas);
    let messages: Vec<String> = findings.iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        vec![
            "found illegal values [nan, -3.0] in price, expected value in [[0.0, inf)]",
            "found null values in non-nullable column price",
            "found illegal values [\"deleted\"] in status, expected value in [{\"active\", \"archived\"}]",
            "required column discount not found",
        ]
    );

    match &findings[0] {
        ValidationError::IllegalValues { rows, .. } => {
            assert_eq!(rows, &vec![Scalar::from("r3"), Scalar::from("r4")]);
        }
        other => panic!("Expected illegal values, got {other:?}"),
    }
}
