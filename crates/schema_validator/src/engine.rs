//! Main validation engine.
//!
//! This module provides the [`Validator`] that checks a table against an
//! ordered list of column schemas. Each schema entry runs, in order, the
//! presence check, the storage type check, the value check and the null check.
//! A failed presence or type check skips the remaining checks for that entry.

use crate::schema::{check_dtype, effective_column};
use crate::{Column, Table, ValidationError};
use indexmap::IndexSet;
use schema_core::{ColumnSchema, Scalar, ValidationReport, ValidationStats, ValueConstraint};
use std::time::Instant;
use tracing::{debug, warn};

/// Validation engine for column schemas.
///
/// The validator holds no state between calls; validating the same table
/// twice yields the same findings.
///
/// # Example
///
/// ```rust
/// use schema_core::{ColumnSchemaBuilder, Enumeration, Range};
/// use schema_validator::{Column, DataFrame, Validator};
///
/// let table = DataFrame::from_columns([Column::infer("a", [0, 1, 2, 5, 10, 11, 12, -1])]).unwrap();
/// let schemas = vec![ColumnSchemaBuilder::new("a", "int64")
///     .nullable(false)
///     .constraint(Range::between(0.0, 4.0).unwrap())
///     .constraint(Enumeration::new([10, 11, 12]))
///     .build()];
///
/// let errors = Validator::new().validate(&table, &schemas);
/// assert_eq!(
///     errors,
///     vec!["found illegal values [5, -1] in a, expected value in [[0.0, 4.0], {10, 11, 12}]"]
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    /// Creates a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates a table and returns one message per finding, in schema
    /// order. An empty list means the table is valid.
    pub fn validate<T: Table + ?Sized>(&self, table: &T, schemas: &[ColumnSchema]) -> Vec<String> {
        self.findings(table, schemas)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Validates a table and returns the typed findings, in schema order.
    pub fn findings<T: Table + ?Sized>(
        &self,
        table: &T,
        schemas: &[ColumnSchema],
    ) -> Vec<ValidationError> {
        let mut stats = ValidationStats::default();
        self.run(table, schemas, &mut stats)
    }

    /// Validates a table and wraps the messages with execution statistics.
    pub fn report<T: Table + ?Sized>(
        &self,
        table: &T,
        schemas: &[ColumnSchema],
    ) -> ValidationReport {
        let start = Instant::now();
        let mut stats = ValidationStats::default();
        let errors = self
            .run(table, schemas, &mut stats)
            .iter()
            .map(ToString::to_string)
            .collect();
        stats.duration_ms = start.elapsed().as_millis() as u64;

        ValidationReport::new(errors, stats)
    }

    fn run<T: Table + ?Sized>(
        &self,
        table: &T,
        schemas: &[ColumnSchema],
        stats: &mut ValidationStats,
    ) -> Vec<ValidationError> {
        stats.rows_validated = table.num_rows();
        let mut findings = Vec::new();

        for schema in schemas {
            stats.columns_checked += 1;
            self.check_column(table, schema, stats, &mut findings);
        }

        debug!(
            columns = stats.columns_checked,
            rows = stats.rows_validated,
            findings = findings.len(),
            "Validation finished"
        );
        findings
    }

    fn check_column<T: Table + ?Sized>(
        &self,
        table: &T,
        schema: &ColumnSchema,
        stats: &mut ValidationStats,
        findings: &mut Vec<ValidationError>,
    ) {
        let Some(column) = table.column(&schema.column) else {
            debug!(column = %schema.column, "Column not found");
            findings.push(ValidationError::missing_column(&schema.column));
            return;
        };

        let check = check_dtype(&schema.dtype, &column);
        if !check.is_compatible() {
            debug!(
                column = %schema.column,
                found = %column.dtype(),
                expected = %schema.dtype,
                "Storage type mismatch"
            );
            findings.push(ValidationError::invalid_dtype(
                &schema.column,
                column.dtype().clone(),
                schema.dtype.clone(),
            ));
            return;
        }

        // Nulls are counted on the stored values; coerced text such as "nan" is not null
        let null_count = column.null_count();
        let column = effective_column(schema, &column, check);

        if !schema.valid_vals.is_empty() {
            stats.constraints_evaluated += schema.valid_vals.len();
            match find_illegal_values(&column, &schema.valid_vals, schema.nullable) {
                Ok(Some(illegal)) => findings.push(ValidationError::IllegalValues {
                    column: schema.column.clone(),
                    values: illegal.values,
                    rows: illegal.rows,
                    constraints: schema.valid_vals.clone(),
                }),
                Ok(None) => {}
                Err(finding) => {
                    warn!(column = %schema.column, "{finding}");
                    findings.push(finding);
                }
            }
        }

        if !schema.nullable && null_count > 0 {
            findings.push(ValidationError::null_values(&schema.column, null_count));
        }
    }
}

/// Values of a column rejected by all of its constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct IllegalValues {
    /// Distinct offending values in order of first occurrence
    pub values: Vec<Scalar>,
    /// Row labels of every offending row, in row order
    pub rows: Vec<Scalar>,
}

/// Finds the values of `column` that no constraint accepts.
///
/// Constraints are combined with logical OR over the column in its stored row
/// order. When `nullable` is true, null-like values are never reported.
/// Returns `Ok(None)` when every value is accepted.
///
/// # Errors
///
/// Returns a [`ValidationError::NonNumericColumn`] finding when a range
/// constraint meets string values.
pub fn find_illegal_values(
    column: &Column,
    constraints: &[ValueConstraint],
    nullable: bool,
) -> Result<Option<IllegalValues>, ValidationError> {
    if constraints.is_empty() {
        return Ok(None);
    }

    let mut accepted = vec![false; column.len()];
    for constraint in constraints {
        let mask = constraint.contains(column.values()).map_err(|err| {
            debug!(column = %column.name(), error = %err, "Constraint cannot be evaluated");
            ValidationError::NonNumericColumn {
                column: column.name().to_string(),
                constraint: constraint.clone(),
            }
        })?;
        for (passed, hit) in accepted.iter_mut().zip(mask) {
            *passed |= hit;
        }
    }

    let mut values = IndexSet::new();
    let mut rows = Vec::new();
    let rejected = column
        .values()
        .iter()
        .zip(column.index())
        .zip(&accepted)
        .filter(|((value, _), passed)| !**passed && !(nullable && value.is_null()));
    for ((value, label), _) in rejected {
        values.insert(value.clone());
        rows.push(label.clone());
    }

    if values.is_empty() {
        return Ok(None);
    }
    Ok(Some(IllegalValues {
        values: values.into_iter().collect(),
        rows,
    }))
}
