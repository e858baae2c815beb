//! Storage type compatibility between a column and its declared type.
//!
//! Declared float types accept integer storage as is, and accept generic
//! `object` storage when every non-null value reads as a number. The values
//! read that way replace the stored ones for the remaining checks.

use crate::{Column, Table};
use schema_core::{ColumnSchema, DType, Scalar};
use std::borrow::Cow;

/// Outcome of comparing a column's storage type with the declared one.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeCheck {
    /// Same storage type
    Exact,
    /// Integers stored where floats are declared
    Widened,
    /// Generic storage whose values all read as floats; holds those floats
    Coerced(Vec<Scalar>),
    /// Incompatible storage type
    Mismatch,
}

impl TypeCheck {
    /// Returns true unless the types are incompatible.
    pub fn is_compatible(&self) -> bool {
        !matches!(self, TypeCheck::Mismatch)
    }
}

/// Compares the column's storage type with `declared`.
pub fn check_dtype(declared: &DType, column: &Column) -> TypeCheck {
    let actual = column.dtype();
    if actual == declared {
        return TypeCheck::Exact;
    }
    if !declared.is_float() {
        return TypeCheck::Mismatch;
    }
    if actual.is_integer() {
        return TypeCheck::Widened;
    }
    if actual.is_object() {
        return match coerce_floats(column.values()) {
            Some(values) => TypeCheck::Coerced(values),
            None => TypeCheck::Mismatch,
        };
    }
    TypeCheck::Mismatch
}

/// Reads every value as a float. Nulls become NaN. Returns `None` as soon as a
/// value has no numeric reading.
pub fn coerce_floats(values: &[Scalar]) -> Option<Vec<Scalar>> {
    values
        .iter()
        .map(|v| {
            if v.is_null() {
                Some(Scalar::Float(f64::NAN))
            } else {
                v.coerce_f64()
            }
        })
        .collect()
}

/// Returns the column as seen by the value checks: the coerced floats when
/// the type check coerced, the column itself otherwise.
pub(crate) fn effective_column<'a>(
    schema: &ColumnSchema,
    column: &'a Column,
    check: TypeCheck,
) -> Cow<'a, Column> {
    match check {
        TypeCheck::Coerced(values) => {
            Cow::Owned(column.with_values(schema.dtype.clone(), values))
        }
        _ => Cow::Borrowed(column),
    }
}

/// Derives a schema from a table: one entry per column with its storage
/// type, nullable only if the column holds nulls, and no value constraints.
pub fn infer_schema<T: Table + ?Sized>(table: &T) -> Vec<ColumnSchema> {
    table
        .column_names()
        .iter()
        .filter_map(|name| table.column(name))
        .map(|column| ColumnSchema {
            column: column.name().to_string(),
            dtype: column.dtype().clone(),
            nullable: column.has_nulls(),
            valid_vals: Vec::new(),
        })
        .collect()
}
