//! Builder pattern for creating column schemas.
//!
//! This module provides an ergonomic builder for constructing schemas
//! with a fluent API.

use crate::{ColumnSchema, DType, Enumeration, Scalar, ValueConstraint};

/// Builder for creating a `ColumnSchema`.
///
/// # Example
///
/// ```rust
/// use schema_core::{ColumnSchemaBuilder, Range};
///
/// let schema = ColumnSchemaBuilder::new("age", "int64")
///     .nullable(false)
///     .constraint(Range::between(0.0, 120.0).unwrap())
///     .build();
///
/// assert_eq!(schema.column, "age");
/// assert!(!schema.nullable);
/// assert_eq!(schema.valid_vals.len(), 1);
/// ```
#[derive(Debug)]
pub struct ColumnSchemaBuilder {
    column: String,
    dtype: DType,
    nullable: bool,
    valid_vals: Vec<ValueConstraint>,
}

impl ColumnSchemaBuilder {
    /// Creates a new column schema builder.
    ///
    /// # Arguments
    ///
    /// * `column` - Column name
    /// * `dtype` - Declared storage type (e.g., "int64", "float64", "object")
    pub fn new(column: impl Into<String>, dtype: impl Into<DType>) -> Self {
        Self {
            column: column.into(),
            dtype: dtype.into(),
            nullable: true,
            valid_vals: Vec::new(),
        }
    }

    /// Sets whether the column is nullable.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Adds a constraint to the column.
    pub fn constraint(mut self, constraint: impl Into<ValueConstraint>) -> Self {
        self.valid_vals.push(constraint.into());
        self
    }

    /// Adds an enumeration of allowed values.
    pub fn allowed<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        self.constraint(Enumeration::new(values))
    }

    /// Builds the column schema.
    pub fn build(self) -> ColumnSchema {
        ColumnSchema {
            column: self.column,
            dtype: self.dtype,
            nullable: self.nullable,
            valid_vals: self.valid_vals,
        }
    }
}
