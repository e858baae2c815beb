//! Error types for validation operations.
//!
//! [`ValidationError`] values are findings: they describe data that does not
//! satisfy a schema and are collected, never propagated. [`TableError`] covers
//! failures while building or loading a table.

use schema_core::{DType, Scalar, ValueConstraint};
use std::fmt;
use thiserror::Error;

/// A single schema violation found in a table.
///
/// The `Display` form of each variant is the message reported to callers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The schema names a column the table does not have
    #[error("required column {column} not found")]
    MissingColumn { column: String },

    /// The column's storage type is not compatible with the declared one
    #[error("invalid datatype for {column}: found {found}, expected {expected}")]
    InvalidDtype {
        column: String,
        found: DType,
        expected: DType,
    },

    /// Values rejected by every constraint of the column
    #[error(
        "found illegal values [{}] in {column}, expected value in [{}]",
        join(.values),
        join(.constraints)
    )]
    IllegalValues {
        column: String,
        /// Distinct offending values in first-occurrence order
        values: Vec<Scalar>,
        /// Row labels of every offending row
        rows: Vec<Scalar>,
        constraints: Vec<ValueConstraint>,
    },

    /// A range constraint was declared on a column holding strings
    #[error("range constraint {constraint} cannot be applied to non-numeric column {column}")]
    NonNumericColumn {
        column: String,
        constraint: ValueConstraint,
    },

    /// Nulls in a column declared non-nullable
    #[error("found null values in non-nullable column {column}")]
    NullValues { column: String, count: usize },
}

impl ValidationError {
    /// Creates a new missing column finding.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Creates a new dtype mismatch finding.
    pub fn invalid_dtype(column: impl Into<String>, found: DType, expected: DType) -> Self {
        Self::InvalidDtype {
            column: column.into(),
            found,
            expected,
        }
    }

    /// Creates a new null values finding.
    pub fn null_values(column: impl Into<String>, count: usize) -> Self {
        Self::NullValues {
            column: column.into(),
            count,
        }
    }

    /// Name of the column the finding is about.
    pub fn column(&self) -> &str {
        match self {
            Self::MissingColumn { column }
            | Self::InvalidDtype { column, .. }
            | Self::IllegalValues { column, .. }
            | Self::NonNumericColumn { column, .. }
            | Self::NullValues { column, .. } => column,
        }
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors raised while building or loading a table.
#[derive(Debug, Error)]
pub enum TableError {
    /// A column or index does not have the table's row count
    #[error("Length mismatch for '{name}': expected {expected} rows, found {found}")]
    LengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// Two columns share a name
    #[error("Duplicate column '{0}'")]
    DuplicateColumn(String),

    /// A referenced column does not exist
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    /// A row position is outside the table
    #[error("Row position {position} out of bounds for table with {len} rows")]
    RowOutOfBounds { position: usize, len: usize },

    /// Error from the CSV library
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema_core::{Enumeration, Range};

    #[test]
    fn test_finding_messages() {
        assert_eq!(
            ValidationError::missing_column("a").to_string(),
            "required column a not found"
        );
        assert_eq!(
            ValidationError::invalid_dtype("a", DType::Object, DType::Int64).to_string(),
            "invalid datatype for a: found object, expected int64"
        );
        assert_eq!(
            ValidationError::null_values("a", 2).to_string(),
            "found null values in non-nullable column a"
        );
    }

    #[test]
    fn test_illegal_values_message() {
        let finding = ValidationError::IllegalValues {
            column: "a".to_string(),
            values: vec![Scalar::Int(5), Scalar::Int(-1)],
            rows: vec![Scalar::Int(3), Scalar::Int(7)],
            constraints: vec![
                ValueConstraint::Range(Range::between(0.0, 4.0).unwrap()),
                ValueConstraint::Enumeration(Enumeration::new([10, 11, 12])),
            ],
        };

        assert_eq!(
            finding.to_string(),
            "found illegal values [5, -1] in a, expected value in [[0.0, 4.0], {10, 11, 12}]"
        );
        assert_eq!(finding.column(), "a");
    }
}
