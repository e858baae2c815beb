//! Error types for schema construction and decoding.
//!
//! Construction and configuration errors are programmer mistakes and abort
//! immediately. Data-quality findings are never represented here; they are
//! reported by the validator as messages.

use thiserror::Error;

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Main error type for schema operations.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A range constraint was built with missing, unordered or NaN bounds
    #[error("Invalid range constraint: {0}")]
    InvalidRange(String),

    /// A schema description could not be turned into a schema
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A range constraint was applied to values that are not numeric
    #[error("Range constraint {constraint} requires numeric values, found {found}")]
    NonNumeric {
        /// Display form of the constraint
        constraint: String,
        /// Type name of the first offending value
        found: String,
    },
}

impl SchemaError {
    /// Creates a new invalid range error.
    pub fn invalid_range(message: impl Into<String>) -> Self {
        Self::InvalidRange(message.into())
    }

    /// Creates a new configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
