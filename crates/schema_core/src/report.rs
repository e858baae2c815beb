//! Validation report types.
//!
//! The validator's primary output is a plain list of messages. A
//! [`ValidationReport`] wraps that list together with execution statistics for
//! callers that render results, such as the CLI.

/// Report of validation results.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// Whether validation passed overall
    pub passed: bool,

    /// Violation messages in schema order
    pub errors: Vec<String>,

    /// Validation statistics
    pub stats: ValidationStats,
}

/// Statistics about validation execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationStats {
    /// Number of rows in the validated table
    pub rows_validated: usize,

    /// Number of schema entries checked
    pub columns_checked: usize,

    /// Number of constraints evaluated
    pub constraints_evaluated: usize,

    /// Validation duration in milliseconds
    pub duration_ms: u64,
}

impl ValidationReport {
    /// Creates a report from a list of messages. An empty list passes.
    pub fn new(errors: Vec<String>, stats: ValidationStats) -> Self {
        Self {
            passed: errors.is_empty(),
            errors,
            stats,
        }
    }

    /// Number of violation messages.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
