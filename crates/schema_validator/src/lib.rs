//! # Tabular Schema Validator
//!
//! Validation engine for column schemas. This crate checks tables against an
//! ordered list of [`schema_core::ColumnSchema`] entries:
//!
//! - Column presence
//! - Storage type compatibility, including reading generic columns as floats
//! - Value constraints, combined with logical OR per column
//! - Nullability
//!
//! Tables are anything implementing [`Table`]: the in-memory [`DataFrame`]
//! (built directly or loaded from CSV) and Arrow `RecordBatch`.
//!
//! ## Example
//!
//! ```rust
//! use schema_core::{ColumnSchemaBuilder, Range};
//! use schema_validator::{Column, DataFrame, Validator};
//!
//! let table = DataFrame::from_columns([
//!     Column::infer("age", [31, 47, 212]),
//! ])
//! .unwrap();
//!
//! let schemas = vec![ColumnSchemaBuilder::new("age", "int64")
//!     .constraint(Range::between(0.0, 120.0).unwrap())
//!     .build()];
//!
//! let report = Validator::new().report(&table, &schemas);
//! if report.passed {
//!     println!("Validation passed!");
//! } else {
//!     println!("Validation failed: {:?}", report.errors);
//! }
//! ```

mod arrow;
mod dataset;
mod engine;
mod error;
mod loader;
mod schema;

pub use arrow::*;
pub use dataset::*;
pub use engine::*;
pub use error::*;
pub use loader::*;
pub use schema::*;
