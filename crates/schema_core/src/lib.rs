//! # Tabular Schema Core
//!
//! Core data structures for declaring what the columns of a table must look like.
//!
//! A schema is an ordered list of [`ColumnSchema`] entries. Each entry names a column,
//! declares its storage type ([`DType`]), whether it may contain nulls, and an optional
//! set of [`ValueConstraint`]s. A value is accepted when it satisfies at least one of
//! the constraints of its column.
//!
//! ## Key Concepts
//!
//! - **Scalar**: a single cell value (null, bool, integer, float or string)
//! - **DType**: the declared or observed storage type of a column
//! - **ValueConstraint**: a numeric [`Range`] or an [`Enumeration`] of allowed values
//! - **ColumnSchema**: the requirements a single column must satisfy
//!
//! ## Example
//!
//! ```rust
//! use schema_core::{ColumnSchemaBuilder, Enumeration, Range, Scalar};
//!
//! let schema = ColumnSchemaBuilder::new("a", "int64")
//!     .nullable(false)
//!     .constraint(Range::between(0.0, 4.0).unwrap())
//!     .constraint(Enumeration::new([10, 11, 12]))
//!     .build();
//!
//! let values = vec![Scalar::Int(2), Scalar::Int(11), Scalar::Int(5)];
//! let range_mask = schema.valid_vals[0].contains(&values).unwrap();
//! assert_eq!(range_mask, vec![true, false, false]);
//! ```

pub mod builder;
pub mod constraint;
pub mod error;
pub mod report;
pub mod scalar;
pub mod schema;

pub use builder::*;
pub use constraint::*;
pub use error::*;
pub use report::*;
pub use scalar::*;
pub use schema::*;
