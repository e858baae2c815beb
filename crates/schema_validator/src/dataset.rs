//! Table representation for validation.
//!
//! The validator only needs three capabilities from a table, captured by the
//! [`Table`] trait. [`DataFrame`] is the in-memory implementation; Arrow record
//! batches implement the trait in the `arrow` module.

use crate::TableError;
use indexmap::{IndexMap, IndexSet};
use schema_core::{DType, Scalar};
use std::borrow::Cow;

/// Read access to named columns with a shared row count.
pub trait Table {
    /// Column names in table order.
    fn column_names(&self) -> Vec<String>;

    /// Looks up a column by exact name.
    fn column(&self, name: &str) -> Option<Cow<'_, Column>>;

    /// Number of rows.
    fn num_rows(&self) -> usize;

    /// Returns true if the table has a column with this name.
    fn has_column(&self, name: &str) -> bool {
        self.column_names().iter().any(|c| c == name)
    }
}

/// A named column of values with its storage type and row labels.
///
/// Row labels play the role of an index: they travel with the values when rows
/// are selected or reordered, and they are never used to look values up.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: DType,
    index: Vec<Scalar>,
    values: Vec<Scalar>,
}

impl Column {
    /// Creates a column with an explicit storage type and positional labels
    /// `0..len`.
    pub fn new(name: impl Into<String>, dtype: impl Into<DType>, values: Vec<Scalar>) -> Self {
        let index = range_index(values.len());
        Self {
            name: name.into(),
            dtype: dtype.into(),
            index,
            values,
        }
    }

    /// Creates a column whose storage type is inferred from its values.
    ///
    /// Integers alone give `int64`. Any float or null mixed into numbers gives
    /// `float64`, with integers widened and nulls stored as NaN. Booleans alone
    /// give `bool`. Everything else, including a column of only nulls, is
    /// `object`.
    pub fn infer<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        let values: Vec<Scalar> = values.into_iter().map(Into::into).collect();
        let dtype = infer_dtype(&values);
        let values = if dtype.is_float() {
            values
                .into_iter()
                .map(|v| match v {
                    Scalar::Int(i) => Scalar::Float(i as f64),
                    Scalar::Null => Scalar::Float(f64::NAN),
                    other => other,
                })
                .collect()
        } else {
            values
        };
        Self::new(name, dtype, values)
    }

    /// Replaces the row labels.
    ///
    /// # Errors
    ///
    /// Returns `TableError::LengthMismatch` if the label count differs from
    /// the number of values.
    pub fn with_index(mut self, index: Vec<Scalar>) -> Result<Self, TableError> {
        if index.len() != self.values.len() {
            return Err(TableError::LengthMismatch {
                name: format!("index of {}", self.name),
                expected: self.values.len(),
                found: index.len(),
            });
        }
        self.index = index;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> &DType {
        &self.dtype
    }

    /// Row labels, aligned with [`Column::values`].
    pub fn index(&self) -> &[Scalar] {
        &self.index
    }

    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Per-row null mask. NaN counts as null.
    pub fn is_null(&self) -> Vec<bool> {
        self.values.iter().map(Scalar::is_null).collect()
    }

    /// Number of null-like values.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    pub fn has_nulls(&self) -> bool {
        self.values.iter().any(Scalar::is_null)
    }

    /// Distinct values in order of first occurrence.
    pub fn unique(&self) -> Vec<Scalar> {
        self.values
            .iter()
            .cloned()
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Returns a column with the same name and labels but new values and type.
    pub(crate) fn with_values(&self, dtype: DType, values: Vec<Scalar>) -> Self {
        Self {
            name: self.name.clone(),
            dtype,
            index: self.index.clone(),
            values,
        }
    }

    fn take(&self, positions: &[usize]) -> Self {
        Self {
            name: self.name.clone(),
            dtype: self.dtype.clone(),
            index: positions.iter().map(|&p| self.index[p].clone()).collect(),
            values: positions.iter().map(|&p| self.values[p].clone()).collect(),
        }
    }
}

fn range_index(len: usize) -> Vec<Scalar> {
    (0..len).map(|i| Scalar::Int(i as i64)).collect()
}

fn infer_dtype(values: &[Scalar]) -> DType {
    let non_null: Vec<&Scalar> = values.iter().filter(|v| !v.is_null()).collect();
    let has_nan = values.iter().any(|v| matches!(v, Scalar::Float(_)) && v.is_null());

    if non_null.is_empty() {
        return if has_nan { DType::Float64 } else { DType::Object };
    }
    if non_null.iter().all(|v| matches!(v, Scalar::Bool(_))) {
        return if non_null.len() == values.len() {
            DType::Other("bool".to_string())
        } else {
            DType::Object
        };
    }
    if non_null.iter().all(|v| matches!(v, Scalar::Int(_))) {
        return if non_null.len() == values.len() {
            DType::Int64
        } else {
            DType::Float64
        };
    }
    if non_null
        .iter()
        .all(|v| matches!(v, Scalar::Int(_) | Scalar::Float(_)))
    {
        return DType::Float64;
    }
    DType::Object
}

/// An in-memory table: ordered columns sharing one row index.
///
/// # Example
///
/// ```rust
/// use schema_validator::{Column, DataFrame, Table};
///
/// let frame = DataFrame::from_columns([
///     Column::infer("a", [1, 2, 3]),
///     Column::infer("b", ["x", "y", "z"]),
/// ])
/// .unwrap()
/// .set_index([10, 20, 30])
/// .unwrap();
///
/// assert_eq!(frame.num_rows(), 3);
/// assert_eq!(frame.column_names(), vec!["a", "b"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    index: Vec<Scalar>,
    columns: IndexMap<String, Column>,
}

impl DataFrame {
    /// Creates an empty table with no rows and no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from columns of equal length.
    ///
    /// The table gets positional labels `0..len`, replacing any labels the
    /// columns carried.
    ///
    /// # Errors
    ///
    /// Returns `TableError::LengthMismatch` for columns of different lengths
    /// and `TableError::DuplicateColumn` for repeated names.
    pub fn from_columns<I>(columns: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = Column>,
    {
        columns
            .into_iter()
            .try_fold(Self::new(), |frame, column| frame.with_column(column))
    }

    /// Appends a column, relabelling it with the table's index.
    ///
    /// The first column of an empty table sets the row count.
    pub fn with_column(mut self, column: Column) -> Result<Self, TableError> {
        if self.columns.is_empty() {
            self.index = range_index(column.len());
        }
        if self.columns.contains_key(column.name()) {
            return Err(TableError::DuplicateColumn(column.name().to_string()));
        }
        if column.len() != self.index.len() {
            return Err(TableError::LengthMismatch {
                name: column.name().to_string(),
                expected: self.index.len(),
                found: column.len(),
            });
        }

        let column = column.with_index(self.index.clone())?;
        self.columns.insert(column.name().to_string(), column);
        Ok(self)
    }

    /// Replaces the row labels of every column.
    ///
    /// # Errors
    ///
    /// Returns `TableError::LengthMismatch` if the label count differs from
    /// the row count.
    pub fn set_index<I, V>(mut self, labels: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        let labels: Vec<Scalar> = labels.into_iter().map(Into::into).collect();
        if labels.len() != self.num_rows() {
            return Err(TableError::LengthMismatch {
                name: "index".to_string(),
                expected: self.num_rows(),
                found: labels.len(),
            });
        }
        for column in self.columns.values_mut() {
            column.index = labels.clone();
        }
        self.index = labels;
        Ok(self)
    }

    /// Moves a column into the row index.
    pub fn set_index_column(mut self, name: &str) -> Result<Self, TableError> {
        let column = self
            .columns
            .shift_remove(name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))?;
        self.set_index(column.values)
    }

    /// Row labels.
    pub fn index(&self) -> &[Scalar] {
        &self.index
    }

    /// Borrows a column by name.
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Iterates over columns in table order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    /// Selects rows by position, keeping their labels. Positions may repeat
    /// and appear in any order.
    ///
    /// # Errors
    ///
    /// Returns `TableError::RowOutOfBounds` for a position past the last row.
    pub fn take(&self, positions: &[usize]) -> Result<Self, TableError> {
        let len = self.num_rows();
        if let Some(&position) = positions.iter().find(|&&p| p >= len) {
            return Err(TableError::RowOutOfBounds { position, len });
        }

        Ok(Self {
            index: positions.iter().map(|&p| self.index[p].clone()).collect(),
            columns: self
                .columns
                .iter()
                .map(|(name, column)| (name.clone(), column.take(positions)))
                .collect(),
        })
    }

    /// Keeps the rows where `mask` is true, keeping their labels.
    pub fn filter(&self, mask: &[bool]) -> Result<Self, TableError> {
        if mask.len() != self.num_rows() {
            return Err(TableError::LengthMismatch {
                name: "mask".to_string(),
                expected: self.num_rows(),
                found: mask.len(),
            });
        }
        let positions: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i))
            .collect();
        self.take(&positions)
    }
}

impl Table for DataFrame {
    fn column_names(&self) -> Vec<String> {
        self.columns.keys().cloned().collect()
    }

    fn column(&self, name: &str) -> Option<Cow<'_, Column>> {
        self.columns.get(name).map(Cow::Borrowed)
    }

    fn num_rows(&self) -> usize {
        self.index.len()
    }

    fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }
}
