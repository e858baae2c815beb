//! Arrow `RecordBatch` as a validation table.
//!
//! Arrow types map onto storage types as follows: signed integers and floats
//! keep their width, unsigned integers become `uint*`, booleans become `bool`,
//! and UTF-8 strings become the generic `object` type. Other Arrow types are
//! exposed under their lowercase Arrow name with a warning; their non-null
//! cells read as that type name, so only type and null checks are meaningful
//! for them.

use crate::{Column, Table};
use arrow_array::cast::AsArray;
use arrow_array::types::{
    ArrowPrimitiveType, Float16Type, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type,
    Int8Type, UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use arrow_array::{Array, RecordBatch};
use arrow_schema::DataType;
use schema_core::{DType, Scalar};
use std::borrow::Cow;
use tracing::warn;

impl Table for RecordBatch {
    fn column_names(&self) -> Vec<String> {
        self.schema()
            .fields()
            .iter()
            .map(|field| field.name().clone())
            .collect()
    }

    fn column(&self, name: &str) -> Option<Cow<'_, Column>> {
        let array = self.column_by_name(name)?;
        Some(Cow::Owned(column_from_array(name, array.as_ref())))
    }

    fn num_rows(&self) -> usize {
        RecordBatch::num_rows(self)
    }
}

/// Converts an Arrow array into a column with positional labels.
pub fn column_from_array(name: &str, array: &dyn Array) -> Column {
    let (dtype, values) = match array.data_type() {
        DataType::Int8 => (
            DType::Int8,
            primitive::<Int8Type>(array, |v| Scalar::Int(v.into())),
        ),
        DataType::Int16 => (
            DType::Int16,
            primitive::<Int16Type>(array, |v| Scalar::Int(v.into())),
        ),
        DataType::Int32 => (
            DType::Int32,
            primitive::<Int32Type>(array, |v| Scalar::Int(v.into())),
        ),
        DataType::Int64 => (DType::Int64, primitive::<Int64Type>(array, Scalar::Int)),
        DataType::UInt8 => (
            DType::from("uint8"),
            primitive::<UInt8Type>(array, |v| Scalar::Int(v.into())),
        ),
        DataType::UInt16 => (
            DType::from("uint16"),
            primitive::<UInt16Type>(array, |v| Scalar::Int(v.into())),
        ),
        DataType::UInt32 => (
            DType::from("uint32"),
            primitive::<UInt32Type>(array, |v| Scalar::Int(v.into())),
        ),
        DataType::UInt64 => (
            DType::from("uint64"),
            primitive::<UInt64Type>(array, |v| {
                i64::try_from(v).map_or(Scalar::Float(v as f64), Scalar::Int)
            }),
        ),
        DataType::Float16 => (
            DType::Float16,
            primitive::<Float16Type>(array, |v| Scalar::Float(v.to_f64())),
        ),
        DataType::Float32 => (
            DType::Float32,
            primitive::<Float32Type>(array, |v| Scalar::Float(v.into())),
        ),
        DataType::Float64 => (DType::Float64, primitive::<Float64Type>(array, Scalar::Float)),
        DataType::Boolean => (
            DType::from("bool"),
            array
                .as_boolean()
                .iter()
                .map(|v| v.map_or(Scalar::Null, Scalar::Bool))
                .collect(),
        ),
        DataType::Utf8 => (
            DType::Object,
            array
                .as_string::<i32>()
                .iter()
                .map(|v| v.map_or(Scalar::Null, Scalar::from))
                .collect(),
        ),
        DataType::LargeUtf8 => (
            DType::Object,
            array
                .as_string::<i64>()
                .iter()
                .map(|v| v.map_or(Scalar::Null, Scalar::from))
                .collect(),
        ),
        DataType::Null => (DType::Object, vec![Scalar::Null; array.len()]),
        other => {
            warn!(
                column = name,
                data_type = %other,
                "Unsupported Arrow type, only type and null checks apply"
            );
            let type_name = other.to_string();
            let values = (0..array.len())
                .map(|i| {
                    if array.is_null(i) {
                        Scalar::Null
                    } else {
                        Scalar::Str(type_name.clone())
                    }
                })
                .collect();
            (DType::from(type_name.as_str()), values)
        }
    };

    Column::new(name, dtype, values)
}

fn primitive<T: ArrowPrimitiveType>(
    array: &dyn Array,
    read: impl Fn(T::Native) -> Scalar,
) -> Vec<Scalar> {
    array
        .as_primitive::<T>()
        .iter()
        .map(|v| v.map_or(Scalar::Null, &read))
        .collect()
}
