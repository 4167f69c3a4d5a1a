//! SQLite value to JSON mapping.
//!
//! SQLite is dynamically typed: an aggregate like `SUM(yds)` has no declared
//! column type, so decoding goes by the runtime storage class of each value
//! rather than by the column declaration.

use crate::models::Row;
use serde_json::Value as JsonValue;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

/// SQLite storage class of a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageClass {
    Integer,
    Real,
    Text,
    Blob,
    Null,
}

/// Classify a runtime SQLite type name into a storage class.
pub fn storage_class(type_name: &str) -> StorageClass {
    match type_name.to_ascii_uppercase().as_str() {
        "NULL" => StorageClass::Null,
        "INTEGER" | "INT" | "BIGINT" | "BOOLEAN" => StorageClass::Integer,
        "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => StorageClass::Real,
        "BLOB" => StorageClass::Blob,
        _ => StorageClass::Text,
    }
}

/// Decode binary data to JSON: UTF-8 text when valid, base64 otherwise.
pub fn decode_binary_value(bytes: &[u8]) -> JsonValue {
    use base64::{Engine as _, engine::general_purpose::STANDARD};

    match std::str::from_utf8(bytes) {
        Ok(s) => JsonValue::String(s.to_string()),
        Err(_) => JsonValue::String(STANDARD.encode(bytes)),
    }
}

/// Trait for converting database rows to JSON maps.
pub trait RowToJson {
    fn to_json_map(&self) -> Row;
}

impl RowToJson for SqliteRow {
    fn to_json_map(&self) -> Row {
        self.columns()
            .iter()
            .enumerate()
            .map(|(idx, col)| (col.name().to_string(), decode_column(self, idx)))
            .collect()
    }
}

fn decode_column(row: &SqliteRow, idx: usize) -> JsonValue {
    let class = match row.try_get_raw(idx) {
        Ok(raw) if raw.is_null() => StorageClass::Null,
        Ok(raw) => storage_class(raw.type_info().name()),
        Err(e) => {
            tracing::error!(column = idx, error = %e, "Failed to read column");
            return JsonValue::Null;
        }
    };

    match class {
        StorageClass::Null => JsonValue::Null,
        StorageClass::Integer => row
            .try_get_unchecked::<i64, _>(idx)
            .map(|v| JsonValue::Number(v.into()))
            .unwrap_or(JsonValue::Null),
        StorageClass::Real => row
            .try_get_unchecked::<f64, _>(idx)
            .ok()
            .map(float_to_json)
            .unwrap_or(JsonValue::Null),
        StorageClass::Text => row
            .try_get_unchecked::<String, _>(idx)
            .map(JsonValue::String)
            .unwrap_or(JsonValue::Null),
        StorageClass::Blob => row
            .try_get_unchecked::<Vec<u8>, _>(idx)
            .map(|v| decode_binary_value(&v))
            .unwrap_or(JsonValue::Null),
    }
}

fn float_to_json(v: f64) -> JsonValue {
    serde_json::Number::from_f64(v)
        .map(JsonValue::Number)
        .unwrap_or_else(|| JsonValue::String(v.to_string()))
}
