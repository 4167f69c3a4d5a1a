//! Query-related data models.
//!
//! This module defines the row shape returned by every query, the bound
//! parameter type, and the row-limit bounds shared by the tool layer.

use serde_json::Value as JsonValue;

/// Default row limit for list-shaped tool results.
pub const DEFAULT_ROW_LIMIT: u32 = 20;

/// Maximum allowed row limit.
pub const MAX_ROW_LIMIT: u32 = 500;

/// A single result row, keyed by column name in select-list order.
pub type Row = serde_json::Map<String, JsonValue>;

/// A parameter value bound to a `?` placeholder.
///
/// Free text supplied by a caller only ever reaches SQL as one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
}

impl SqlParam {
    /// Wrap free text for a `LIKE` substring match.
    pub fn contains(text: &str) -> Self {
        Self::Text(format!("%{}%", text.trim()))
    }

    /// Get the type name of this parameter for debugging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Text(_) => "text",
        }
    }
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for SqlParam {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Clamp a requested row limit into `[1, MAX_ROW_LIMIT]`.
///
/// Returns the effective limit and, when the request was out of range, a
/// warning suitable for surfacing to the caller.
pub fn effective_limit(requested: Option<u32>, default: u32) -> (u32, Option<String>) {
    match requested {
        None => (default.clamp(1, MAX_ROW_LIMIT), None),
        Some(0) => (
            1,
            Some("Requested limit 0 is below the minimum; returning 1 row.".to_string()),
        ),
        Some(n) if n > MAX_ROW_LIMIT => (
            MAX_ROW_LIMIT,
            Some(format!(
                "Requested limit {} exceeds maximum allowed ({}). Results capped to {} rows.",
                n, MAX_ROW_LIMIT, MAX_ROW_LIMIT
            )),
        ),
        Some(n) => (n, None),
    }
}
