//! Error types for the Saints encyclopedia server.
//!
//! This module defines all error types using `thiserror`. Each variant carries
//! enough context for an AI assistant (or an HTTP client) to understand what
//! went wrong: validation failures name the offending input field, database
//! failures carry the SQLSTATE and a suggestion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Connection failed: {message}")]
    Connection { message: String, suggestion: String },

    #[error("Database error: {message}")]
    Database {
        message: String,
        sql_state: Option<String>,
        suggestion: String,
    },

    #[error("Timeout: {operation} exceeded {elapsed_secs}s")]
    Timeout {
        operation: String,
        elapsed_secs: u64,
    },

    #[error("Invalid input for '{field}': {message}")]
    InvalidInput { field: String, message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl StatsError {
    /// Create a connection error with a helpful suggestion.
    pub fn connection(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a database error with optional SQL state.
    pub fn database(
        message: impl Into<String>,
        sql_state: Option<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Database {
            message: message.into(),
            sql_state,
            suggestion: suggestion.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>, elapsed_secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            elapsed_secs,
        }
    }

    /// Create a validation error naming the rejected input field.
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the suggestion for this error, if available.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Connection { suggestion, .. } => Some(suggestion),
            Self::Database { suggestion, .. } => Some(suggestion),
            _ => None,
        }
    }

    /// Name of the input field that failed validation, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Convert sqlx errors to StatsError.
///
/// Nothing here retries; the driver error is classified and handed back.
impl From<sqlx::Error> for StatsError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(msg) => StatsError::connection(
                msg.to_string(),
                "Check the database URL, e.g. sqlite:saints_encyclopedia.db",
            ),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                StatsError::database(
                    db_err.message(),
                    code,
                    "Check that the database has the expected stats schema",
                )
            }
            sqlx::Error::RowNotFound => StatsError::database(
                "No rows returned",
                None,
                "Verify the query conditions match existing data",
            ),
            sqlx::Error::PoolTimedOut => StatsError::connection(
                "Timed out waiting for a pooled connection",
                "Raise acquire_timeout in the database URL or reduce concurrent requests",
            ),
            sqlx::Error::PoolClosed => {
                StatsError::connection("Connection pool is closed", "Restart the server")
            }
            sqlx::Error::Io(io_err) => StatsError::connection(
                format!("I/O error: {}", io_err),
                "Check that the database file exists and is readable",
            ),
            sqlx::Error::Protocol(msg) => StatsError::connection(
                format!("Protocol error: {}", msg),
                "Check that the file is a SQLite database",
            ),
            sqlx::Error::ColumnNotFound(col) => StatsError::database(
                format!("Column not found: {}", col),
                None,
                "Check that the database has the expected stats schema",
            ),
            sqlx::Error::ColumnDecode { index, source } => {
                StatsError::internal(format!("Failed to decode column {}: {}", index, source))
            }
            sqlx::Error::Decode(source) => {
                StatsError::internal(format!("Decode error: {}", source))
            }
            sqlx::Error::WorkerCrashed => StatsError::internal("Database worker crashed"),
            _ => StatsError::internal(format!("Unknown database error: {}", err)),
        }
    }
}

/// Result type alias for stats operations.
pub type StatsResult<T> = Result<T, StatsError>;

fn suggestion_data(suggestion: Option<&str>) -> Option<serde_json::Value> {
    suggestion.map(|s| serde_json::json!({ "suggestion": s }))
}

/// Convert StatsError to MCP ErrorData for semantic error categorization.
impl From<StatsError> for rmcp::ErrorData {
    fn from(err: StatsError) -> Self {
        match &err {
            StatsError::InvalidInput { field, .. } => rmcp::ErrorData::invalid_params(
                err.to_string(),
                Some(serde_json::json!({ "field": field })),
            ),

            StatsError::Database {
                message,
                sql_state,
                suggestion,
            } => {
                let msg = match sql_state {
                    Some(code) => format!("{} (SQLSTATE: {})", message, code),
                    None => message.clone(),
                };
                rmcp::ErrorData::invalid_params(msg, suggestion_data(Some(suggestion)))
            }

            StatsError::Connection { .. } => {
                rmcp::ErrorData::internal_error(err.to_string(), suggestion_data(err.suggestion()))
            }
            StatsError::Timeout { .. } => rmcp::ErrorData::internal_error(
                err.to_string(),
                suggestion_data(Some("The database is busy; try the call again")),
            ),
            StatsError::Internal { .. } => {
                rmcp::ErrorData::internal_error(err.to_string(), None)
            }
        }
    }
}

/// HTTP mapping for the stats endpoint: validation failures are the client's
/// fault (400), everything else is a server error.
impl IntoResponse for StatsError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match self.field() {
            Some(field) => serde_json::json!({ "error": self.to_string(), "field": field }),
            None => serde_json::json!({ "error": self.to_string() }),
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_field() {
        let err = StatsError::invalid_input("stat_type", "expected one of passing, rushing");
        assert_eq!(
            err.to_string(),
            "Invalid input for 'stat_type': expected one of passing, rushing"
        );
        assert_eq!(err.field(), Some("stat_type"));
    }

    #[test]
    fn test_error_suggestion() {
        let err = StatsError::database("no such table", Some("1".to_string()), "Check schema");
        assert_eq!(err.suggestion(), Some("Check schema"));
        assert_eq!(StatsError::internal("x").suggestion(), None);
    }

    #[test]
    fn test_invalid_input_maps_to_invalid_params() {
        let err = StatsError::invalid_input("limit", "bad");
        let mcp_err: rmcp::ErrorData = err.into();
        assert_eq!(mcp_err.code.0, -32602);
        assert_eq!(mcp_err.data.unwrap()["field"], "limit");
    }

    #[test]
    fn test_database_error_includes_sql_state() {
        let err = StatsError::database("syntax error", Some("1".to_string()), "check syntax");
        let mcp_err: rmcp::ErrorData = err.into();
        assert_eq!(mcp_err.code.0, -32602);
        assert!(mcp_err.message.contains("SQLSTATE: 1"));
        assert_eq!(mcp_err.data.unwrap()["suggestion"], "check syntax");
    }

    #[test]
    fn test_connection_maps_to_internal_error() {
        let err = StatsError::connection("failed", "check the file");
        let mcp_err: rmcp::ErrorData = err.into();
        assert_eq!(mcp_err.code.0, -32603);
    }

    #[test]
    fn test_timeout_maps_to_internal_error() {
        let mcp_err: rmcp::ErrorData = StatsError::timeout("pool", 30).into();
        assert_eq!(mcp_err.code.0, -32603);
    }

    #[test]
    fn test_pool_timeout_names_no_fixed_duration() {
        let err = StatsError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StatsError::Connection { .. }));
        assert!(err.to_string().contains("pooled connection"));
    }

    #[test]
    fn test_http_status_mapping() {
        let resp = StatsError::invalid_input("scope", "unknown").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = StatsError::internal("boom").into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
