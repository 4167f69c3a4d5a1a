//! Database access layer.
//!
//! - Lazily created, read-only SQLite pool
//! - Statement guard (single read-only query, placeholders match parameters)
//! - Parameter binding and row-to-JSON decoding

pub mod client;
pub mod params;
pub mod statement;
pub mod types;

pub use client::Database;
pub use statement::Statement;
pub use types::RowToJson;
