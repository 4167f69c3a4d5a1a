//! Saints Encyclopedia
//!
//! Historical New Orleans Saints statistics from a read-only SQLite store,
//! served as MCP tools for AI assistants and as a JSON endpoint for the
//! stats pages.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod stats;
pub mod tools;
pub mod transport;

pub use config::Config;
pub use db::Database;
pub use error::StatsError;
pub use mcp::StatsService;
