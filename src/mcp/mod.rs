//! MCP server integration module.
//!
//! This module connects the MCP protocol to the stats tool handlers using
//! the rmcp framework.

pub mod service;

pub use service::StatsService;
