//! Data models for the Saints encyclopedia server.
//!
//! This module re-exports the model types shared by the query library and
//! the tool layer.

pub mod query;
pub mod stat;

pub use query::{DEFAULT_ROW_LIMIT, MAX_ROW_LIMIT, Row, SqlParam, effective_limit};
pub use stat::{
    GameType, GameTypeFilter, HomeAway, Outcome, Scope, StatCategory, UnknownVariant,
};
