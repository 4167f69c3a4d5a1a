//! Built statements and the guard every statement passes before execution.
//!
//! A [`Statement`] pairs SQL text with its bound parameters. Before it
//! reaches the driver it must
//! - parse as exactly one read-only query (sqlparser, SQLite dialect), and
//! - contain exactly as many `?` placeholders as it has parameters.
//!
//! Either failure is an internal error: it means a query builder produced
//! something it should not have, never that a caller sent bad input.

use crate::error::{StatsError, StatsResult};
use crate::models::SqlParam;
use sqlparser::ast::Statement as SqlStatement;
use sqlparser::dialect::SQLiteDialect;
use sqlparser::parser::Parser;

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<SqlParam>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    /// Run the placeholder and read-only checks.
    pub fn validate(&self) -> StatsResult<()> {
        validate(&self.sql, &self.params)
    }
}

/// Check a raw SQL string and its parameters.
pub fn validate(sql: &str, params: &[SqlParam]) -> StatsResult<()> {
    let placeholders = count_placeholders(sql);
    if placeholders != params.len() {
        return Err(StatsError::internal(format!(
            "Statement has {} placeholder(s) but {} bound parameter(s)",
            placeholders,
            params.len()
        )));
    }
    ensure_read_only(sql)
}

/// Count `?` placeholders outside of quoted literals and identifiers.
pub fn count_placeholders(sql: &str) -> usize {
    let mut count = 0;
    let mut quote: Option<char> = None;

    for c in sql.chars() {
        match quote {
            // A doubled quote ('') toggles out and straight back in, which
            // leaves the count unaffected.
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' | '`' => quote = Some(c),
                '?' => count += 1,
                _ => {}
            },
        }
    }

    count
}

/// Reject anything that is not a single SELECT / WITH query.
pub fn ensure_read_only(sql: &str) -> StatsResult<()> {
    let statements = Parser::parse_sql(&SQLiteDialect {}, sql)
        .map_err(|e| StatsError::internal(format!("Failed to parse SQL statement: {}", e)))?;

    match statements.as_slice() {
        [SqlStatement::Query(_)] => Ok(()),
        [] => Err(StatsError::internal("Empty SQL statement")),
        [_] => Err(StatsError::internal(
            "Only read-only queries may run against the stats store",
        )),
        _ => Err(StatsError::internal(format!(
            "Expected a single statement, found {}",
            statements.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_placeholders_ignores_literals() {
        assert_eq!(count_placeholders("SELECT 1"), 0);
        assert_eq!(count_placeholders("SELECT * FROM games WHERE season = ?"), 1);
        assert_eq!(
            count_placeholders("SELECT '?' AS q, \"a?\" FROM games WHERE season = ? LIMIT ?"),
            2
        );
        assert_eq!(count_placeholders("SELECT 'it''s ?' WHERE x = ?"), 1);
    }

    #[test]
    fn test_validate_accepts_matching_params() {
        let stmt = Statement::new(
            "SELECT g.game_id FROM games g WHERE g.season = ? LIMIT ?",
            vec![SqlParam::Int(2009), SqlParam::Int(5)],
        );
        assert!(stmt.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unbound_placeholder() {
        let err = validate("SELECT g.game_id FROM games g WHERE g.season = ?", &[]).unwrap_err();
        assert!(matches!(err, StatsError::Internal { .. }));
        assert!(err.to_string().contains("1 placeholder(s) but 0"));
    }

    #[test]
    fn test_validate_rejects_extra_params() {
        let err = validate("SELECT 1", &[SqlParam::Int(1)]).unwrap_err();
        assert!(err.to_string().contains("0 placeholder(s) but 1"));
    }

    #[test]
    fn test_read_only_accepts_cte() {
        let sql = "WITH t AS (SELECT s.player_id FROM player_sacks s) SELECT t.player_id FROM t";
        assert!(ensure_read_only(sql).is_ok());
    }

    #[test]
    fn test_read_only_rejects_writes() {
        assert!(ensure_read_only("DELETE FROM games").is_err());
        assert!(ensure_read_only("DROP TABLE players").is_err());
        assert!(ensure_read_only("SELECT 1; DELETE FROM games").is_err());
    }
}
