//! WHERE-clause assembly.
//!
//! Conditions are fixed SQL fragments; caller-supplied values ride along as
//! bound parameters in placeholder order. Nothing a caller types is ever
//! formatted into the SQL text.

use crate::models::{GameTypeFilter, SqlParam};
use crate::stats::franchise;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    conditions: Vec<String>,
    params: Vec<SqlParam>,
}

impl WhereClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition that binds nothing.
    pub fn push(&mut self, condition: impl Into<String>) -> &mut Self {
        self.conditions.push(condition.into());
        self
    }

    /// Add a condition containing exactly one `?` and the value bound to it.
    pub fn push_param(
        &mut self,
        condition: impl Into<String>,
        param: impl Into<SqlParam>,
    ) -> &mut Self {
        self.conditions.push(condition.into());
        self.params.push(param.into());
        self
    }

    /// Like [`push_param`](Self::push_param), skipped when the value is absent.
    pub fn push_opt<T: Into<SqlParam>>(
        &mut self,
        condition: impl Into<String>,
        value: Option<T>,
    ) -> &mut Self {
        if let Some(v) = value {
            self.push_param(condition, v);
        }
        self
    }

    /// Case-insensitive substring match on a text column.
    pub fn push_contains(&mut self, column: &str, text: Option<&str>) -> &mut Self {
        if let Some(text) = text {
            self.push_param(format!("{column} LIKE ?"), SqlParam::contains(text));
        }
        self
    }

    pub fn game_type(&mut self, filter: GameTypeFilter, games_alias: &str) -> &mut Self {
        if let Some(cond) = filter.condition(games_alias) {
            self.push(cond);
        }
        self
    }

    pub fn franchise(&mut self, alias: &str) -> &mut Self {
        self.push(franchise::belongs_to_franchise(alias))
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// `" WHERE a AND b"`, or an empty string when there are no conditions.
    pub fn render(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    pub fn into_params(self) -> Vec<SqlParam> {
        self.params
    }
}
