//! `query_records` tool.

use crate::db::Database;
use crate::error::StatsResult;
use crate::models::Scope;
use crate::stats::records::{self, RecordCategory};
use crate::tools::format::{OutputFormat, RowsOutput};
use crate::tools::validate;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_RECORDS_LIMIT: u32 = 10;

/// Input for the query_records tool. Records count regular-season games only.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueryRecordsInput {
    /// "passing", "rushing", "receiving", "defense" or "team"
    #[schemars(extend("enum" = ["passing", "rushing", "receiving", "defense", "team"]))]
    pub category: String,
    /// "career" (default), "season" or "game". Team records support season and game.
    #[serde(default)]
    #[schemars(extend("enum" = ["career", "season", "game", null]))]
    pub record_type: Option<String>,
    /// Stat to rank by. Player categories use the same columns as query_leaderboards.
    /// Team game: saints_score, opponent_score, margin. Team season: wins, losses,
    /// points_for, points_against, point_differential.
    #[serde(default)]
    pub stat: Option<String>,
    /// Maximum rows to return. Default: 10, max: 500
    #[serde(default)]
    pub limit: Option<u32>,
    /// Output format: "json" (default), "table" or "markdown"
    #[serde(default)]
    #[schemars(extend("enum" = ["json", "table", "markdown", null]))]
    pub format: Option<String>,
}

pub struct RecordsToolHandler {
    db: Arc<Database>,
}

impl RecordsToolHandler {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn records(&self, input: QueryRecordsInput) -> StatsResult<RowsOutput> {
        let category: RecordCategory = validate::parse_enum("category", &input.category)?;
        let scope = validate::parse_opt_enum::<Scope>("record_type", input.record_type.as_deref())?
            .unwrap_or_default();
        let format = validate::parse_opt_enum::<OutputFormat>("format", input.format.as_deref())?
            .unwrap_or_default();
        let (limit, warning) =
            validate::limit("query_records", input.limit, DEFAULT_RECORDS_LIMIT);

        let rows =
            records::records(&self.db, category, scope, input.stat.as_deref(), limit).await?;

        info!(
            tool = "query_records",
            category = ?category,
            record_type = %scope,
            row_count = rows.len(),
            "Records fetched"
        );
        Ok(RowsOutput::new(rows, format, warning))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_choices_parse() {
        let categories = validate::schema_choices::<QueryRecordsInput>("category");
        assert_eq!(categories.len(), 5);
        for choice in &categories {
            assert!(choice.parse::<RecordCategory>().is_ok(), "{choice}");
        }
        for choice in validate::schema_choices::<QueryRecordsInput>("record_type") {
            assert!(choice.parse::<Scope>().is_ok(), "{choice}");
        }
    }
}
