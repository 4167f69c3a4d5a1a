//! `query_leaderboards` tool.

use crate::db::Database;
use crate::error::StatsResult;
use crate::models::{Scope, StatCategory};
use crate::stats::{columns, leaderboards};
use crate::tools::format::{OutputFormat, RowsOutput};
use crate::tools::validate;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 10;

/// Input for the query_leaderboards tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueryLeaderboardsInput {
    /// "passing", "rushing", "receiving" or "defense"
    #[schemars(extend("enum" = ["passing", "rushing", "receiving", "defense"]))]
    pub stat_type: String,
    /// "career" (default), "season" or "game"
    #[serde(default)]
    #[schemars(extend("enum" = ["career", "season", "game", null]))]
    pub scope: Option<String>,
    /// Column to rank by, descending. Defaults to "yds" ("tackles" for defense).
    /// Passing: games, com, att, pct, yds, td, int_thrown, lg, sacked, sacked_yds (rtg per game).
    /// Rushing: games, att, yds, avg, td, lg. Receiving: games, tar, rec, yds, avg, td, lg.
    /// Defense: tackles, assists, forced_fumbles, fumble_recoveries, sacks, sack_yds, interceptions, int_yds, int_td.
    #[serde(default)]
    pub sort_by: Option<String>,
    /// Restrict to one season
    #[serde(default)]
    pub season: Option<i64>,
    /// Maximum rows to return. Default: 10, max: 500
    #[serde(default)]
    pub limit: Option<u32>,
    /// Output format: "json" (default), "table" or "markdown"
    #[serde(default)]
    #[schemars(extend("enum" = ["json", "table", "markdown", null]))]
    pub format: Option<String>,
}

pub struct LeaderboardToolHandler {
    db: Arc<Database>,
}

impl LeaderboardToolHandler {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn leaderboards(&self, input: QueryLeaderboardsInput) -> StatsResult<RowsOutput> {
        let category: StatCategory = validate::parse_enum("stat_type", &input.stat_type)?;
        let scope = validate::parse_opt_enum::<Scope>("scope", input.scope.as_deref())?
            .unwrap_or_default();
        let sort = columns::sort_column(category, scope, input.sort_by.as_deref(), "sort_by")?;
        let season = validate::season(input.season)?;
        let format = validate::parse_opt_enum::<OutputFormat>("format", input.format.as_deref())?
            .unwrap_or_default();
        let (limit, warning) = validate::limit(
            "query_leaderboards",
            input.limit,
            DEFAULT_LEADERBOARD_LIMIT,
        );

        let rows = leaderboards::leaderboard(&self.db, category, scope, sort, season, limit).await?;

        info!(
            tool = "query_leaderboards",
            category = %category,
            scope = %scope,
            sort = sort,
            row_count = rows.len(),
            "Leaderboard fetched"
        );
        Ok(RowsOutput::new(rows, format, warning))
    }
}
