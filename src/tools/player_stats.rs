//! Player stat tools: `query_player_stats` and `query_game_log`.

use crate::db::Database;
use crate::error::StatsResult;
use crate::models::{Scope, StatCategory};
use crate::stats::player_stats::{self, StatOrder, StatQuery};
use crate::stats::{columns, players};
use crate::tools::format::{OutputFormat, RowsOutput};
use crate::tools::validate;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_PLAYER_STATS_LIMIT: u32 = 50;

/// Input for the query_player_stats tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueryPlayerStatsInput {
    /// Player name or part of it, e.g. "Brees"
    pub player_name: String,
    /// "passing", "rushing", "receiving" or "defense"
    #[schemars(extend("enum" = ["passing", "rushing", "receiving", "defense"]))]
    pub stat_type: String,
    /// Only count this season
    #[serde(default)]
    pub season: Option<i64>,
    /// Sum all regular-season games into one row per player. Takes precedence over by_season.
    #[serde(default)]
    pub career_totals: bool,
    /// One regular-season row per player per season
    #[serde(default)]
    pub by_season: bool,
    /// Maximum rows to return. Default: 50, max: 500
    #[serde(default)]
    pub limit: Option<u32>,
    /// Output format: "json" (default), "table" or "markdown"
    #[serde(default)]
    #[schemars(extend("enum" = ["json", "table", "markdown", null]))]
    pub format: Option<String>,
}

impl QueryPlayerStatsInput {
    /// Career totals win over by-season; neither means game by game.
    pub fn scope(&self) -> Scope {
        if self.career_totals {
            Scope::Career
        } else if self.by_season {
            Scope::Season
        } else {
            Scope::Game
        }
    }
}

/// Input for the query_game_log tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueryGameLogInput {
    /// Player name or part of it
    pub player_name: String,
    /// "passing", "rushing", "receiving" or "defense"
    #[schemars(extend("enum" = ["passing", "rushing", "receiving", "defense"]))]
    pub stat_type: String,
    /// Output format: "json" (default), "table" or "markdown"
    #[serde(default)]
    #[schemars(extend("enum" = ["json", "table", "markdown", null]))]
    pub format: Option<String>,
}

pub struct PlayerStatsToolHandler {
    db: Arc<Database>,
}

impl PlayerStatsToolHandler {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn player_stats(&self, input: QueryPlayerStatsInput) -> StatsResult<RowsOutput> {
        let player_name = validate::required_text("player_name", &input.player_name)?;
        let category: StatCategory = validate::parse_enum("stat_type", &input.stat_type)?;
        let season = validate::season(input.season)?;
        let format = validate::parse_opt_enum::<OutputFormat>("format", input.format.as_deref())?
            .unwrap_or_default();
        let (limit, warning) = validate::limit(
            "query_player_stats",
            input.limit,
            DEFAULT_PLAYER_STATS_LIMIT,
        );

        let scope = input.scope();
        let order = match scope {
            Scope::Career => StatOrder::Descending(columns::default_sort(category)),
            Scope::Season => StatOrder::SeasonAscending,
            Scope::Game => StatOrder::DateDescending,
        };
        let q = StatQuery::new(category, scope)
            .player(player_name)
            .season(season)
            .order(order)
            .limit(limit);

        let rows = player_stats::player_stats(&self.db, &q).await?;

        info!(
            tool = "query_player_stats",
            category = %category,
            scope = %scope,
            row_count = rows.len(),
            "Player stats fetched"
        );
        Ok(RowsOutput::new(rows, format, warning))
    }

    pub async fn game_log(&self, input: QueryGameLogInput) -> StatsResult<RowsOutput> {
        let player_name = validate::required_text("player_name", &input.player_name)?;
        let category: StatCategory = validate::parse_enum("stat_type", &input.stat_type)?;
        let format = validate::parse_opt_enum::<OutputFormat>("format", input.format.as_deref())?
            .unwrap_or_default();

        let rows = players::game_log(&self.db, &player_name, category).await?;

        info!(
            tool = "query_game_log",
            category = %category,
            row_count = rows.len(),
            "Game log fetched"
        );
        Ok(RowsOutput::new(rows, format, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(json: &str) -> QueryPlayerStatsInput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_scope_precedence() {
        let base = r#""player_name": "Brees", "stat_type": "passing""#;
        assert_eq!(input(&format!("{{{base}}}")).scope(), Scope::Game);
        assert_eq!(
            input(&format!(r#"{{{base}, "by_season": true}}"#)).scope(),
            Scope::Season
        );
        assert_eq!(
            input(&format!(r#"{{{base}, "by_season": true, "career_totals": true}}"#)).scope(),
            Scope::Career
        );
    }

    #[test]
    fn test_required_fields() {
        assert!(serde_json::from_str::<QueryPlayerStatsInput>(r#"{"stat_type": "passing"}"#).is_err());
        assert!(serde_json::from_str::<QueryGameLogInput>(r#"{"player_name": "Brees"}"#).is_err());
    }
}
