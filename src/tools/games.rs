//! Game tools: `query_games`, `query_game_detail`, `list_seasons`.

use crate::db::Database;
use crate::error::StatsResult;
use crate::models::{DEFAULT_ROW_LIMIT, GameType, HomeAway, Outcome};
use crate::stats::games::{self, GameDetail, GameFilter};
use crate::tools::format::{OutputFormat, RowsOutput};
use crate::tools::validate;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Input for the query_games tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct QueryGamesInput {
    /// Season year, e.g. 2009
    #[serde(default)]
    pub season: Option<i64>,
    /// Opponent name or part of it, e.g. "Falcons"
    #[serde(default)]
    pub opponent: Option<String>,
    /// "regular", "playoff" or "preseason". Omit for all game types.
    #[serde(default)]
    #[schemars(extend("enum" = ["regular", "playoff", "preseason", null]))]
    pub game_type: Option<String>,
    /// "W", "L" or "T"
    #[serde(default)]
    #[schemars(extend("enum" = ["W", "L", "T", null]))]
    pub result: Option<String>,
    /// "home" or "away"
    #[serde(default)]
    #[schemars(extend("enum" = ["home", "away", null]))]
    pub home_away: Option<String>,
    /// Maximum rows to return. Default: 20, max: 500
    #[serde(default)]
    pub limit: Option<u32>,
    /// Output format: "json" (default), "table" or "markdown"
    #[serde(default)]
    #[schemars(extend("enum" = ["json", "table", "markdown", null]))]
    pub format: Option<String>,
}

/// Input for the query_game_detail tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueryGameDetailInput {
    /// Game identifier, as returned by query_games
    pub game_id: String,
}

/// Input for the list_seasons tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListSeasonsInput {
    /// Output format: "json" (default), "table" or "markdown"
    #[serde(default)]
    #[schemars(extend("enum" = ["json", "table", "markdown", null]))]
    pub format: Option<String>,
}

pub struct GamesToolHandler {
    db: Arc<Database>,
}

impl GamesToolHandler {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Games matching the filters, most recent first. No game type is
    /// excluded unless `game_type` asks for one.
    pub async fn query_games(&self, input: QueryGamesInput) -> StatsResult<RowsOutput> {
        let filter = GameFilter {
            season: validate::season(input.season)?,
            opponent: validate::optional_text(input.opponent.as_deref()),
            game_type: validate::parse_opt_enum::<GameType>(
                "game_type",
                input.game_type.as_deref(),
            )?,
            result: validate::parse_opt_enum::<Outcome>("result", input.result.as_deref())?,
            home_away: validate::parse_opt_enum::<HomeAway>(
                "home_away",
                input.home_away.as_deref(),
            )?,
        };
        let format = validate::parse_opt_enum::<OutputFormat>("format", input.format.as_deref())?
            .unwrap_or_default();
        let (limit, warning) = validate::limit("query_games", input.limit, DEFAULT_ROW_LIMIT);

        let rows = games::list_games(&self.db, &filter, limit).await?;

        info!(tool = "query_games", row_count = rows.len(), limit = limit, "Games listed");
        Ok(RowsOutput::new(rows, format, warning))
    }

    pub async fn game_detail(&self, input: QueryGameDetailInput) -> StatsResult<GameDetail> {
        let game_id = validate::required_text("game_id", &input.game_id)?;
        let detail = games::game_detail(&self.db, &game_id).await?;

        info!(
            tool = "query_game_detail",
            game_id = %game_id,
            found = detail.found,
            scoring_plays = detail.scoring_plays.len(),
            "Game detail fetched"
        );
        Ok(detail)
    }

    pub async fn list_seasons(&self, input: ListSeasonsInput) -> StatsResult<RowsOutput> {
        let format = validate::parse_opt_enum::<OutputFormat>("format", input.format.as_deref())?
            .unwrap_or_default();
        let rows = games::season_summaries(&self.db).await?;

        info!(tool = "list_seasons", row_count = rows.len(), "Seasons listed");
        Ok(RowsOutput::new(rows, format, None))
    }
}
