//! `query_scoring` tool.

use crate::db::Database;
use crate::error::StatsResult;
use crate::stats::scoring::{self, ScoringResult};
use crate::tools::validate;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Input for the query_scoring tool.
///
/// With `game_id` the plays for that game are returned directly. Otherwise
/// the most recent game matching `season` and `opponent` is used.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct QueryScoringInput {
    /// Game identifier from query_games
    #[serde(default)]
    pub game_id: Option<String>,
    /// Season year
    #[serde(default)]
    pub season: Option<i64>,
    /// Opponent name or part of it
    #[serde(default)]
    pub opponent: Option<String>,
}

pub struct ScoringToolHandler {
    db: Arc<Database>,
}

impl ScoringToolHandler {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn scoring(&self, input: QueryScoringInput) -> StatsResult<ScoringResult> {
        let game_id = validate::optional_text(input.game_id.as_deref());
        let season = validate::season(input.season)?;
        let opponent = validate::optional_text(input.opponent.as_deref());

        let result =
            scoring::lookup(&self.db, game_id.as_deref(), season, opponent.as_deref()).await?;

        info!(
            tool = "query_scoring",
            found = result.found,
            game_id = ?result.game_id,
            plays = result.plays.len(),
            "Scoring plays fetched"
        );
        Ok(result)
    }
}
