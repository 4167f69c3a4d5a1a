//! `query_team_season` tool.

use crate::db::Database;
use crate::error::StatsResult;
use crate::stats::team::{self, TeamSeason};
use crate::tools::validate;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Input for the query_team_season tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct QueryTeamSeasonInput {
    /// Season year. Defaults to the current season (which starts in August).
    #[serde(default)]
    pub season: Option<i64>,
}

pub struct TeamToolHandler {
    db: Arc<Database>,
}

impl TeamToolHandler {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn team_season(&self, input: QueryTeamSeasonInput) -> StatsResult<TeamSeason> {
        let season = validate::season(input.season)?.unwrap_or_else(team::current_season);
        let result = team::team_season(&self.db, season).await?;

        info!(tool = "query_team_season", season = season, "Team season fetched");
        Ok(result)
    }
}
