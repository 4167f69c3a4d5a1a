//! Player lookup tools: `search_players` and `query_player_bio`.

use crate::db::Database;
use crate::error::{StatsError, StatsResult};
use crate::models::DEFAULT_ROW_LIMIT;
use crate::stats::players::{self, PlayerBio, PlayerRef};
use crate::tools::format::{OutputFormat, RowsOutput};
use crate::tools::validate;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Input for the search_players tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchPlayersInput {
    /// Name or part of a name, e.g. "Brees"
    pub name: String,
    /// Position abbreviation, e.g. "QB"
    #[serde(default)]
    pub position: Option<String>,
    /// Maximum rows to return. Default: 20, max: 500
    #[serde(default)]
    pub limit: Option<u32>,
    /// Output format: "json" (default), "table" or "markdown"
    #[serde(default)]
    #[schemars(extend("enum" = ["json", "table", "markdown", null]))]
    pub format: Option<String>,
}

/// Input for the query_player_bio tool. Give player_id or player_name.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct QueryPlayerBioInput {
    /// Player identifier from search_players. Takes precedence over player_name.
    #[serde(default)]
    pub player_id: Option<String>,
    /// Player name; an exact match is preferred over a partial one
    #[serde(default)]
    pub player_name: Option<String>,
}

impl QueryPlayerBioInput {
    fn player_ref(&self) -> StatsResult<PlayerRef> {
        if let Some(id) = validate::optional_text(self.player_id.as_deref()) {
            return Ok(PlayerRef::Id(id));
        }
        validate::optional_text(self.player_name.as_deref())
            .map(PlayerRef::Name)
            .ok_or_else(|| {
                StatsError::invalid_input("player_name", "either player_id or player_name is required")
            })
    }
}

pub struct PlayerToolHandler {
    db: Arc<Database>,
}

impl PlayerToolHandler {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn search(&self, input: SearchPlayersInput) -> StatsResult<RowsOutput> {
        let name = validate::required_text("name", &input.name)?;
        let position = validate::optional_text(input.position.as_deref());
        let format = validate::parse_opt_enum::<OutputFormat>("format", input.format.as_deref())?
            .unwrap_or_default();
        let (limit, warning) = validate::limit("search_players", input.limit, DEFAULT_ROW_LIMIT);

        let rows = players::search_players(&self.db, &name, position.as_deref(), limit).await?;

        info!(tool = "search_players", row_count = rows.len(), "Players searched");
        Ok(RowsOutput::new(rows, format, warning))
    }

    pub async fn bio(&self, input: QueryPlayerBioInput) -> StatsResult<PlayerBio> {
        let player = input.player_ref()?;
        let bio = players::player_bio(&self.db, &player).await?;

        info!(
            tool = "query_player_bio",
            found = bio.found,
            seasons = bio.seasons.len(),
            "Player bio fetched"
        );
        Ok(bio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_ref_prefers_id() {
        let input = QueryPlayerBioInput {
            player_id: Some("BreeDr00".to_string()),
            player_name: Some("Drew Brees".to_string()),
        };
        assert_eq!(input.player_ref().unwrap(), PlayerRef::Id("BreeDr00".to_string()));
    }

    #[test]
    fn test_player_ref_falls_back_to_name() {
        let input = QueryPlayerBioInput {
            player_id: Some("  ".to_string()),
            player_name: Some(" Drew Brees ".to_string()),
        };
        assert_eq!(
            input.player_ref().unwrap(),
            PlayerRef::Name("Drew Brees".to_string())
        );
    }

    #[test]
    fn test_player_ref_requires_one() {
        let err = QueryPlayerBioInput::default().player_ref().unwrap_err();
        assert_eq!(err.field(), Some("player_name"));
    }
}
