//! MCP service implementation using rmcp.
//!
//! `StatsService` exposes the stats tools over the MCP protocol using the
//! rmcp framework's macros. Every tool shares one lazily-connected
//! [`Database`].

use crate::db::Database;
use crate::stats::{GameDetail, PlayerBio, ScoringResult, TeamSeason};
use crate::tools::{
    DraftToolHandler, GamesToolHandler, LeaderboardToolHandler, ListSeasonsInput,
    PlayerStatsToolHandler, PlayerToolHandler, QueryDraftInput, QueryGameDetailInput,
    QueryGameLogInput, QueryGamesInput, QueryLeaderboardsInput, QueryPlayerBioInput,
    QueryPlayerStatsInput, QueryRecordsInput, QueryScoringInput, QueryTeamSeasonInput,
    RecordsToolHandler, RowsOutput, ScoringToolHandler, SearchPlayersInput, TeamToolHandler,
};
use rmcp::Json;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct StatsService {
    /// Shared read-only database client
    db: Arc<Database>,
    /// Tool router for MCP tool dispatch (auto-generated)
    tool_router: ToolRouter<Self>,
}

impl StatsService {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl StatsService {
    #[tool(
        description = "List games, most recent first.\nFilter by season, opponent (partial name), game_type (regular/playoff/preseason), result (W/L/T) and home_away.\nAll game types are included unless game_type is given."
    )]
    async fn query_games(
        &self,
        Parameters(input): Parameters<QueryGamesInput>,
    ) -> Result<Json<RowsOutput>, McpError> {
        let handler = GamesToolHandler::new(self.db.clone());
        handler.query_games(input).await.map(Json).map_err(Into::into)
    }

    #[tool(
        description = "Stats for a player by name (partial match) in one category: passing, rushing, receiving or defense.\ncareer_totals=true sums regular-season games per player; by_season=true gives one regular-season row per season; otherwise one row per game (all game types), newest first."
    )]
    async fn query_player_stats(
        &self,
        Parameters(input): Parameters<QueryPlayerStatsInput>,
    ) -> Result<Json<RowsOutput>, McpError> {
        let handler = PlayerStatsToolHandler::new(self.db.clone());
        handler.player_stats(input).await.map(Json).map_err(Into::into)
    }

    #[tool(
        description = "Franchise leaders in a stat category, regular season only.\nscope: career (default), season or game. sort_by picks the ranking column (descending); ties have no guaranteed order."
    )]
    async fn query_leaderboards(
        &self,
        Parameters(input): Parameters<QueryLeaderboardsInput>,
    ) -> Result<Json<RowsOutput>, McpError> {
        let handler = LeaderboardToolHandler::new(self.db.clone());
        handler.leaderboards(input).await.map(Json).map_err(Into::into)
    }

    #[tool(
        description = "Team record and summed team stats for a season.\nRecord counts regular-season games; stats include playoffs but not preseason. Defaults to the current season."
    )]
    async fn query_team_season(
        &self,
        Parameters(input): Parameters<QueryTeamSeasonInput>,
    ) -> Result<Json<TeamSeason>, McpError> {
        let handler = TeamToolHandler::new(self.db.clone());
        handler.team_season(input).await.map(Json).map_err(Into::into)
    }

    #[tool(description = "Find players by partial name, optionally filtered by position.")]
    async fn search_players(
        &self,
        Parameters(input): Parameters<SearchPlayersInput>,
    ) -> Result<Json<RowsOutput>, McpError> {
        let handler = PlayerToolHandler::new(self.db.clone());
        handler.search(input).await.map(Json).map_err(Into::into)
    }

    #[tool(
        description = "Player biography: position, college, measurements, draft selection and the seasons played for the franchise.\nGive player_id (from search_players) or player_name."
    )]
    async fn query_player_bio(
        &self,
        Parameters(input): Parameters<QueryPlayerBioInput>,
    ) -> Result<Json<PlayerBio>, McpError> {
        let handler = PlayerToolHandler::new(self.db.clone());
        handler.bio(input).await.map(Json).map_err(Into::into)
    }

    #[tool(
        description = "Scoring plays for a game in order.\nGive game_id, or season and/or opponent to use the most recent matching game.\nfound=false means no game matched; a game without scoring plays returns an empty list."
    )]
    async fn query_scoring(
        &self,
        Parameters(input): Parameters<QueryScoringInput>,
    ) -> Result<Json<ScoringResult>, McpError> {
        let handler = ScoringToolHandler::new(self.db.clone());
        handler.scoring(input).await.map(Json).map_err(Into::into)
    }

    #[tool(
        description = "Franchise record book (regular season only).\ncategory: passing, rushing, receiving, defense or team. record_type: career, season or game (team: season or game)."
    )]
    async fn query_records(
        &self,
        Parameters(input): Parameters<QueryRecordsInput>,
    ) -> Result<Json<RowsOutput>, McpError> {
        let handler = RecordsToolHandler::new(self.db.clone());
        handler.records(input).await.map(Json).map_err(Into::into)
    }

    #[tool(
        description = "Full detail for one game: result, both teams' totals, scoring plays and box scores for passing, rushing, receiving and defense."
    )]
    async fn query_game_detail(
        &self,
        Parameters(input): Parameters<QueryGameDetailInput>,
    ) -> Result<Json<GameDetail>, McpError> {
        let handler = GamesToolHandler::new(self.db.clone());
        handler.game_detail(input).await.map(Json).map_err(Into::into)
    }

    #[tool(
        description = "Every season with regular-season record, points for and against, and playoff wins and losses. Newest first."
    )]
    async fn list_seasons(
        &self,
        Parameters(input): Parameters<ListSeasonsInput>,
    ) -> Result<Json<RowsOutput>, McpError> {
        let handler = GamesToolHandler::new(self.db.clone());
        handler.list_seasons(input).await.map(Json).map_err(Into::into)
    }

    #[tool(
        description = "Game-by-game log for a player in one category, oldest first. Includes playoffs, excludes preseason."
    )]
    async fn query_game_log(
        &self,
        Parameters(input): Parameters<QueryGameLogInput>,
    ) -> Result<Json<RowsOutput>, McpError> {
        let handler = PlayerStatsToolHandler::new(self.db.clone());
        handler.game_log(input).await.map(Json).map_err(Into::into)
    }

    #[tool(description = "Draft picks, newest class first, optionally filtered by season and round.")]
    async fn query_draft(
        &self,
        Parameters(input): Parameters<QueryDraftInput>,
    ) -> Result<Json<RowsOutput>, McpError> {
        let handler = DraftToolHandler::new(self.db.clone());
        handler.draft(input).await.map(Json).map_err(Into::into)
    }
}

#[tool_handler]
impl ServerHandler for StatsService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "saints-encyclopedia".to_owned(),
                title: Some("Saints Encyclopedia".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Historical statistics for the New Orleans Saints: games, players, team seasons, scoring plays, records and the draft.\n\
                \n\
                ## Workflow\n\
                1. Use `search_players` to find a player, then `query_player_stats`, `query_game_log` or `query_player_bio`\n\
                2. Use `query_games` to find a game, then `query_game_detail` or `query_scoring` with its `game_id`\n\
                3. Use `query_leaderboards` and `query_records` for rankings; `list_seasons` and `query_team_season` for team results\n\
                \n\
                ## Game types\n\
                - Career and season totals, leaderboards and records count regular-season games only\n\
                - Game-by-game stats from `query_player_stats` include every game type\n\
                - Game logs and team-season stats leave out preseason\n\
                \n\
                ## Team attribution\n\
                A stat line belongs to the Saints when its team name contains \"Saints\" or \"New Orleans\".\n\
                \n\
                ## Output\n\
                List tools accept `format`: json (default), table or markdown, and `limit` (max 500)."
                    .to_string(),
            ),
        }
    }
}
