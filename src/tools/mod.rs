//! MCP tool implementations.
//!
//! Each tool validates its input (failures name the offending field), then
//! calls into the query library:
//! - `games`: `query_games`, `query_game_detail`, `list_seasons`
//! - `player_stats`: `query_player_stats`, `query_game_log`
//! - `leaderboards`: `query_leaderboards`
//! - `team`: `query_team_season`
//! - `players`: `search_players`, `query_player_bio`
//! - `scoring`: `query_scoring`
//! - `records`: `query_records`
//! - `draft`: `query_draft`

pub mod draft;
pub mod format;
pub mod games;
pub mod leaderboards;
pub mod player_stats;
pub mod players;
pub mod records;
pub mod scoring;
pub mod team;
pub mod validate;

pub use draft::{DraftToolHandler, QueryDraftInput};
pub use format::{OutputFormat, RowsOutput};
pub use games::{GamesToolHandler, ListSeasonsInput, QueryGameDetailInput, QueryGamesInput};
pub use leaderboards::{LeaderboardToolHandler, QueryLeaderboardsInput};
pub use player_stats::{PlayerStatsToolHandler, QueryGameLogInput, QueryPlayerStatsInput};
pub use players::{PlayerToolHandler, QueryPlayerBioInput, SearchPlayersInput};
pub use records::{QueryRecordsInput, RecordsToolHandler};
pub use scoring::{QueryScoringInput, ScoringToolHandler};
pub use team::{QueryTeamSeasonInput, TeamToolHandler};
