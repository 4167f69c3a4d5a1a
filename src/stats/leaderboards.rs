//! Franchise leaderboards.

use crate::db::{Database, Statement};
use crate::error::StatsResult;
use crate::models::{GameTypeFilter, Row, Scope, SqlParam, StatCategory};
use crate::stats::filter::WhereClause;
use crate::stats::player_stats::{self, GAME_CONTEXT, StatOrder, StatQuery};

/// Top rows for a category, ordered by `sort` descending. Regular season
/// only, at every scope.
///
/// Ties keep whatever order the store returns them in.
pub fn leaderboard_query(
    category: StatCategory,
    scope: Scope,
    sort: &'static str,
    season: Option<i64>,
    limit: u32,
) -> StatQuery {
    StatQuery::new(category, scope)
        .game_types(GameTypeFilter::RegularOnly)
        .season(season)
        .order(StatOrder::Descending(sort))
        .limit(limit)
}

pub async fn leaderboard(
    db: &Database,
    category: StatCategory,
    scope: Scope,
    sort: &'static str,
    season: Option<i64>,
    limit: u32,
) -> StatsResult<Vec<Row>> {
    let q = leaderboard_query(category, scope, sort, season, limit);
    player_stats::player_stats(db, &q).await
}

/// Single-game sack lines, most sacks first.
pub fn single_game_sacks_statement(game_types: GameTypeFilter, limit: u32) -> Statement {
    let mut w = WhereClause::new();
    w.franchise("s").game_type(game_types, "g");

    let sql = format!(
        "SELECT p.player_id AS player_id, p.player_name AS player_name, p.position AS position, \
         {}, s.sacks AS sacks, s.yds AS sack_yds \
         FROM player_sacks s \
         JOIN games g ON g.game_id = s.game_id \
         JOIN players p ON p.player_id = s.player_id{} \
         ORDER BY sacks DESC LIMIT ?",
        GAME_CONTEXT.join(", "),
        w.render()
    );

    let mut params = w.into_params();
    params.push(SqlParam::from(limit));
    Statement::new(sql, params)
}

pub async fn single_game_sacks(
    db: &Database,
    game_types: GameTypeFilter,
    limit: u32,
) -> StatsResult<Vec<Row>> {
    db.fetch(&single_game_sacks_statement(game_types, limit)).await
}
