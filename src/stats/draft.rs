//! Draft history.

use crate::db::{Database, Statement};
use crate::error::StatsResult;
use crate::models::{Row, SqlParam};
use crate::stats::filter::WhereClause;

pub fn draft_picks_statement(season: Option<i64>, round: Option<i64>, limit: u32) -> Statement {
    let mut w = WhereClause::new();
    w.push_opt("d.season = ?", season).push_opt("d.round = ?", round);

    let sql = format!(
        "SELECT d.season, d.round, d.pick, d.overall, d.player_id, d.player_name, d.position, \
         d.college FROM draft_picks d{} ORDER BY d.season DESC, d.round ASC, d.pick ASC LIMIT ?",
        w.render()
    );
    let mut params = w.into_params();
    params.push(SqlParam::from(limit));
    Statement::new(sql, params)
}

/// Picks newest class first, then in draft order within a class.
pub async fn draft_picks(
    db: &Database,
    season: Option<i64>,
    round: Option<i64>,
    limit: u32,
) -> StatsResult<Vec<Row>> {
    db.fetch(&draft_picks_statement(season, round, limit)).await
}
