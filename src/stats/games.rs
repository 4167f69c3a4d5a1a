//! Game lookups: schedules, results, season summaries and box scores.

use crate::db::{Database, Statement};
use crate::error::StatsResult;
use crate::models::{GameType, HomeAway, Outcome, Row, Scope, SqlParam, StatCategory};
use crate::stats::columns;
use crate::stats::filter::WhereClause;
use crate::stats::franchise::belongs_to_franchise;
use crate::stats::scoring;
use schemars::JsonSchema;
use serde::Serialize;

const GAME_COLUMNS: &str = "g.game_id, g.season, g.game_date, g.day_of_week, g.game_type, \
     g.opponent, g.home_away, g.saints_score, g.opponent_score, g.result, g.venue, g.attendance";

/// Optional filters for a game listing. Every field narrows the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameFilter {
    pub season: Option<i64>,
    /// Substring of the opponent's name.
    pub opponent: Option<String>,
    pub game_type: Option<GameType>,
    pub result: Option<Outcome>,
    pub home_away: Option<HomeAway>,
}

impl GameFilter {
    fn where_clause(&self) -> WhereClause {
        let mut w = WhereClause::new();
        w.push_opt("g.season = ?", self.season)
            .push_contains("g.opponent", self.opponent.as_deref())
            .push_opt("g.game_type = ?", self.game_type.map(|t| t.as_str()))
            .push_opt("g.result = ?", self.result.map(|r| r.code()))
            .push_opt("g.home_away = ?", self.home_away.map(|h| h.as_str()));
        w
    }
}

/// Games matching the filter, most recent first.
pub fn list_games_statement(filter: &GameFilter, limit: u32) -> Statement {
    let w = filter.where_clause();
    let sql = format!(
        "SELECT {GAME_COLUMNS} FROM games g{} ORDER BY g.game_date DESC LIMIT ?",
        w.render()
    );
    let mut params = w.into_params();
    params.push(SqlParam::from(limit));
    Statement::new(sql, params)
}

pub async fn list_games(db: &Database, filter: &GameFilter, limit: u32) -> StatsResult<Vec<Row>> {
    db.fetch(&list_games_statement(filter, limit)).await
}

pub async fn get_game(db: &Database, game_id: &str) -> StatsResult<Option<Row>> {
    db.query_one(
        &format!("SELECT {GAME_COLUMNS} FROM games g WHERE g.game_id = ?"),
        &[SqlParam::from(game_id)],
    )
    .await
}

/// The most recent game matching an optional season and opponent.
pub async fn latest_game(
    db: &Database,
    season: Option<i64>,
    opponent: Option<&str>,
) -> StatsResult<Option<Row>> {
    let mut w = WhereClause::new();
    w.push_opt("g.season = ?", season).push_contains("g.opponent", opponent);
    let sql = format!(
        "SELECT {GAME_COLUMNS} FROM games g{} ORDER BY g.game_date DESC LIMIT 1",
        w.render()
    );
    db.query_one(&sql, w.params()).await
}

/// A season's schedule in date order.
pub async fn season_games(db: &Database, season: i64) -> StatsResult<Vec<Row>> {
    db.query(
        &format!("SELECT {GAME_COLUMNS} FROM games g WHERE g.season = ? ORDER BY g.game_date ASC"),
        &[SqlParam::Int(season)],
    )
    .await
}

/// One row per season: regular-season record and points, plus playoff
/// wins and losses. Preseason games are left out entirely.
pub const SEASON_SUMMARIES_SQL: &str = "SELECT g.season AS season, \
     SUM(CASE WHEN g.game_type = 'regular' AND g.result = 'W' THEN 1 ELSE 0 END) AS wins, \
     SUM(CASE WHEN g.game_type = 'regular' AND g.result = 'L' THEN 1 ELSE 0 END) AS losses, \
     SUM(CASE WHEN g.game_type = 'regular' AND g.result = 'T' THEN 1 ELSE 0 END) AS ties, \
     SUM(CASE WHEN g.game_type = 'regular' THEN g.saints_score ELSE 0 END) AS points_for, \
     SUM(CASE WHEN g.game_type = 'regular' THEN g.opponent_score ELSE 0 END) AS points_against, \
     SUM(CASE WHEN g.game_type = 'playoff' AND g.result = 'W' THEN 1 ELSE 0 END) AS playoff_wins, \
     SUM(CASE WHEN g.game_type = 'playoff' AND g.result = 'L' THEN 1 ELSE 0 END) AS playoff_losses \
     FROM games g WHERE g.game_type != 'preseason' \
     GROUP BY g.season ORDER BY g.season DESC";

pub async fn season_summaries(db: &Database) -> StatsResult<Vec<Row>> {
    db.query(SEASON_SUMMARIES_SQL, &[]).await
}

/// Everything known about one game.
#[derive(Debug, Clone, Default, Serialize, JsonSchema)]
pub struct GameDetail {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<Row>,
    /// Team totals, franchise first.
    pub team_stats: Vec<Row>,
    pub scoring_plays: Vec<Row>,
    pub passing: Vec<Row>,
    pub rushing: Vec<Row>,
    pub receiving: Vec<Row>,
    pub defense: Vec<Row>,
}

pub async fn game_detail(db: &Database, game_id: &str) -> StatsResult<GameDetail> {
    let Some(game) = get_game(db, game_id).await? else {
        return Ok(GameDetail::default());
    };

    let team_box = team_box_statement(game_id);
    let passing_box = box_score_statement(StatCategory::Passing, game_id);
    let rushing_box = box_score_statement(StatCategory::Rushing, game_id);
    let receiving_box = box_score_statement(StatCategory::Receiving, game_id);
    let defense_box = box_score_statement(StatCategory::Defense, game_id);

    let (team_stats, scoring_plays, passing, rushing, receiving, defense) = tokio::try_join!(
        db.fetch(&team_box),
        scoring::scoring_plays(db, game_id),
        db.fetch(&passing_box),
        db.fetch(&rushing_box),
        db.fetch(&receiving_box),
        db.fetch(&defense_box),
    )?;

    Ok(GameDetail {
        found: true,
        game: Some(game),
        team_stats,
        scoring_plays,
        passing,
        rushing,
        receiving,
        defense,
    })
}

fn team_box_statement(game_id: &str) -> Statement {
    Statement::new(
        format!(
            "SELECT t.team, t.first_downs, t.total_yds, t.pass_yds, t.rush_yds, t.turnovers, \
             t.penalties, t.penalty_yds, t.time_of_possession \
             FROM team_game_stats t WHERE t.game_id = ? \
             ORDER BY CASE WHEN {} THEN 0 ELSE 1 END",
            belongs_to_franchise("t")
        ),
        vec![SqlParam::from(game_id)],
    )
}

/// Both teams' lines for one category in one game, franchise first.
///
/// The defensive box keys on `player_defense`; sacks and interceptions are
/// pulled in per line and default to 0.
pub fn box_score_statement(category: StatCategory, game_id: &str) -> Statement {
    let franchise_first = format!("CASE WHEN {} THEN 0 ELSE 1 END", belongs_to_franchise("s"));

    let sql = match category {
        StatCategory::Defense => format!(
            "SELECT p.player_id AS player_id, p.player_name AS player_name, s.team AS team, \
             s.tkl AS tkl, s.ast AS ast, s.ff AS ff, s.fr AS fr, \
             COALESCE((SELECT SUM(k.sacks) FROM player_sacks k \
               WHERE k.game_id = s.game_id AND k.player_id = s.player_id), 0) AS sacks, \
             COALESCE((SELECT SUM(i.int_count) FROM player_interceptions i \
               WHERE i.game_id = s.game_id AND i.player_id = s.player_id), 0) AS interceptions \
             FROM player_defense s JOIN players p ON p.player_id = s.player_id \
             WHERE s.game_id = ? ORDER BY {franchise_first}, tkl DESC"
        ),
        _ => {
            let cols: Vec<String> = columns::stat_columns(category, Scope::Game)
                .iter()
                .map(|c| format!("{} AS {}", c.expr, c.name))
                .collect();
            format!(
                "SELECT p.player_id AS player_id, p.player_name AS player_name, s.team AS team, {} \
                 FROM {} s JOIN players p ON p.player_id = s.player_id \
                 WHERE s.game_id = ? ORDER BY {franchise_first}, yds DESC",
                cols.join(", "),
                category.table()
            )
        }
    };

    Statement::new(sql, vec![SqlParam::from(game_id)])
}
