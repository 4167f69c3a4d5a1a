//! Team totals for a season.

use crate::db::{Database, Statement};
use crate::error::StatsResult;
use crate::models::{GameTypeFilter, Row};
use crate::stats::filter::WhereClause;
use chrono::{Datelike, NaiveDate};
use schemars::JsonSchema;
use serde::Serialize;

/// A season's record and summed team stats.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct TeamSeason {
    pub season: i64,
    /// Regular-season wins, losses, ties and points.
    pub record: Row,
    /// Franchise `team_game_stats` summed over non-preseason games.
    pub stats: Row,
}

/// The season a date falls in. Seasons start in August.
pub fn season_for_date(date: NaiveDate) -> i64 {
    let year = i64::from(date.year());
    if date.month() >= 8 { year } else { year - 1 }
}

pub fn current_season() -> i64 {
    season_for_date(chrono::Local::now().date_naive())
}

pub fn record_statement(season: i64) -> Statement {
    let mut w = WhereClause::new();
    w.push_param("g.season = ?", season)
        .game_type(GameTypeFilter::RegularOnly, "g");

    Statement::new(
        format!(
            "SELECT \
             COALESCE(SUM(CASE WHEN g.result = 'W' THEN 1 ELSE 0 END), 0) AS wins, \
             COALESCE(SUM(CASE WHEN g.result = 'L' THEN 1 ELSE 0 END), 0) AS losses, \
             COALESCE(SUM(CASE WHEN g.result = 'T' THEN 1 ELSE 0 END), 0) AS ties, \
             COALESCE(SUM(g.saints_score), 0) AS points_for, \
             COALESCE(SUM(g.opponent_score), 0) AS points_against \
             FROM games g{}",
            w.render()
        ),
        w.into_params(),
    )
}

pub fn stats_statement(season: i64) -> Statement {
    let mut w = WhereClause::new();
    w.push_param("g.season = ?", season)
        .game_type(GameTypeFilter::ExcludePreseason, "g")
        .franchise("t");

    Statement::new(
        format!(
            "SELECT COUNT(t.game_id) AS games, \
             COALESCE(SUM(t.first_downs), 0) AS first_downs, \
             COALESCE(SUM(t.total_yds), 0) AS total_yds, \
             COALESCE(SUM(t.pass_yds), 0) AS pass_yds, \
             COALESCE(SUM(t.rush_yds), 0) AS rush_yds, \
             COALESCE(SUM(t.turnovers), 0) AS turnovers, \
             COALESCE(SUM(t.penalties), 0) AS penalties, \
             COALESCE(SUM(t.penalty_yds), 0) AS penalty_yds \
             FROM team_game_stats t JOIN games g ON g.game_id = t.game_id{}",
            w.render()
        ),
        w.into_params(),
    )
}

pub async fn team_season(db: &Database, season: i64) -> StatsResult<TeamSeason> {
    let record_stmt = record_statement(season);
    let stats_stmt = stats_statement(season);
    let (record, stats) =
        tokio::try_join!(db.fetch_one(&record_stmt), db.fetch_one(&stats_stmt))?;

    Ok(TeamSeason {
        season,
        record: record.unwrap_or_default(),
        stats: stats.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SqlParam;

    #[test]
    fn test_season_rolls_over_in_august() {
        let july = NaiveDate::from_ymd_opt(2024, 7, 31).unwrap();
        let august = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        let january = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();
        assert_eq!(season_for_date(july), 2023);
        assert_eq!(season_for_date(august), 2024);
        assert_eq!(season_for_date(january), 2024);
    }

    #[test]
    fn test_record_counts_regular_season_only() {
        let stmt = record_statement(2009);
        assert!(stmt.validate().is_ok());
        assert!(stmt.sql().contains("g.game_type = 'regular'"));
        assert_eq!(stmt.params(), &[SqlParam::Int(2009)]);
    }

    #[test]
    fn test_stats_are_franchise_only_and_skip_preseason() {
        let stmt = stats_statement(2009);
        assert!(stmt.validate().is_ok());
        assert!(stmt.sql().contains("g.game_type != 'preseason'"));
        assert!(stmt.sql().contains("t.team LIKE '%Saints%'"));
    }
}
