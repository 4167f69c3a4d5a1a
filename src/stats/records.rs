//! Franchise record books: best player and team performances.
//!
//! Records count regular-season games only, at every scope.

use crate::db::{Database, Statement};
use crate::error::{StatsError, StatsResult};
use crate::models::{GameTypeFilter, Row, Scope, SqlParam, StatCategory, UnknownVariant};
use crate::stats::columns;
use crate::stats::filter::WhereClause;
use crate::stats::player_stats::{self, StatOrder, StatQuery};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordCategory {
    Player(StatCategory),
    Team,
}

impl FromStr for RecordCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("team") {
            return Ok(Self::Team);
        }
        s.parse::<StatCategory>()
            .map(Self::Player)
            .map_err(|_| UnknownVariant {
                value: s.to_string(),
                expected: &["passing", "rushing", "receiving", "defense", "team"],
            })
    }
}

pub fn player_records_query(
    category: StatCategory,
    scope: Scope,
    stat: &'static str,
    limit: u32,
) -> StatQuery {
    StatQuery::new(category, scope)
        .game_types(GameTypeFilter::RegularOnly)
        .order(StatOrder::Descending(stat))
        .limit(limit)
}

/// Best single games or seasons for the team, ranked by `stat`.
pub fn team_records_statement(
    scope: Scope,
    stat: &'static str,
    limit: u32,
) -> StatsResult<Statement> {
    let mut w = WhereClause::new();
    w.game_type(GameTypeFilter::RegularOnly, "g");

    let sql = match scope {
        Scope::Game => format!(
            "SELECT g.game_id AS game_id, g.season AS season, g.game_date AS game_date, \
             g.opponent AS opponent, g.home_away AS home_away, g.result AS result, \
             g.saints_score AS saints_score, g.opponent_score AS opponent_score, \
             g.saints_score - g.opponent_score AS margin \
             FROM games g{} ORDER BY {stat} DESC LIMIT ?",
            w.render()
        ),
        Scope::Season => format!(
            "SELECT g.season AS season, \
             SUM(CASE WHEN g.result = 'W' THEN 1 ELSE 0 END) AS wins, \
             SUM(CASE WHEN g.result = 'L' THEN 1 ELSE 0 END) AS losses, \
             SUM(g.saints_score) AS points_for, \
             SUM(g.opponent_score) AS points_against, \
             SUM(g.saints_score) - SUM(g.opponent_score) AS point_differential \
             FROM games g{} GROUP BY g.season ORDER BY {stat} DESC LIMIT ?",
            w.render()
        ),
        Scope::Career => {
            return Err(StatsError::invalid_input(
                "record_type",
                "team records are available for 'game' or 'season', not 'career'",
            ));
        }
    };

    let mut params = w.into_params();
    params.push(SqlParam::from(limit));
    Ok(Statement::new(sql, params))
}

pub async fn records(
    db: &Database,
    category: RecordCategory,
    scope: Scope,
    stat: Option<&str>,
    limit: u32,
) -> StatsResult<Vec<Row>> {
    match category {
        RecordCategory::Player(category) => {
            let stat = columns::sort_column(category, scope, stat, "stat")?;
            let q = player_records_query(category, scope, stat, limit);
            player_stats::player_stats(db, &q).await
        }
        RecordCategory::Team => {
            let stat = columns::team_record_column(scope, stat)?;
            db.fetch(&team_records_statement(scope, stat, limit)?).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_category() {
        assert_eq!("Team".parse::<RecordCategory>(), Ok(RecordCategory::Team));
        assert_eq!(
            "rushing".parse::<RecordCategory>(),
            Ok(RecordCategory::Player(StatCategory::Rushing))
        );
        let err = "kicking".parse::<RecordCategory>().unwrap_err();
        assert!(err.to_string().contains("team"));
    }

    #[test]
    fn test_player_records_are_regular_season_at_game_scope() {
        let q = player_records_query(StatCategory::Passing, Scope::Game, "yds", 10);
        let stmt = player_stats::build(&q).unwrap();
        assert!(stmt.sql().contains("g.game_type = 'regular'"));
        assert!(stmt.sql().ends_with("ORDER BY yds DESC LIMIT ?"));
    }

    #[test]
    fn test_team_records_statements() {
        let stmt = team_records_statement(Scope::Game, "margin", 5).unwrap();
        assert!(stmt.validate().is_ok());
        assert!(stmt.sql().contains("ORDER BY margin DESC"));

        let stmt = team_records_statement(Scope::Season, "wins", 5).unwrap();
        assert!(stmt.validate().is_ok());
        assert!(stmt.sql().contains("GROUP BY g.season"));
    }

    #[test]
    fn test_team_career_records_rejected() {
        let err = team_records_statement(Scope::Career, "wins", 5).unwrap_err();
        assert_eq!(err.field(), Some("record_type"));
    }
}
