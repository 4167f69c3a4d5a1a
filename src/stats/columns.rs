//! Closed column sets per stat category.
//!
//! These are the only identifiers a caller can influence (via `sort_by` or
//! `stat`). A requested name is looked up here and the matching
//! `&'static str` is what reaches the SQL text.

use crate::error::{StatsError, StatsResult};
use crate::models::{Scope, StatCategory};

/// An output column: its name in the result row and the SQL producing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatColumn {
    pub name: &'static str,
    pub expr: &'static str,
}

const fn col(name: &'static str, expr: &'static str) -> StatColumn {
    StatColumn { name, expr }
}

pub const PASSING_TOTALS: &[StatColumn] = &[
    col("games", "COUNT(DISTINCT s.game_id)"),
    col("com", "SUM(s.com)"),
    col("att", "SUM(s.att)"),
    col("pct", "ROUND(100.0 * SUM(s.com) / NULLIF(SUM(s.att), 0), 1)"),
    col("yds", "SUM(s.yds)"),
    col("td", "SUM(s.td)"),
    col("int_thrown", "SUM(s.int_thrown)"),
    col("lg", "MAX(s.lg)"),
    col("sacked", "SUM(s.sacked)"),
    col("sacked_yds", "SUM(s.sacked_yds)"),
];

pub const PASSING_LINE: &[StatColumn] = &[
    col("com", "s.com"),
    col("att", "s.att"),
    col("pct", "s.pct"),
    col("yds", "s.yds"),
    col("td", "s.td"),
    col("int_thrown", "s.int_thrown"),
    col("lg", "s.lg"),
    col("sacked", "s.sacked"),
    col("sacked_yds", "s.sacked_yds"),
    col("rtg", "s.rtg"),
];

pub const RUSHING_TOTALS: &[StatColumn] = &[
    col("games", "COUNT(DISTINCT s.game_id)"),
    col("att", "SUM(s.att)"),
    col("yds", "SUM(s.yds)"),
    col("avg", "ROUND(1.0 * SUM(s.yds) / NULLIF(SUM(s.att), 0), 1)"),
    col("td", "SUM(s.td)"),
    col("lg", "MAX(s.lg)"),
];

pub const RUSHING_LINE: &[StatColumn] = &[
    col("att", "s.att"),
    col("yds", "s.yds"),
    col("avg", "s.avg"),
    col("td", "s.td"),
    col("lg", "s.lg"),
];

pub const RECEIVING_TOTALS: &[StatColumn] = &[
    col("games", "COUNT(DISTINCT s.game_id)"),
    col("tar", "SUM(s.tar)"),
    col("rec", "SUM(s.rec)"),
    col("yds", "SUM(s.yds)"),
    col("avg", "ROUND(1.0 * SUM(s.yds) / NULLIF(SUM(s.rec), 0), 1)"),
    col("td", "SUM(s.td)"),
    col("lg", "MAX(s.lg)"),
];

pub const RECEIVING_LINE: &[StatColumn] = &[
    col("tar", "s.tar"),
    col("rec", "s.rec"),
    col("yds", "s.yds"),
    col("avg", "s.avg"),
    col("td", "s.td"),
    col("lg", "s.lg"),
];

/// One of the three tables defensive production is split across.
#[derive(Debug, Clone, Copy)]
pub struct DefenseSource {
    /// Name of the per-source CTE.
    pub cte: &'static str,
    pub table: &'static str,
    pub alias: &'static str,
    pub columns: &'static [StatColumn],
}

pub const DEFENSE_SOURCES: [DefenseSource; 3] = [
    DefenseSource {
        cte: "tkl_totals",
        table: "player_defense",
        alias: "d",
        columns: &[
            col("tackles", "SUM(d.tkl)"),
            col("assists", "SUM(d.ast)"),
            col("forced_fumbles", "SUM(d.ff)"),
            col("fumble_recoveries", "SUM(d.fr)"),
        ],
    },
    DefenseSource {
        cte: "sack_totals",
        table: "player_sacks",
        alias: "k",
        columns: &[col("sacks", "SUM(k.sacks)"), col("sack_yds", "SUM(k.yds)")],
    },
    DefenseSource {
        cte: "int_totals",
        table: "player_interceptions",
        alias: "i",
        columns: &[
            col("interceptions", "SUM(i.int_count)"),
            col("int_yds", "SUM(i.yds)"),
            col("int_td", "SUM(i.td)"),
        ],
    },
];

/// Stat columns for a non-defense category at the given scope.
pub fn stat_columns(category: StatCategory, scope: Scope) -> &'static [StatColumn] {
    let aggregate = scope != Scope::Game;
    match (category, aggregate) {
        (StatCategory::Passing, true) => PASSING_TOTALS,
        (StatCategory::Passing, false) => PASSING_LINE,
        (StatCategory::Rushing, true) => RUSHING_TOTALS,
        (StatCategory::Rushing, false) => RUSHING_LINE,
        (StatCategory::Receiving, true) => RECEIVING_TOTALS,
        (StatCategory::Receiving, false) => RECEIVING_LINE,
        // Defense is assembled from DEFENSE_SOURCES.
        (StatCategory::Defense, _) => &[],
    }
}

/// Names of the stat columns a query at this category/scope returns.
pub fn column_names(category: StatCategory, scope: Scope) -> Vec<&'static str> {
    match category {
        StatCategory::Defense => DEFENSE_SOURCES
            .iter()
            .flat_map(|s| s.columns.iter().map(|c| c.name))
            .collect(),
        _ => stat_columns(category, scope).iter().map(|c| c.name).collect(),
    }
}

pub fn default_sort(category: StatCategory) -> &'static str {
    match category {
        StatCategory::Defense => "tackles",
        _ => "yds",
    }
}

/// Resolve a caller-supplied column name against the closed set.
///
/// `field` names the input the value came from, for the error.
pub fn sort_column(
    category: StatCategory,
    scope: Scope,
    requested: Option<&str>,
    field: &str,
) -> StatsResult<&'static str> {
    let Some(requested) = requested.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(default_sort(category));
    };

    let names = column_names(category, scope);
    names
        .iter()
        .find(|n| n.eq_ignore_ascii_case(requested))
        .copied()
        .ok_or_else(|| {
            StatsError::invalid_input(
                field,
                format!(
                    "'{}' is not a {} {} column; expected one of {}",
                    requested,
                    category,
                    scope,
                    names.join(", ")
                ),
            )
        })
}

pub const TEAM_GAME_RECORD_COLUMNS: &[&str] = &["saints_score", "opponent_score", "margin"];
pub const TEAM_SEASON_RECORD_COLUMNS: &[&str] = &[
    "wins",
    "losses",
    "points_for",
    "points_against",
    "point_differential",
];

/// Resolve the ranking column for a team record query.
pub fn team_record_column(scope: Scope, requested: Option<&str>) -> StatsResult<&'static str> {
    let names = match scope {
        Scope::Game => TEAM_GAME_RECORD_COLUMNS,
        Scope::Season => TEAM_SEASON_RECORD_COLUMNS,
        Scope::Career => {
            return Err(StatsError::invalid_input(
                "record_type",
                "team records are available for 'game' or 'season', not 'career'",
            ));
        }
    };

    match requested.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(names[0]),
        Some(r) => names
            .iter()
            .find(|n| n.eq_ignore_ascii_case(r))
            .copied()
            .ok_or_else(|| {
                StatsError::invalid_input(
                    "stat",
                    format!(
                        "'{}' is not a team {} record; expected one of {}",
                        r,
                        scope,
                        names.join(", ")
                    ),
                )
            }),
    }
}
