//! Per-player stat lines at career, season or single-game scope.
//!
//! Passing, rushing and receiving each read one table. Defense is split
//! across three independently keyed tables (tackles, sacks, interceptions);
//! a player shows up if any of the three has a row for the scope key, and
//! whichever categories are missing come back as 0.

use crate::db::{Database, Statement};
use crate::error::{StatsError, StatsResult};
use crate::models::{GameTypeFilter, Row, Scope, SqlParam, StatCategory};
use crate::stats::columns::{self, DEFENSE_SOURCES};
use crate::stats::filter::WhereClause;

/// Game columns attached to every single-game row.
pub const GAME_CONTEXT: &[&str] = &[
    "g.game_id AS game_id",
    "g.season AS season",
    "g.game_date AS game_date",
    "g.game_type AS game_type",
    "g.opponent AS opponent",
    "g.result AS result",
];

const PLAYER_IDENTITY: &[&str] = &[
    "p.player_id AS player_id",
    "p.player_name AS player_name",
    "p.position AS position",
];

/// Result ordering. Column ordering is descending with no tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatOrder {
    Descending(&'static str),
    SeasonAscending,
    DateAscending,
    DateDescending,
}

impl StatOrder {
    fn render(&self, scope: Scope) -> StatsResult<String> {
        match (self, scope) {
            (Self::Descending(column), _) => Ok(format!("{column} DESC")),
            (Self::SeasonAscending, Scope::Season | Scope::Game) => Ok("season ASC".to_string()),
            (Self::DateAscending, Scope::Game) => Ok("game_date ASC".to_string()),
            (Self::DateDescending, Scope::Game) => Ok("game_date DESC".to_string()),
            (order, scope) => Err(StatsError::internal(format!(
                "{order:?} ordering is not available at {scope} scope"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatQuery {
    pub category: StatCategory,
    pub scope: Scope,
    pub game_types: GameTypeFilter,
    /// Substring of the player's name.
    pub player_name: Option<String>,
    pub season: Option<i64>,
    pub order: StatOrder,
    pub limit: Option<u32>,
}

impl StatQuery {
    /// Aggregates count regular-season games only; single-game rows count
    /// every game type.
    pub fn new(category: StatCategory, scope: Scope) -> Self {
        let game_types = match scope {
            Scope::Career | Scope::Season => GameTypeFilter::RegularOnly,
            Scope::Game => GameTypeFilter::All,
        };
        Self {
            category,
            scope,
            game_types,
            player_name: None,
            season: None,
            order: StatOrder::Descending(columns::default_sort(category)),
            limit: None,
        }
    }

    pub fn player(mut self, name: impl Into<String>) -> Self {
        self.player_name = Some(name.into());
        self
    }

    pub fn season(mut self, season: Option<i64>) -> Self {
        self.season = season;
        self
    }

    pub fn game_types(mut self, filter: GameTypeFilter) -> Self {
        self.game_types = filter;
        self
    }

    pub fn order(mut self, order: StatOrder) -> Self {
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Build the statement for a stat query.
pub fn build(q: &StatQuery) -> StatsResult<Statement> {
    let order = q.order.render(q.scope)?;
    let (mut sql, mut params) = match q.category {
        StatCategory::Defense => defense_sql(q),
        _ => single_table_sql(q),
    };

    sql.push_str(" ORDER BY ");
    sql.push_str(&order);
    if let Some(limit) = q.limit {
        sql.push_str(" LIMIT ?");
        params.push(SqlParam::from(limit));
    }

    Ok(Statement::new(sql, params))
}

pub async fn player_stats(db: &Database, q: &StatQuery) -> StatsResult<Vec<Row>> {
    db.fetch(&build(q)?).await
}

fn single_table_sql(q: &StatQuery) -> (String, Vec<SqlParam>) {
    let mut select: Vec<String> = PLAYER_IDENTITY.iter().map(|s| s.to_string()).collect();
    match q.scope {
        Scope::Career => {}
        Scope::Season => select.push("g.season AS season".to_string()),
        Scope::Game => select.extend(GAME_CONTEXT.iter().map(|s| s.to_string())),
    }
    select.extend(
        columns::stat_columns(q.category, q.scope)
            .iter()
            .map(|c| format!("{} AS {}", c.expr, c.name)),
    );

    let mut w = WhereClause::new();
    w.franchise("s")
        .game_type(q.game_types, "g")
        .push_contains("p.player_name", q.player_name.as_deref())
        .push_opt("g.season = ?", q.season);

    let group_by = match q.scope {
        Scope::Career => " GROUP BY s.player_id",
        Scope::Season => " GROUP BY s.player_id, g.season",
        Scope::Game => "",
    };

    let sql = format!(
        "SELECT {} FROM {} s \
         JOIN games g ON g.game_id = s.game_id \
         JOIN players p ON p.player_id = s.player_id{}{}",
        select.join(", "),
        q.category.table(),
        w.render(),
        group_by
    );
    (sql, w.into_params())
}

/// Scope key carried through the defense CTEs.
struct DefenseKey {
    /// Extra select items inside a source CTE (alias substituted).
    cte_select: &'static str,
    cte_group: &'static str,
    /// Extra columns selected from each CTE into `defenders`.
    key_list: &'static str,
    join_on: &'static str,
}

fn defense_key(scope: Scope) -> DefenseKey {
    match scope {
        Scope::Career => DefenseKey {
            cte_select: "",
            cte_group: "",
            key_list: "",
            join_on: "",
        },
        Scope::Season => DefenseKey {
            cte_select: ", g.season AS season",
            cte_group: ", g.season",
            key_list: ", season",
            join_on: " AND {cte}.season = x.season",
        },
        Scope::Game => DefenseKey {
            cte_select: ", {alias}.game_id AS game_id",
            cte_group: ", {alias}.game_id",
            key_list: ", game_id",
            join_on: " AND {cte}.game_id = x.game_id",
        },
    }
}

fn defense_sql(q: &StatQuery) -> (String, Vec<SqlParam>) {
    let key = defense_key(q.scope);
    let mut params = Vec::new();
    let mut ctes = Vec::with_capacity(DEFENSE_SOURCES.len() + 1);

    for src in DEFENSE_SOURCES.iter() {
        let mut w = WhereClause::new();
        w.franchise(src.alias)
            .game_type(q.game_types, "g")
            .push_opt("g.season = ?", q.season);

        let stat_select: Vec<String> = src
            .columns
            .iter()
            .map(|c| format!("{} AS {}", c.expr, c.name))
            .collect();

        ctes.push(format!(
            "{cte} AS (SELECT {a}.player_id AS player_id{key_sel}, {cols} \
             FROM {table} {a} JOIN games g ON g.game_id = {a}.game_id{filter} \
             GROUP BY {a}.player_id{key_group})",
            cte = src.cte,
            a = src.alias,
            key_sel = key.cte_select.replace("{alias}", src.alias),
            cols = stat_select.join(", "),
            table = src.table,
            filter = w.render(),
            key_group = key.cte_group.replace("{alias}", src.alias),
        ));
        params.extend(w.into_params());
    }

    let union: Vec<String> = DEFENSE_SOURCES
        .iter()
        .map(|src| format!("SELECT player_id{} FROM {}", key.key_list, src.cte))
        .collect();
    ctes.push(format!("defenders AS ({})", union.join(" UNION ")));

    let mut select: Vec<String> = PLAYER_IDENTITY.iter().map(|s| s.to_string()).collect();
    match q.scope {
        Scope::Career => {}
        Scope::Season => select.push("x.season AS season".to_string()),
        Scope::Game => select.extend(GAME_CONTEXT.iter().map(|s| s.to_string())),
    }
    for src in DEFENSE_SOURCES.iter() {
        select.extend(
            src.columns
                .iter()
                .map(|c| format!("COALESCE({}.{}, 0) AS {}", src.cte, c.name, c.name)),
        );
    }

    let mut from = String::from("defenders x JOIN players p ON p.player_id = x.player_id");
    if q.scope == Scope::Game {
        from.push_str(" JOIN games g ON g.game_id = x.game_id");
    }
    for src in DEFENSE_SOURCES.iter() {
        from.push_str(&format!(
            " LEFT JOIN {cte} ON {cte}.player_id = x.player_id{on}",
            cte = src.cte,
            on = key.join_on.replace("{cte}", src.cte),
        ));
    }

    let mut w = WhereClause::new();
    w.push_contains("p.player_name", q.player_name.as_deref());

    let sql = format!(
        "WITH {} SELECT {} FROM {}{}",
        ctes.join(", "),
        select.join(", "),
        from,
        w.render()
    );
    params.extend(w.into_params());
    (sql, params)
}
