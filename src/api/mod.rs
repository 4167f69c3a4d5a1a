//! JSON read endpoint for the stats pages.
//!
//! `GET /api/stats?scope=<career|season|game>&category=<passing|rushing|receiving|defense>`
//! dispatches through a fixed lookup table and returns a JSON array. An
//! unknown or missing pair is a 400.

use crate::db::Database;
use crate::error::{StatsError, StatsResult};
use crate::models::{GameTypeFilter, Row, Scope, StatCategory};
use crate::stats::leaderboards;
use crate::stats::player_stats::{self, StatQuery};
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

pub const STATS_PATH: &str = "/api/stats";

/// Rows returned per request.
pub const HTTP_ROW_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsFetch {
    /// Career totals, regular season.
    Career(StatCategory),
    /// Per-season totals, regular season.
    Season(StatCategory),
    /// Single-game lines, preseason excluded.
    Game(StatCategory),
    /// Single-game sack lines. Served for `game`/`defense`.
    GameSacks,
}

const LOOKUP: [(&str, &str, StatsFetch); 12] = [
    ("career", "passing", StatsFetch::Career(StatCategory::Passing)),
    ("career", "rushing", StatsFetch::Career(StatCategory::Rushing)),
    ("career", "receiving", StatsFetch::Career(StatCategory::Receiving)),
    ("career", "defense", StatsFetch::Career(StatCategory::Defense)),
    ("season", "passing", StatsFetch::Season(StatCategory::Passing)),
    ("season", "rushing", StatsFetch::Season(StatCategory::Rushing)),
    ("season", "receiving", StatsFetch::Season(StatCategory::Receiving)),
    ("season", "defense", StatsFetch::Season(StatCategory::Defense)),
    ("game", "passing", StatsFetch::Game(StatCategory::Passing)),
    ("game", "rushing", StatsFetch::Game(StatCategory::Rushing)),
    ("game", "receiving", StatsFetch::Game(StatCategory::Receiving)),
    ("game", "defense", StatsFetch::GameSacks),
];

pub fn lookup(scope: &str, category: &str) -> Option<StatsFetch> {
    let (scope, category) = (scope.trim(), category.trim());
    LOOKUP
        .iter()
        .find(|(s, c, _)| s.eq_ignore_ascii_case(scope) && c.eq_ignore_ascii_case(category))
        .map(|(_, _, fetch)| *fetch)
}

/// Parameter to blame for a failed lookup: the scope when it is unknown,
/// otherwise the category.
fn rejected_field(scope: &str) -> &'static str {
    let scope = scope.trim();
    if LOOKUP.iter().any(|(s, _, _)| s.eq_ignore_ascii_case(scope)) {
        "category"
    } else {
        "scope"
    }
}

impl StatsFetch {
    fn query(category: StatCategory, scope: Scope) -> StatQuery {
        let game_types = match scope {
            Scope::Game => GameTypeFilter::ExcludePreseason,
            Scope::Career | Scope::Season => GameTypeFilter::RegularOnly,
        };
        StatQuery::new(category, scope)
            .game_types(game_types)
            .limit(HTTP_ROW_LIMIT)
    }

    pub async fn fetch(self, db: &Database) -> StatsResult<Vec<Row>> {
        let (category, scope) = match self {
            Self::Career(c) => (c, Scope::Career),
            Self::Season(c) => (c, Scope::Season),
            Self::Game(c) => (c, Scope::Game),
            Self::GameSacks => {
                let filter = GameTypeFilter::ExcludePreseason;
                return leaderboards::single_game_sacks(db, filter, HTTP_ROW_LIMIT).await;
            }
        };
        player_stats::player_stats(db, &Self::query(category, scope)).await
    }
}

#[derive(Debug, Deserialize)]
pub struct StatsParams {
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

async fn stats_handler(
    State(db): State<Arc<Database>>,
    Query(params): Query<StatsParams>,
) -> Result<Json<Vec<Row>>, StatsError> {
    let scope = params.scope.unwrap_or_default();
    let category = params.category.unwrap_or_default();

    let fetch = lookup(&scope, &category).ok_or_else(|| {
        StatsError::invalid_input(
            rejected_field(&scope),
            format!("unsupported scope/category combination: {scope}/{category}"),
        )
    })?;

    let rows = fetch.fetch(&db).await?;
    info!(
        scope = %scope,
        category = %category,
        row_count = rows.len(),
        "Stats endpoint served"
    );
    Ok(Json(rows))
}

/// Router serving the stats endpoint.
pub fn router(db: Arc<Database>) -> Router {
    Router::new()
        .route(STATS_PATH, get(stats_handler))
        .with_state(db)
}
