//! Scoring plays and the game lookup in front of them.

use crate::db::{Database, Statement};
use crate::error::{StatsError, StatsResult};
use crate::models::{Row, SqlParam};
use crate::stats::games;
use schemars::JsonSchema;
use serde::Serialize;

/// Plays for a game in sequence order.
pub fn scoring_plays_statement(game_id: &str) -> Statement {
    Statement::new(
        "SELECT sp.id, sp.quarter, sp.time, sp.team, sp.description, sp.away_score, sp.home_score \
         FROM scoring_plays sp WHERE sp.game_id = ? ORDER BY sp.id ASC",
        vec![SqlParam::from(game_id)],
    )
}

pub async fn scoring_plays(db: &Database, game_id: &str) -> StatsResult<Vec<Row>> {
    db.fetch(&scoring_plays_statement(game_id)).await
}

/// Outcome of a scoring lookup.
///
/// `found: false` means no game matched. A matched game with no scoring
/// plays is `found: true` with an empty `plays`.
#[derive(Debug, Clone, Default, Serialize, JsonSchema)]
pub struct ScoringResult {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<Row>,
    pub plays: Vec<Row>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Fetch plays for an explicit game, or for the most recent game matching
/// the season/opponent filters.
pub async fn lookup(
    db: &Database,
    game_id: Option<&str>,
    season: Option<i64>,
    opponent: Option<&str>,
) -> StatsResult<ScoringResult> {
    if let Some(game_id) = game_id {
        let plays = scoring_plays(db, game_id).await?;
        return Ok(ScoringResult {
            found: true,
            game_id: Some(game_id.to_string()),
            game: None,
            plays,
            message: None,
        });
    }

    let Some(game) = games::latest_game(db, season, opponent).await? else {
        return Ok(ScoringResult {
            found: false,
            message: Some(no_game_message(season, opponent)),
            ..Default::default()
        });
    };

    let game_id = game
        .get("game_id")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| StatsError::internal("Game row has no game_id"))?;
    let plays = scoring_plays(db, &game_id).await?;

    Ok(ScoringResult {
        found: true,
        game_id: Some(game_id),
        game: Some(game),
        plays,
        message: None,
    })
}

fn no_game_message(season: Option<i64>, opponent: Option<&str>) -> String {
    match (season, opponent) {
        (Some(s), Some(o)) => format!("No game found in {s} against an opponent matching '{o}'"),
        (Some(s), None) => format!("No game found in {s}"),
        (None, Some(o)) => format!("No game found against an opponent matching '{o}'"),
        (None, None) => "No games found".to_string(),
    }
}
