//! Player search, biographies and game logs.

use crate::db::{Database, Statement};
use crate::error::{StatsError, StatsResult};
use crate::models::{GameTypeFilter, Row, Scope, SqlParam, StatCategory};
use crate::stats::filter::WhereClause;
use crate::stats::franchise::belongs_to_franchise;
use crate::stats::player_stats::{self, StatOrder, StatQuery};
use schemars::JsonSchema;
use serde::Serialize;

const PLAYER_COLUMNS: &str = "p.player_id, p.player_name, p.position, p.college, p.height, \
     p.weight, p.birth_date, p.seasons";

/// Tables a franchise stat line can live in.
const STAT_TABLES: [&str; 6] = [
    "player_passing",
    "player_rushing",
    "player_receiving",
    "player_defense",
    "player_sacks",
    "player_interceptions",
];

/// How a caller names a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerRef {
    Id(String),
    /// Exact name preferred, otherwise the first substring match.
    Name(String),
}

pub fn search_statement(name: &str, position: Option<&str>, limit: u32) -> Statement {
    let mut w = WhereClause::new();
    w.push_contains("p.player_name", Some(name))
        .push_opt("UPPER(p.position) = UPPER(?)", position.map(str::trim));

    let sql = format!(
        "SELECT p.player_id, p.player_name, p.position, p.college, p.seasons \
         FROM players p{} ORDER BY p.player_name ASC LIMIT ?",
        w.render()
    );
    let mut params = w.into_params();
    params.push(SqlParam::from(limit));
    Statement::new(sql, params)
}

pub async fn search_players(
    db: &Database,
    name: &str,
    position: Option<&str>,
    limit: u32,
) -> StatsResult<Vec<Row>> {
    db.fetch(&search_statement(name, position, limit)).await
}

pub async fn find_player(db: &Database, player: &PlayerRef) -> StatsResult<Option<Row>> {
    match player {
        PlayerRef::Id(id) => {
            db.query_one(
                &format!("SELECT {PLAYER_COLUMNS} FROM players p WHERE p.player_id = ?"),
                &[SqlParam::from(id.as_str())],
            )
            .await
        }
        PlayerRef::Name(name) => {
            db.query_one(
                &format!(
                    "SELECT {PLAYER_COLUMNS} FROM players p WHERE p.player_name LIKE ? \
                     ORDER BY CASE WHEN p.player_name = ? THEN 0 ELSE 1 END, p.player_name ASC \
                     LIMIT 1"
                ),
                &[SqlParam::contains(name), SqlParam::from(name.trim())],
            )
            .await
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, JsonSchema)]
pub struct PlayerBio {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<Row>,
    pub draft: Vec<Row>,
    /// Seasons with at least one franchise stat line.
    pub seasons: Vec<i64>,
}

pub async fn player_bio(db: &Database, player: &PlayerRef) -> StatsResult<PlayerBio> {
    let Some(row) = find_player(db, player).await? else {
        return Ok(PlayerBio::default());
    };

    let player_id = row
        .get("player_id")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| StatsError::internal("Player row has no player_id"))?;
    let player_name = row
        .get("player_name")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    let draft_stmt = draft_statement(&player_id, &player_name);
    let seasons_stmt = seasons_statement(&player_id);
    let (draft, seasons) =
        tokio::try_join!(db.fetch(&draft_stmt), db.fetch(&seasons_stmt))?;

    Ok(PlayerBio {
        found: true,
        player: Some(row),
        draft,
        seasons: seasons
            .iter()
            .filter_map(|r| r.get("season").and_then(|v| v.as_i64()))
            .collect(),
    })
}

fn draft_statement(player_id: &str, player_name: &str) -> Statement {
    Statement::new(
        "SELECT d.season, d.round, d.pick, d.overall, d.position, d.college \
         FROM draft_picks d WHERE d.player_id = ? OR d.player_name = ? \
         ORDER BY d.season ASC",
        vec![SqlParam::from(player_id), SqlParam::from(player_name)],
    )
}

fn seasons_statement(player_id: &str) -> Statement {
    let lines: Vec<String> = STAT_TABLES
        .iter()
        .map(|table| {
            format!(
                "SELECT s.game_id FROM {table} s WHERE s.player_id = ? AND {}",
                belongs_to_franchise("s")
            )
        })
        .collect();

    Statement::new(
        format!(
            "SELECT DISTINCT g.season AS season FROM games g WHERE g.game_id IN ({}) \
             ORDER BY g.season ASC",
            lines.join(" UNION ")
        ),
        vec![SqlParam::from(player_id); STAT_TABLES.len()],
    )
}

/// Game-by-game lines for a player, oldest first. Preseason is left out;
/// playoff games are included.
pub fn game_log_query(player_name: &str, category: StatCategory) -> StatQuery {
    StatQuery::new(category, Scope::Game)
        .player(player_name.trim())
        .game_types(GameTypeFilter::ExcludePreseason)
        .order(StatOrder::DateAscending)
}

pub async fn game_log(
    db: &Database,
    player_name: &str,
    category: StatCategory,
) -> StatsResult<Vec<Row>> {
    player_stats::player_stats(db, &game_log_query(player_name, category)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_statement() {
        let stmt = search_statement("Brees", Some("qb"), 20);
        assert!(stmt.validate().is_ok());
        assert_eq!(
            stmt.params(),
            &[
                SqlParam::contains("Brees"),
                SqlParam::from("qb"),
                SqlParam::Int(20)
            ]
        );
    }

    #[test]
    fn test_seasons_statement_binds_each_table() {
        let stmt = seasons_statement("BreeDr00");
        assert!(stmt.validate().is_ok());
        assert_eq!(stmt.params().len(), STAT_TABLES.len());
        assert!(stmt.sql().contains("FROM player_interceptions s"));
    }

    #[test]
    fn test_game_log_excludes_preseason_only() {
        let stmt = player_stats::build(&game_log_query("Brees", StatCategory::Passing)).unwrap();
        assert!(stmt.sql().contains("g.game_type != 'preseason'"));
        assert!(stmt.sql().ends_with("ORDER BY game_date ASC"));
    }

    #[test]
    fn test_draft_statement() {
        assert!(draft_statement("BreeDr00", "Drew Brees").validate().is_ok());
    }
}
