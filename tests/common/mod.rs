//! Shared fixture: a small stats store in a temporary SQLite file.
//!
//! Season 2009 holds the two Colts games (one regular, one preseason), a
//! regular-season win over Detroit and a playoff win over Arizona. Season
//! 2010 holds a win and a loss. The preseason game carries a 400-yard
//! passing line that must never reach regular-season totals.

#![allow(dead_code)]

use saints_encyclopedia::config::DatabaseConfig;
use saints_encyclopedia::db::Database;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use tempfile::NamedTempFile;

pub const COLTS_WIN: &str = "200901010nor";
pub const COLTS_PRESEASON: &str = "200901080clt";
pub const LIONS: &str = "200909130nor";
pub const CARDINALS: &str = "201001160nor";
pub const VIKINGS: &str = "201009090nor";
pub const BROWNS: &str = "201010240nor";

const SCHEMA: &[&str] = &[
    "CREATE TABLE games (game_id TEXT PRIMARY KEY, season INTEGER, game_date TEXT, \
     day_of_week TEXT, game_type TEXT, opponent TEXT, opponent_abbr TEXT, home_away TEXT, \
     saints_score INTEGER, opponent_score INTEGER, result TEXT, location TEXT, venue TEXT, \
     attendance INTEGER, boxscore_url TEXT)",
    "CREATE TABLE players (player_id TEXT PRIMARY KEY, player_name TEXT, url TEXT, \
     position TEXT, college TEXT, height TEXT, weight INTEGER, birth_date TEXT, seasons TEXT)",
    "CREATE TABLE player_passing (id INTEGER PRIMARY KEY, game_id TEXT, player_id TEXT, \
     team TEXT, att INTEGER, com INTEGER, pct REAL, yds INTEGER, td INTEGER, \
     int_thrown INTEGER, lg INTEGER, sacked INTEGER, sacked_yds INTEGER, rtg REAL)",
    "CREATE TABLE player_rushing (id INTEGER PRIMARY KEY, game_id TEXT, player_id TEXT, \
     team TEXT, att INTEGER, yds INTEGER, avg REAL, lg INTEGER, td INTEGER)",
    "CREATE TABLE player_receiving (id INTEGER PRIMARY KEY, game_id TEXT, player_id TEXT, \
     team TEXT, tar INTEGER, rec INTEGER, yds INTEGER, avg REAL, lg INTEGER, td INTEGER)",
    "CREATE TABLE player_defense (id INTEGER PRIMARY KEY, game_id TEXT, player_id TEXT, \
     team TEXT, tkl INTEGER, ast INTEGER, ff INTEGER, fr INTEGER)",
    "CREATE TABLE player_sacks (id INTEGER PRIMARY KEY, game_id TEXT, player_id TEXT, \
     team TEXT, sacks REAL, yds INTEGER)",
    "CREATE TABLE player_interceptions (id INTEGER PRIMARY KEY, game_id TEXT, player_id TEXT, \
     team TEXT, int_count INTEGER, yds INTEGER, avg REAL, lg INTEGER, td INTEGER)",
    "CREATE TABLE team_game_stats (id INTEGER PRIMARY KEY, game_id TEXT, team TEXT, \
     first_downs INTEGER, total_yds INTEGER, pass_yds INTEGER, rush_yds INTEGER, \
     turnovers INTEGER, penalties INTEGER, penalty_yds INTEGER, time_of_possession TEXT)",
    "CREATE TABLE scoring_plays (id INTEGER PRIMARY KEY, game_id TEXT, quarter INTEGER, \
     time TEXT, team TEXT, description TEXT, away_score INTEGER, home_score INTEGER)",
    "CREATE TABLE draft_picks (id INTEGER PRIMARY KEY, season INTEGER, round INTEGER, \
     pick INTEGER, overall INTEGER, player_id TEXT, player_name TEXT, position TEXT, \
     college TEXT)",
];

const SEED: &[&str] = &[
    "INSERT INTO games (game_id, season, game_date, day_of_week, game_type, opponent, \
     opponent_abbr, home_away, saints_score, opponent_score, result, venue, attendance) VALUES \
     ('200901010nor', 2009, '2009-01-01', 'Thu', 'regular', 'Indianapolis Colts', 'IND', 'home', 31, 17, 'W', 'Superdome', 70000), \
     ('200901080clt', 2009, '2009-01-08', 'Thu', 'preseason', 'Indianapolis Colts', 'IND', 'away', 10, 20, 'L', 'Lucas Oil Stadium', 60000), \
     ('200909130nor', 2009, '2009-09-13', 'Sun', 'regular', 'Detroit Lions', 'DET', 'home', 45, 27, 'W', 'Superdome', 70003), \
     ('201001160nor', 2009, '2010-01-16', 'Sat', 'playoff', 'Arizona Cardinals', 'ARI', 'home', 45, 14, 'W', 'Superdome', 70338), \
     ('201009090nor', 2010, '2010-09-09', 'Thu', 'regular', 'Minnesota Vikings', 'MIN', 'home', 14, 9, 'W', 'Superdome', 72052), \
     ('201010240nor', 2010, '2010-10-24', 'Sun', 'regular', 'Cleveland Browns', 'CLE', 'home', 17, 30, 'L', 'Superdome', 70039)",
    "INSERT INTO players (player_id, player_name, position, college, height, weight) VALUES \
     ('breesdr01', 'Drew Brees', 'QB', 'Purdue', '6-0', 209), \
     ('thompi00', 'Pierre Thomas', 'RB', 'Illinois', '5-11', 215), \
     ('colsma00', 'Marques Colston', 'WR', 'Hofstra', '6-4', 225), \
     ('vilmjo99', 'Jonathan Vilma', 'LB', 'Miami', '6-1', 230), \
     ('sharda21', 'Darren Sharper', 'S', 'William & Mary', '6-2', 210), \
     ('smitwi99', 'Will Smith', 'DE', 'Ohio State', '6-3', 282), \
     ('mannpe00', 'Peyton Manning', 'QB', 'Tennessee', '6-5', 230), \
     ('lionde00', 'Lion Defender', 'LB', 'Michigan', '6-2', 240), \
     ('saintsa00', 'Sam Saint', 'QB', 'Nowhere', '6-1', 200)",
    "INSERT INTO player_passing (id, game_id, player_id, team, att, com, pct, yds, td, \
     int_thrown, lg, sacked, sacked_yds, rtg) VALUES \
     (1, '200901010nor', 'breesdr01', 'New Orleans Saints', 30, 20, 66.7, 250, 2, 0, 40, 1, 7, 110.0), \
     (2, '200901080clt', 'breesdr01', 'New Orleans Saints', 45, 35, 77.8, 400, 4, 0, 60, 0, 0, 140.0), \
     (3, '200909130nor', 'breesdr01', 'New Orleans Saints', 34, 26, 76.5, 358, 6, 1, 58, 0, 0, 143.9), \
     (4, '201001160nor', 'breesdr01', 'NO Saints', 32, 23, 71.9, 247, 3, 0, 44, 1, 5, 120.1), \
     (5, '201009090nor', 'breesdr01', 'New Orleans Saints', 36, 27, 75.0, 237, 0, 1, 29, 1, 8, 80.0), \
     (6, '201010240nor', 'breesdr01', 'New Orleans Saints', 37, 25, 67.6, 356, 2, 4, 51, 3, 20, 70.0), \
     (7, '200901010nor', 'mannpe00', 'Indianapolis Colts', 40, 28, 70.0, 300, 1, 1, 35, 2, 10, 90.0), \
     (8, '200909130nor', 'saintsa00', 'Saints of Somewhere Else', 2, 1, 50.0, 50, 0, 0, 50, 0, 0, 90.0)",
    "INSERT INTO player_rushing (id, game_id, player_id, team, att, yds, avg, lg, td) VALUES \
     (1, '200909130nor', 'thompi00', 'New Orleans Saints', 10, 60, 6.0, 20, 1), \
     (2, '201009090nor', 'thompi00', 'New Orleans Saints', 12, 45, 3.8, 11, 0), \
     (3, '201001160nor', 'breesdr01', 'New Orleans Saints', 2, 3, 1.5, 2, 0)",
    "INSERT INTO player_receiving (id, game_id, player_id, team, tar, rec, yds, avg, lg, td) VALUES \
     (1, '200909130nor', 'colsma00', 'New Orleans Saints', 8, 6, 90, 15.0, 30, 1), \
     (2, '200901010nor', 'colsma00', 'New Orleans Saints', 10, 7, 110, 15.7, 41, 1), \
     (3, '201001160nor', 'colsma00', 'New Orleans Saints', 5, 3, 40, 13.3, 18, 0)",
    "INSERT INTO player_defense (id, game_id, player_id, team, tkl, ast, ff, fr) VALUES \
     (1, '200909130nor', 'lionde00', 'Detroit Lions', 9, 3, 0, 0), \
     (2, '200909130nor', 'vilmjo99', 'New Orleans Saints', 8, 2, 0, 1), \
     (3, '201009090nor', 'vilmjo99', 'New Orleans Saints', 6, 1, 1, 0), \
     (4, '200909130nor', 'sharda21', 'New Orleans Saints', 5, 0, 0, 0)",
    "INSERT INTO player_sacks (id, game_id, player_id, team, sacks, yds) VALUES \
     (1, '200909130nor', 'smitwi99', 'New Orleans Saints', 2.0, 15), \
     (2, '201009090nor', 'smitwi99', 'New Orleans Saints', 1.5, 8), \
     (3, '200901080clt', 'smitwi99', 'New Orleans Saints', 3.0, 20)",
    "INSERT INTO player_interceptions (id, game_id, player_id, team, int_count, yds, avg, lg, td) VALUES \
     (1, '200909130nor', 'sharda21', 'New Orleans Saints', 2, 99, 49.5, 99, 1)",
    "INSERT INTO team_game_stats (id, game_id, team, first_downs, total_yds, pass_yds, \
     rush_yds, turnovers, penalties, penalty_yds, time_of_possession) VALUES \
     (1, '200909130nor', 'Detroit Lions', 20, 380, 260, 120, 2, 7, 55, '26:50'), \
     (2, '200909130nor', 'New Orleans Saints', 28, 515, 358, 157, 1, 5, 40, '33:10'), \
     (3, '200901080clt', 'New Orleans Saints', 15, 450, 400, 50, 0, 3, 20, '31:00'), \
     (4, '201001160nor', 'New Orleans Saints', 22, 400, 247, 153, 0, 4, 30, '32:00'), \
     (5, '201009090nor', 'New Orleans Saints', 20, 300, 237, 63, 1, 6, 50, '30:00')",
    // Inserted out of id order, with quarters that disagree with the ids.
    "INSERT INTO scoring_plays (id, game_id, quarter, time, team, description, away_score, home_score) VALUES \
     (7, '200909130nor', 2, '3:12', 'NOR', 'Colston 12 yard pass from Brees', 7, 21), \
     (2, '200909130nor', 3, '14:55', 'NOR', 'Thomas 1 yard rush', 0, 7), \
     (5, '200909130nor', 1, '0:40', 'DET', 'Field goal', 7, 14)",
    "INSERT INTO draft_picks (id, season, round, pick, overall, player_id, player_name, position, college) VALUES \
     (1, 2006, 1, 2, 2, 'bushre00', 'Reggie Bush', 'RB', 'USC'), \
     (2, 2006, 7, 252, 252, 'colsma00', 'Marques Colston', 'WR', 'Hofstra'), \
     (3, 2007, 1, 27, 27, 'meacro00', 'Robert Meachem', 'WR', 'Tennessee')",
];

/// Create and seed a stats store in a temp file. Returns its path.
pub async fn seeded_path() -> String {
    let temp_file = NamedTempFile::new().unwrap();
    // Keep the file after the handle drops; the read-only client reopens it.
    let path = temp_file
        .into_temp_path()
        .keep()
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let options = SqliteConnectOptions::from_str(&format!("sqlite:{path}"))
        .unwrap()
        .create_if_missing(true);
    let writer = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    for sql in SCHEMA.iter().chain(SEED.iter()) {
        sqlx::query(sql).execute(&writer).await.unwrap();
    }
    writer.close().await;

    path
}

/// A lazily-connected client over a freshly seeded store.
pub async fn seeded_db() -> Arc<Database> {
    let path = seeded_path().await;
    let config = DatabaseConfig::parse(&format!("sqlite:{path}")).unwrap();
    Arc::new(Database::new(config))
}
