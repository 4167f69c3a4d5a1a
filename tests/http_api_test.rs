//! `GET /api/stats` driven through the router without a socket.

mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use common::*;
use saints_encyclopedia::api;
use saints_encyclopedia::models::StatCategory;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

async fn get(db: &Arc<saints_encyclopedia::Database>, query: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(format!("{}{}", api::STATS_PATH, query))
        .body(Body::empty())
        .unwrap();
    let response = api::router(db.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_every_pair_returns_an_array() {
    let db = seeded_db().await;
    for scope in ["career", "season", "game"] {
        for category in StatCategory::ALL {
            let (status, body) =
                get(&db, &format!("?scope={scope}&category={}", category.as_str())).await;
            assert_eq!(status, StatusCode::OK, "{scope}/{category}");
            assert!(body.is_array(), "{scope}/{category}");
        }
    }
}

#[tokio::test]
async fn test_career_passing() {
    let db = seeded_db().await;
    let (status, body) = get(&db, "?scope=career&category=passing").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["player_name"], json!("Drew Brees"));
    assert_eq!(rows[0]["yds"], json!(1201));
}

#[tokio::test]
async fn test_single_game_passing_excludes_preseason() {
    let db = seeded_db().await;
    let (_, body) = get(&db, "?scope=game&category=passing").await;

    let rows = body.as_array().unwrap();
    assert!(rows.iter().all(|r| r["game_type"] != json!("preseason")));
    assert!(rows.iter().any(|r| r["game_type"] == json!("playoff")));
    assert_eq!(rows[0]["yds"], json!(358));
}

#[tokio::test]
async fn test_single_game_defense_is_sacks_only() {
    let db = seeded_db().await;
    let (status, body) = get(&db, "?scope=game&category=defense").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["player_name"], json!("Will Smith"));
    assert_eq!(rows[0]["sacks"], json!(2.0));
    assert!(rows[0].get("tackles").is_none());
}

#[tokio::test]
async fn test_pair_matching_ignores_case() {
    let db = seeded_db().await;
    let (status, body) = get(&db, "?scope=Season&category=RUSHING").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["player_name"], json!("Pierre Thomas"));
}

#[tokio::test]
async fn test_unknown_pair_is_bad_request() {
    let db = seeded_db().await;

    let (status, body) = get(&db, "?scope=week&category=passing").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("week/passing"));
    assert_eq!(body["field"], "scope");

    let (status, body) = get(&db, "?scope=career&category=kicking").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "category");

    let (status, body) = get(&db, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("error").is_some());
    assert!(!db.is_connected());
}
