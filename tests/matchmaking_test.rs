//! Integration tests for the matchmaking endpoints.

mod common;

use serde_json::{json, Value};

async fn queue(app: &common::TestApp, player_id: &str, rating: Option<i32>) -> Value {
    let resp = app
        .post(
            "/api/matchmaking/tickets",
            &json!({"playerId": player_id, "username": player_id, "rating": rating}),
        )
        .await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    body["data"].clone()
}

#[tokio::test]
async fn test_close_ratings_are_paired_into_a_match() {
    let app = common::spawn_app().await;
    let a = queue(&app, "p1", Some(1500)).await;
    let b = queue(&app, "p2", Some(1550)).await;
    assert_eq!(a["status"], "waiting");

    let resp = app.post("/api/matchmaking/process", &json!({})).await;
    let body: Value = resp.json().await.unwrap();
    let created = body["data"].as_array().unwrap();
    assert_eq!(created.len(), 1);
    let match_id = created[0]["matchId"].as_str().unwrap().to_string();

    for ticket in [&a, &b] {
        let id = ticket["id"].as_str().unwrap();
        let resp = app.get(&format!("/api/matchmaking/tickets/{id}")).await;
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["data"]["status"], "matched");
        assert_eq!(body["data"]["matchId"], match_id.as_str());
    }

    let state = app.state(&match_id).await;
    assert_eq!(state["metadata"]["source"], "matchmaking");
    assert_eq!(state["gameState"]["gameStatus"], "active");
}

#[tokio::test]
async fn test_distant_ratings_wait() {
    let app = common::spawn_app().await;
    queue(&app, "p1", Some(1000)).await;
    queue(&app, "p2", Some(2000)).await;

    let resp = app.post("/api/matchmaking/process", &json!({})).await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"], json!([]));
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_ticket_validation() {
    let app = common::spawn_app().await;
    let resp = app
        .post("/api/matchmaking/tickets", &json!({"playerId": "bad id!", "username": "x"}))
        .await;
    assert_eq!(resp.status(), 400);

    let resp = app
        .post("/api/matchmaking/tickets", &json!({"playerId": "p1", "rating": 99999}))
        .await;
    assert_eq!(resp.status(), 400);

    let resp = app.get("/api/matchmaking/tickets/missing").await;
    assert_eq!(resp.status(), 404);
}
