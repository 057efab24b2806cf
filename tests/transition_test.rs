//! Integration tests for the stateless transition function.

mod common;

use chess_core::setup::{initial_state, MatchRules, PlayerSeat};
use serde_json::{json, Value};

fn fresh_state() -> Value {
    let state = initial_state(
        [PlayerSeat::new("w1", "ana"), PlayerSeat::new("b1", "bo")],
        &MatchRules::default(),
    );
    serde_json::to_value(state).unwrap()
}

#[tokio::test]
async fn test_transition_applies_move() {
    let app = common::spawn_app().await;
    let resp = app
        .post(
            "/api/functions/transition",
            &json!({
                "matchId": "m1",
                "playerId": "w1",
                "action": {"actionType": "move", "from": "g1", "to": "f3"},
                "state": fresh_state(),
            }),
        )
        .await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["isSuccess"], true);
    assert_eq!(body["data"]["board"][5][5], "N");
    assert_eq!(body["data"]["moveHistory"], json!(["Ng1-f3"]));
    // Nothing is stored.
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_transition_rejections_are_400() {
    let app = common::spawn_app().await;

    let resp = app
        .post(
            "/api/functions/transition",
            &json!({
                "matchId": "m1",
                "playerId": "b1",
                "action": {"actionType": "move", "from": "g8", "to": "f6"},
                "state": fresh_state(),
            }),
        )
        .await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["messageText"], "Not your turn (white to move)");

    let resp = app
        .post(
            "/api/functions/transition",
            &json!({"matchId": "m1", "playerId": "w1", "action": {"actionType": "resign"}}),
        )
        .await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["isSuccess"], false);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_unknown_action_type_is_enveloped() {
    let app = common::spawn_app().await;
    let resp = app
        .post(
            "/api/functions/transition",
            &json!({
                "matchId": "m1",
                "playerId": "w1",
                "action": {"actionType": "castle"},
                "state": fresh_state(),
            }),
        )
        .await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["isSuccess"], false);
    assert_eq!(body["messageText"], "Invalid action type");
}

#[tokio::test]
async fn test_record_from_state_endpoint_is_accepted() {
    let app = common::spawn_app().await;
    let id = app.create_match().await;
    let record = app.state(&id).await;

    let resp = app
        .post(
            "/api/functions/transition",
            &json!({
                "matchId": id,
                "playerId": "w1",
                "action": {"actionType": "move", "from": "e2", "to": "e4"},
                "state": record,
            }),
        )
        .await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["moveHistory"], json!(["Pe2-e4"]));
    // The stored match is untouched.
    assert_eq!(app.state(&id).await["gameState"]["moveHistory"], json!([]));
}
