#![allow(dead_code)]

use duel_server::config::Config;
use duel_server::matchmaking::MatchmakingQueue;
use duel_server::store::MatchStore;
use reqwest::Client;
use serde_json::{json, Value};

/// A server running in-process on an ephemeral port.
pub struct TestApp {
    pub base_url: String,
    pub client: Client,
    pub store: MatchStore,
}

impl TestApp {
    /// Build a URL for an API endpoint.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request")
    }

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request")
    }

    /// Create a match between `w1` (white) and `b1` (black); return its id.
    pub async fn create_match(&self) -> String {
        let resp = self
            .post(
                "/api/matches",
                &json!({
                    "players": [
                        {"playerId": "w1", "username": "ana"},
                        {"playerId": "b1", "username": "bo"}
                    ]
                }),
            )
            .await;
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body["data"]["matchId"].as_str().unwrap().to_string()
    }

    pub async fn act(&self, match_id: &str, player_id: &str, action: Value) -> reqwest::Response {
        self.post(
            &format!("/api/matches/{match_id}/actions"),
            &json!({"playerId": player_id, "action": action}),
        )
        .await
    }

    pub async fn state(&self, match_id: &str) -> Value {
        let resp = self.get(&format!("/api/matches/{match_id}/state")).await;
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body["data"].clone()
    }
}

/// Start the router on 127.0.0.1 with a fresh store. The background
/// matchmaking task is not started; tests drive pairing explicitly.
pub async fn spawn_app() -> TestApp {
    let config = Config::default();
    let store = MatchStore::new();
    let queue = MatchmakingQueue::new(config.ticket_ttl, config.queue_rules());
    let app = duel_server::app(store.clone(), queue, config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        base_url: format!("http://{addr}"),
        client: Client::new(),
        store,
    }
}
