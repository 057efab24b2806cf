//! How the client reaches the match service.

use std::future::Future;

use chess_core::{Action, ActionPayload, Envelope, GameState, MatchSnapshot};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ClientError;

pub trait MatchTransport: Send + Sync {
    fn get_match_state(
        &self,
        match_id: &str,
    ) -> impl Future<Output = Result<MatchSnapshot, ClientError>> + Send;

    fn submit_action(
        &self,
        match_id: &str,
        player_id: &str,
        action: Action,
    ) -> impl Future<Output = Result<GameState, ClientError>> + Send;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitBody<'a> {
    player_id: &'a str,
    action: ActionPayload,
}

/// Talks to the HTTP routes of the match service.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent("DuelChess/1.0")
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    // Every route answers with an envelope, whatever the status code. Anything
    // else (a proxy error page, say) is reported with its status.
    async fn unwrap_envelope<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        let body = resp.text().await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)
            .map_err(|_| ClientError::Rejected(format!("HTTP {status}: {body}")))?;
        envelope.into_result().map_err(|message| {
            tracing::debug!(%status, %message, "Match service rejected request");
            ClientError::Rejected(message)
        })
    }
}

impl MatchTransport for HttpTransport {
    async fn get_match_state(&self, match_id: &str) -> Result<MatchSnapshot, ClientError> {
        let url = format!("{}/api/matches/{}/state", self.base_url, match_id);
        let resp = self.client.get(&url).send().await?;
        Self::unwrap_envelope(resp).await
    }

    async fn submit_action(
        &self,
        match_id: &str,
        player_id: &str,
        action: Action,
    ) -> Result<GameState, ClientError> {
        let url = format!("{}/api/matches/{}/actions", self.base_url, match_id);
        let body = SubmitBody {
            player_id,
            action: action.into(),
        };
        let resp = self.client.post(&url).json(&body).send().await?;
        Self::unwrap_envelope(resp).await
    }
}
