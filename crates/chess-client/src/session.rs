//! One player's view of one match: predictor and transport together.

use chess_core::{Action, GameState, Square};

use crate::error::ClientError;
use crate::poll::PollHandle;
use crate::predictor::{ClickOutcome, Predictor};
use crate::transport::MatchTransport;

pub struct MatchSession<T> {
    transport: T,
    match_id: String,
    predictor: Predictor,
    liveness: PollHandle,
}

impl<T: MatchTransport> MatchSession<T> {
    /// Fetch the current state of `match_id` and start a session on it.
    pub async fn join(
        transport: T,
        match_id: impl Into<String>,
        player_id: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let match_id = match_id.into();
        let snapshot = transport.get_match_state(&match_id).await?;
        Ok(Self {
            transport,
            match_id,
            predictor: Predictor::new(player_id, snapshot),
            liveness: PollHandle::new(),
        })
    }

    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Liveness flag shared with the poll loop feeding this session.
    pub fn liveness(&self) -> PollHandle {
        self.liveness.clone()
    }

    /// Leave the match. Polling stops and nothing more is submitted.
    pub fn close(&self) {
        self.liveness.stop();
    }

    /// Check `action` locally, then send it. A local rejection is returned
    /// without contacting the service. On success the echoed state replaces
    /// the local copy; a server rejection leaves it for the next poll to fix.
    pub async fn submit(&mut self, action: Action) -> Result<GameState, ClientError> {
        if !self.liveness.is_alive() {
            return Err(ClientError::Stopped);
        }
        self.predictor.predict(&action)?;

        let player_id = self.predictor.player_id().to_string();
        let state = self
            .transport
            .submit_action(&self.match_id, &player_id, action)
            .await?;
        self.predictor.replace_state(state.clone());
        Ok(state)
    }

    /// Feed a board click to the predictor, submitting the move it produces.
    pub async fn click(&mut self, square: Square) -> Result<ClickOutcome, ClientError> {
        let outcome = self.predictor.click(square);
        if let ClickOutcome::Submit(action) = &outcome {
            self.submit(*action).await?;
        }
        Ok(outcome)
    }

    /// Pull the authoritative state once.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        if !self.liveness.is_alive() {
            return Err(ClientError::Stopped);
        }
        let snapshot = self.transport.get_match_state(&self.match_id).await?;
        self.predictor.replace(snapshot);
        Ok(())
    }
}
