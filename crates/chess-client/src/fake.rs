//! In-memory match service for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chess_core::setup::{new_match, MatchRules, PlayerSeat};
use chess_core::{engine, Action, GameState, MatchSnapshot};
use tokio::time::Instant;

use crate::error::ClientError;
use crate::transport::MatchTransport;

pub struct FakeService {
    pub snapshot: Mutex<MatchSnapshot>,
    /// Number of upcoming fetches that fail before fetches succeed again.
    pub failures_left: AtomicUsize,
    pub fetches: Mutex<Vec<Instant>>,
    pub submits: AtomicUsize,
}

impl FakeService {
    pub fn new() -> Self {
        let record = new_match(
            [PlayerSeat::new("w1", "ana"), PlayerSeat::new("b1", "bo")],
            &MatchRules::default(),
            serde_json::Value::Null,
        );
        Self {
            snapshot: Mutex::new(MatchSnapshot {
                match_id: "m1".to_string(),
                record,
            }),
            failures_left: AtomicUsize::new(0),
            fetches: Mutex::new(Vec::new()),
            submits: AtomicUsize::new(0),
        }
    }

    pub fn failing(times: usize) -> Self {
        let fake = Self::new();
        fake.failures_left.store(times, Ordering::SeqCst);
        fake
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }

    /// Apply an action as the other player would, bypassing the client.
    pub fn play(&self, player_id: &str, action: Action) {
        let mut snap = self.snapshot.lock().unwrap();
        snap.record.game_state = engine::apply(&snap.record.game_state, player_id, &action).unwrap();
    }
}

impl MatchTransport for FakeService {
    async fn get_match_state(&self, _match_id: &str) -> Result<MatchSnapshot, ClientError> {
        self.fetches.lock().unwrap().push(Instant::now());
        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(ClientError::Rejected("service unavailable".into()));
        }
        Ok(self.snapshot.lock().unwrap().clone())
    }

    async fn submit_action(
        &self,
        _match_id: &str,
        player_id: &str,
        action: Action,
    ) -> Result<GameState, ClientError> {
        self.submits.fetch_add(1, Ordering::SeqCst);
        let mut snap = self.snapshot.lock().unwrap();
        let next = engine::apply(&snap.record.game_state, player_id, &action)?;
        snap.record.game_state = next.clone();
        Ok(next)
    }
}
