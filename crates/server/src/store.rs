//! Canonical match state, one lock per match.
//!
//! The outer map lock is only held long enough to find or insert a match.
//! Every mutation of a match happens while holding that match's own mutex, so
//! two actions for the same match never interleave while different matches
//! proceed in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use chess_core::{engine, Action, ActionPayload, GameState, MatchRecord, MatchSnapshot};
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};

use crate::error::AppError;

#[derive(Clone, Default)]
pub struct MatchStore {
    matches: Arc<RwLock<HashMap<String, Arc<Mutex<MatchRecord>>>>>,
}

impl MatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly created match and return its id.
    pub async fn insert(&self, record: MatchRecord) -> String {
        let match_id = uuid::Uuid::new_v4().to_string();
        self.matches
            .write()
            .await
            .insert(match_id.clone(), Arc::new(Mutex::new(record)));
        match_id
    }

    async fn entry(&self, match_id: &str) -> Result<Arc<Mutex<MatchRecord>>, AppError> {
        self.matches
            .read()
            .await
            .get(match_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Match {match_id} not found")))
    }

    pub async fn snapshot(&self, match_id: &str) -> Result<MatchSnapshot, AppError> {
        let entry = self.entry(match_id).await?;
        let record = entry.lock().await.clone();
        Ok(MatchSnapshot {
            match_id: match_id.to_string(),
            record,
        })
    }

    /// Validate and commit one action. On any rejection the stored record is
    /// left exactly as it was.
    pub async fn apply_action(
        &self,
        match_id: &str,
        player_id: &str,
        payload: ActionPayload,
    ) -> Result<GameState, AppError> {
        let entry = self.entry(match_id).await?;
        let mut record = entry.lock().await;

        let action = Action::try_from(payload)?;
        let next = engine::apply(&record.game_state, player_id, &action)?;

        if next.is_finished() {
            record.phase = "Finished".to_string();
            record.ended_at.get_or_insert_with(Utc::now);
        }
        record.game_state = next.clone();
        Ok(next)
    }

    /// Drop matches that finished more than `retention` before `now`.
    /// Returns how many were removed.
    pub async fn evict_finished(&self, now: DateTime<Utc>, retention: chrono::Duration) -> usize {
        let mut matches = self.matches.write().await;
        let mut expired = Vec::new();
        for (id, entry) in matches.iter() {
            let record = entry.lock().await;
            if record.ended_at.is_some_and(|ended| now - ended > retention) {
                expired.push(id.clone());
            }
        }
        for id in &expired {
            matches.remove(id);
        }
        expired.len()
    }

    pub async fn len(&self) -> usize {
        self.matches.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
