//! Waiting tickets and the pass that turns pairs of them into matches.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chess_core::pairing::{pair_tickets, WaitingTicket};
use chess_core::setup::{new_match, MatchRules, PlayerSeat};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::store::MatchStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Waiting,
    Matched,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub player_id: String,
    pub username: String,
    pub rating: Option<i32>,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub match_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairedMatch {
    pub match_id: String,
    pub white_ticket: String,
    pub black_ticket: String,
}

#[derive(Clone)]
pub struct MatchmakingQueue {
    tickets: Arc<Mutex<HashMap<String, Ticket>>>,
    ttl: Duration,
    rules: MatchRules,
}

impl MatchmakingQueue {
    pub fn new(ttl: Duration, rules: MatchRules) -> Self {
        Self {
            tickets: Arc::new(Mutex::new(HashMap::new())),
            ttl,
            rules,
        }
    }

    /// Queue a player. A player who already has a waiting ticket gets that
    /// ticket back instead of a second one.
    pub async fn enqueue(&self, player_id: &str, username: &str, rating: Option<i32>) -> Ticket {
        let mut tickets = self.tickets.lock().await;
        if let Some(existing) = tickets
            .values()
            .find(|t| t.player_id == player_id && t.status == TicketStatus::Waiting)
        {
            return existing.clone();
        }

        let ticket = Ticket {
            id: uuid::Uuid::new_v4().to_string(),
            player_id: player_id.to_string(),
            username: username.to_string(),
            rating,
            status: TicketStatus::Waiting,
            created_at: Utc::now(),
            match_id: None,
            matched_at: None,
        };
        tickets.insert(ticket.id.clone(), ticket.clone());
        ticket
    }

    pub async fn get(&self, ticket_id: &str) -> Option<Ticket> {
        self.tickets.lock().await.get(ticket_id).cloned()
    }

    /// Drop stale tickets, pair the rest and create a match for each pair.
    /// The longer-waiting ticket of a pair plays white. Waiting tickets expire
    /// `ttl` after creation and matched ones `ttl` after they were paired.
    pub async fn process(&self, store: &MatchStore, now: DateTime<Utc>) -> Vec<PairedMatch> {
        let mut tickets = self.tickets.lock().await;

        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or_else(|_| chrono::Duration::days(365));
        let before = tickets.len();
        tickets.retain(|_, t| {
            let since = match t.status {
                TicketStatus::Waiting => t.created_at,
                TicketStatus::Matched => t.matched_at.unwrap_or(t.created_at),
            };
            now - since <= ttl
        });
        let expired = before - tickets.len();
        if expired > 0 {
            tracing::info!(expired, "Expired tickets");
        }

        let waiting: Vec<WaitingTicket> = tickets
            .values()
            .filter(|t| t.status == TicketStatus::Waiting)
            .map(|t| WaitingTicket {
                id: t.id.clone(),
                rating: t.rating,
                created_at: t.created_at,
            })
            .collect();

        let mut created = Vec::new();
        for (white_id, black_id) in pair_tickets(&waiting, now) {
            let (Some(white), Some(black)) = (tickets.get(&white_id), tickets.get(&black_id)) else {
                continue;
            };
            let seats = [seat_for(white), seat_for(black)];
            let record = new_match(seats, &self.rules, serde_json::json!({ "source": "matchmaking" }));
            let match_id = store.insert(record).await;

            for id in [&white_id, &black_id] {
                if let Some(ticket) = tickets.get_mut(id) {
                    ticket.status = TicketStatus::Matched;
                    ticket.match_id = Some(match_id.clone());
                    ticket.matched_at = Some(now);
                }
            }
            tracing::info!(match_id = %match_id, white = %white_id, black = %black_id, "Paired tickets");
            created.push(PairedMatch {
                match_id,
                white_ticket: white_id,
                black_ticket: black_id,
            });
        }
        created
    }
}

fn seat_for(ticket: &Ticket) -> PlayerSeat {
    PlayerSeat {
        player_id: ticket.player_id.clone(),
        username: ticket.username.clone(),
        properties: serde_json::json!({
            "ticketId": ticket.id,
            "rating": ticket.rating,
        }),
    }
}
