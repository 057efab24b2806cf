//! Rating-based pairing of waiting tickets.
//!
//! The allowed rating gap widens the longer a ticket waits, and anyone left
//! over after a minute gets paired regardless of rating.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RATING: i32 = 1500;
pub const BASE_RANGE: i32 = 100;
pub const RANGE_STEP: i32 = 50;
pub const RANGE_STEP_SECS: f64 = 10.0;
pub const MAX_RANGE: i32 = 400;
pub const FORCE_PAIR_AFTER_SECS: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingTicket {
    pub id: String,
    #[serde(default)]
    pub rating: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Allowed rating gap after waiting `wait_secs`.
pub fn rating_range(wait_secs: f64) -> i32 {
    let steps = (wait_secs.max(0.0) / RANGE_STEP_SECS).floor() as i32;
    (BASE_RANGE + steps * RANGE_STEP).min(MAX_RANGE)
}

struct Candidate<'a> {
    id: &'a str,
    rating: i32,
    wait_secs: f64,
}

/// Pair tickets as of `now`. Each ticket id appears in at most one pair.
pub fn pair_tickets(tickets: &[WaitingTicket], now: DateTime<Utc>) -> Vec<(String, String)> {
    let mut candidates: Vec<Candidate<'_>> = tickets
        .iter()
        .map(|t| Candidate {
            id: &t.id,
            rating: t.rating.unwrap_or(DEFAULT_RATING),
            wait_secs: (now - t.created_at).num_milliseconds() as f64 / 1000.0,
        })
        .collect();
    // Longest wait first.
    candidates.sort_by(|a, b| b.wait_secs.total_cmp(&a.wait_secs));

    let mut used = vec![false; candidates.len()];
    let mut pairs = Vec::new();

    for i in 0..candidates.len() {
        if used[i] {
            continue;
        }
        let range = rating_range(candidates[i].wait_secs);
        let opponent = (0..candidates.len()).find(|&j| {
            j != i
                && !used[j]
                && candidates[j].id != candidates[i].id
                && (candidates[j].rating - candidates[i].rating).abs() <= range
        });
        if let Some(j) = opponent {
            used[i] = true;
            used[j] = true;
            pairs.push((candidates[i].id.to_string(), candidates[j].id.to_string()));
        }
    }

    let long_waiters: Vec<&Candidate<'_>> = candidates
        .iter()
        .zip(&used)
        .filter(|(c, used)| !**used && c.wait_secs > FORCE_PAIR_AFTER_SECS)
        .map(|(c, _)| c)
        .collect();
    for chunk in long_waiters.chunks_exact(2) {
        pairs.push((chunk[0].id.to_string(), chunk[1].id.to_string()));
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ticket(id: &str, rating: Option<i32>, waited_secs: i64, now: DateTime<Utc>) -> WaitingTicket {
        WaitingTicket {
            id: id.to_string(),
            rating,
            created_at: now - Duration::seconds(waited_secs),
        }
    }

    #[test]
    fn test_rating_range_grows_and_caps() {
        assert_eq!(rating_range(0.0), 100);
        assert_eq!(rating_range(9.9), 100);
        assert_eq!(rating_range(10.0), 150);
        assert_eq!(rating_range(35.0), 250);
        assert_eq!(rating_range(60.0), 400);
        assert_eq!(rating_range(600.0), 400);
    }

    #[test]
    fn test_close_ratings_pair_immediately() {
        let now = Utc::now();
        let pairs = pair_tickets(
            &[ticket("a", Some(1500), 1, now), ticket("b", Some(1580), 0, now)],
            now,
        );
        assert_eq!(pairs, [("a".to_string(), "b".to_string())]);
    }

    #[test]
    fn test_wide_gap_waits_until_range_grows() {
        let now = Utc::now();
        let fresh = [ticket("a", Some(1500), 2, now), ticket("b", Some(1750), 1, now)];
        assert!(pair_tickets(&fresh, now).is_empty());

        let waited = [ticket("a", Some(1500), 31, now), ticket("b", Some(1750), 1, now)];
        assert_eq!(pair_tickets(&waited, now).len(), 1);
    }

    #[test]
    fn test_long_waiters_force_paired() {
        let now = Utc::now();
        let tickets = [
            ticket("low", Some(800), 70, now),
            ticket("high", Some(2400), 65, now),
            ticket("new", Some(3000), 5, now),
        ];
        let pairs = pair_tickets(&tickets, now);
        assert_eq!(pairs, [("low".to_string(), "high".to_string())]);
    }

    #[test]
    fn test_missing_rating_defaults() {
        let now = Utc::now();
        let pairs = pair_tickets(
            &[ticket("a", None, 3, now), ticket("b", Some(1550), 2, now)],
            now,
        );
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn test_each_ticket_used_once() {
        let now = Utc::now();
        let tickets: Vec<_> = (0..5)
            .map(|i| ticket(&format!("t{i}"), Some(1500 + i * 10), i as i64, now))
            .collect();
        let pairs = pair_tickets(&tickets, now);
        assert_eq!(pairs.len(), 2);
        let mut seen: Vec<&str> = pairs.iter().flat_map(|(a, b)| [a.as_str(), b.as_str()]).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 4);
    }
}
