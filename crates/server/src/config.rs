use std::env;
use std::time::Duration;

use chess_core::setup::{MatchRules, TimeControl, DEFAULT_INCREMENT_MS, DEFAULT_INITIAL_MS};

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// How often the background task pairs waiting tickets.
    pub matchmaking_interval: Duration,
    /// Unpaired tickets older than this are dropped.
    pub ticket_ttl: Duration,
    /// Finished matches are dropped from memory this long after they end.
    pub match_retention: Duration,
    pub initial_ms: i64,
    pub increment_ms: i64,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_or("PORT", 8000),
            matchmaking_interval: Duration::from_secs(env_or("MATCHMAKING_INTERVAL_SECS", 2)),
            ticket_ttl: Duration::from_secs(env_or("TICKET_TTL_SECS", 300)),
            match_retention: Duration::from_secs(env_or("MATCH_RETENTION_SECS", 3600)),
            initial_ms: env_or("DEFAULT_INITIAL_MS", DEFAULT_INITIAL_MS),
            increment_ms: env_or("DEFAULT_INCREMENT_MS", DEFAULT_INCREMENT_MS),
        }
    }

    /// Rules for matches created by the matchmaking queue.
    pub fn queue_rules(&self) -> MatchRules {
        MatchRules {
            time_control: TimeControl {
                initial: self.initial_ms,
                increment: self.increment_ms,
            },
            ..MatchRules::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            matchmaking_interval: Duration::from_secs(2),
            ticket_ttl: Duration::from_secs(300),
            match_retention: Duration::from_secs(3600),
            initial_ms: DEFAULT_INITIAL_MS,
            increment_ms: DEFAULT_INCREMENT_MS,
        }
    }
}
