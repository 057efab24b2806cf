//! Player-side half of a match: a predictor that mirrors the server's rules
//! for instant feedback, a transport to the match service and the poll loop
//! that keeps the local copy in sync.

pub mod config;
pub mod error;
pub mod poll;
pub mod predictor;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod fake;

pub use config::ClientConfig;
pub use error::ClientError;
pub use poll::{poll_match, spawn_poll, Backoff, PollHandle};
pub use predictor::{ClickOutcome, Predictor};
pub use session::MatchSession;
pub use transport::{HttpTransport, MatchTransport};
