//! Cooperative polling of the authoritative match state.
//!
//! The loop reads its liveness flag before every fetch and before every
//! reschedule. Once [`PollHandle::stop`] has been called no further fetch is
//! issued; a fetch already in flight finishes but its result is discarded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chess_core::MatchSnapshot;

use crate::config::ClientConfig;
use crate::transport::MatchTransport;

/// Poll delay: reset to `base` on success, doubled up to `max` on failure.
#[derive(Debug, Clone)]
pub struct Backoff {
    base: Duration,
    max: Duration,
    current: Duration,
}

impl Backoff {
    pub fn new(base: Duration, max: Duration) -> Self {
        Self {
            base,
            max,
            current: base,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.poll_base, config.poll_max)
    }

    pub fn delay(&self) -> Duration {
        self.current
    }

    pub fn succeed(&mut self) {
        self.current = self.base;
    }

    pub fn fail(&mut self) {
        self.current = (self.current * 2).min(self.max);
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_millis(5000))
    }
}

/// Shared liveness flag for a poll loop.
#[derive(Debug, Clone)]
pub struct PollHandle {
    alive: Arc<AtomicBool>,
}

impl PollHandle {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    pub fn stop(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

impl Default for PollHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch the match state until `handle` is stopped, handing each snapshot to
/// `on_snapshot`. Fetch errors are logged and only lengthen the delay.
pub async fn poll_match<T, F>(
    transport: &T,
    match_id: &str,
    handle: &PollHandle,
    mut backoff: Backoff,
    mut on_snapshot: F,
) where
    T: MatchTransport,
    F: FnMut(MatchSnapshot),
{
    loop {
        if !handle.is_alive() {
            break;
        }
        match transport.get_match_state(match_id).await {
            Ok(snapshot) => {
                backoff.succeed();
                if !handle.is_alive() {
                    break;
                }
                on_snapshot(snapshot);
            }
            Err(e) => {
                backoff.fail();
                tracing::warn!(match_id, delay_ms = backoff.delay().as_millis() as u64, "Poll failed: {e}");
            }
        }
        if !handle.is_alive() {
            break;
        }
        tokio::time::sleep(backoff.delay()).await;
    }
    tracing::debug!(match_id, "Polling stopped");
}

/// Run [`poll_match`] on a background task and return its handle.
pub fn spawn_poll<T, F>(
    transport: Arc<T>,
    match_id: String,
    backoff: Backoff,
    on_snapshot: F,
) -> PollHandle
where
    T: MatchTransport + 'static,
    F: FnMut(MatchSnapshot) + Send + 'static,
{
    let handle = PollHandle::new();
    tokio::spawn({
        let handle = handle.clone();
        async move {
            poll_match(transport.as_ref(), &match_id, &handle, backoff, on_snapshot).await;
        }
    });
    handle
}
