use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    /// Upper bound on any single request to the match service.
    pub request_timeout: Duration,
    pub poll_base: Duration,
    pub poll_max: Duration,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("DUEL_API_URL").unwrap_or(defaults.base_url),
            request_timeout: env::var("DUEL_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.request_timeout),
            ..defaults
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout: Duration::from_secs(10),
            poll_base: Duration::from_millis(500),
            poll_max: Duration::from_millis(5000),
        }
    }
}
