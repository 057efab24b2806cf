use chess_core::RulesError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with `isSuccess: false`.
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error("Polling stopped")]
    Stopped,
}
