//! Rule rejections shared by the server and the client predictor.

use thiserror::Error;

use crate::piece::Color;

/// Every way an action can be refused. All of these are produced before any
/// state is touched, so a rejected action never leaves a partial write.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("Invalid square: {0:?}")]
    InvalidSquare(String),

    #[error("{0}")]
    Validation(String),

    #[error("Not your turn ({to_move} to move)")]
    TurnViolation { to_move: Color },

    #[error("Not your piece")]
    OwnershipViolation,

    #[error("Illegal move: {from}-{to}")]
    InvalidMove { from: String, to: String },

    #[error("Invalid game state: {0}")]
    State(String),

    #[error("Game is already finished")]
    GameFinished,
}

impl RulesError {
    /// Short machine-readable kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RulesError::InvalidSquare(_) => "invalid_square",
            RulesError::Validation(_) => "validation",
            RulesError::TurnViolation { .. } => "turn_violation",
            RulesError::OwnershipViolation => "ownership_violation",
            RulesError::InvalidMove { .. } => "invalid_move",
            RulesError::State(_) => "state",
            RulesError::GameFinished => "game_finished",
        }
    }
}
