//! Turn and ownership checks, run before anything is written.

use crate::action::Action;
use crate::error::RulesError;
use crate::piece::Color;
use crate::state::GameState;

/// Color the player is seated as.
pub fn seat_of(state: &GameState, player_id: &str) -> Result<Color, RulesError> {
    if state.players.white.player_id == player_id {
        Ok(Color::White)
    } else if state.players.black.player_id == player_id {
        Ok(Color::Black)
    } else {
        Err(RulesError::Validation(format!(
            "Player {player_id:?} is not seated in this match"
        )))
    }
}

/// Check that `player_id` may perform `action` and return their color.
///
/// Moves must come from the side to move and start on one of its own pieces.
/// Resign and draw actions only need a seat.
pub fn authorize(state: &GameState, player_id: &str, action: &Action) -> Result<Color, RulesError> {
    let color = seat_of(state, player_id)?;

    if let Action::Move { from, .. } = action {
        if state.current_turn != color {
            return Err(RulesError::TurnViolation {
                to_move: state.current_turn,
            });
        }
        match state.board.piece_at(*from) {
            Some(piece) if piece.color == color => {}
            _ => return Err(RulesError::OwnershipViolation),
        }
    }

    Ok(color)
}
