//! The transition engine: one action in, the next state (or a rejection) out.
//!
//! `apply` never mutates its input. All checks finish before the copy that
//! becomes the next state is touched, so a rejection leaves the caller's value
//! exactly as it was.

use crate::action::Action;
use crate::coord::Square;
use crate::error::RulesError;
use crate::gate;
use crate::movegen;
use crate::piece::Color;
use crate::state::{EndReason, GameState, GameStatus, LastMove, Winner};

/// Apply `action` by `player_id` to `state`.
pub fn apply(state: &GameState, player_id: &str, action: &Action) -> Result<GameState, RulesError> {
    let color = gate::authorize(state, player_id, action)?;

    match *action {
        Action::Move { from, to, .. } => {
            ensure_not_finished(state)?;
            if !movegen::is_legal(&state.board, from, to, color) {
                return Err(RulesError::InvalidMove {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
            let mut next = state.clone();
            apply_move(&mut next, color, from, to);
            Ok(next)
        }
        Action::Resign => {
            // Accepted in any phase, including after the game has ended.
            let mut next = state.clone();
            next.game_status = GameStatus::Finished;
            next.winner = Some(Winner::from(color.opponent()));
            next.end_reason = Some(EndReason::Resignation);
            Ok(next)
        }
        Action::DrawOffer => {
            ensure_not_finished(state)?;
            let mut next = state.clone();
            next.draw_offer = Some(color);
            Ok(next)
        }
        Action::DrawAccept => {
            ensure_not_finished(state)?;
            let mut next = state.clone();
            if answers_open_offer(state, color) {
                next.game_status = GameStatus::Finished;
                next.winner = Some(Winner::Draw);
                next.end_reason = Some(EndReason::DrawAgreement);
                next.draw_offer = None;
            }
            Ok(next)
        }
        Action::DrawDecline => {
            ensure_not_finished(state)?;
            let mut next = state.clone();
            if answers_open_offer(state, color) {
                next.draw_offer = None;
            }
            Ok(next)
        }
    }
}

fn ensure_not_finished(state: &GameState) -> Result<(), RulesError> {
    if state.is_finished() {
        Err(RulesError::GameFinished)
    } else {
        Ok(())
    }
}

/// An accept or decline only counts when an offer is open and came from the
/// other side.
fn answers_open_offer(state: &GameState, color: Color) -> bool {
    matches!(state.draw_offer, Some(offeror) if offeror != color)
}

/// Commit an approved move. No legality checks happen here.
fn apply_move(state: &mut GameState, color: Color, from: Square, to: Square) {
    let Some(piece) = state.board.take(from) else {
        return;
    };
    let captured = state.board.take(to);
    if let Some(victim) = captured {
        state.players.side_mut(color).captured_pieces.push(victim);
    }
    state.board.set(to, Some(piece));

    state.current_turn = color.opponent();
    state.last_move = Some(LastMove {
        from,
        to,
        captured: captured.is_some(),
    });
    state.move_history.push(format!("{}{}-{}", piece.code(), from, to));
}
