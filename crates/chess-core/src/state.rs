//! Canonical game state and the match record the service stores around it.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::board::Board;
use crate::coord::Square;
use crate::error::RulesError;
use crate::piece::{Color, Piece};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSide {
    pub player_id: String,
    #[serde(default)]
    pub username: String,
    /// Remaining clock in milliseconds. Carried, never decremented here.
    #[serde(default)]
    pub time_left: i64,
    #[serde(default)]
    pub captured_pieces: Vec<Piece>,
    /// Profile blob from the session layer, passed through untouched.
    #[serde(default)]
    pub properties: JsonValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Players {
    pub white: PlayerSide,
    pub black: PlayerSide,
}

impl Players {
    pub fn side(&self, color: Color) -> &PlayerSide {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub fn side_mut(&mut self, color: Color) -> &mut PlayerSide {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    pub from: Square,
    pub to: Square,
    pub captured: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Active,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    White,
    Black,
    Draw,
}

impl From<Color> for Winner {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Winner::White,
            Color::Black => Winner::Black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Resignation,
    DrawAgreement,
}

/// Where the match stands, derived from the stored fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    DrawOffered(Color),
    Finished { winner: Winner, reason: EndReason },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub board: Board,
    pub players: Players,
    pub current_turn: Color,
    #[serde(default)]
    pub last_move: Option<LastMove>,
    #[serde(default)]
    pub move_history: Vec<String>,
    #[serde(default)]
    pub game_status: GameStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_reason: Option<EndReason>,
    #[serde(default)]
    pub draw_offer: Option<Color>,
}

impl GameState {
    pub fn phase(&self) -> Phase {
        if self.game_status == GameStatus::Finished {
            return Phase::Finished {
                winner: self.winner.unwrap_or(Winner::Draw),
                reason: self.end_reason.unwrap_or(EndReason::DrawAgreement),
            };
        }
        match self.draw_offer {
            Some(by) => Phase::DrawOffered(by),
            None => Phase::Active,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.game_status == GameStatus::Finished
    }

    /// Parse a state handed in from outside. Anything unreadable is a
    /// `StateError`, never a partial value.
    pub fn from_json(value: JsonValue) -> Result<GameState, RulesError> {
        let state: GameState =
            serde_json::from_value(value).map_err(|e| RulesError::State(e.to_string()))?;
        if state.players.white.player_id.is_empty() || state.players.black.player_id.is_empty() {
            return Err(RulesError::State("player ids are not bound".into()));
        }
        Ok(state)
    }
}

/// Everything the match service keeps per match id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub status: String,
    pub phase: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// When the game reached `finished`, set by the match service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
    pub game_state: GameState,
    #[serde(default)]
    pub metadata: JsonValue,
    #[serde(default)]
    pub presences: Vec<JsonValue>,
    pub size: usize,
    pub label: String,
    pub tick_rate: u32,
}

/// A match record as served to players, tagged with its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot {
    pub match_id: String,
    #[serde(flatten)]
    pub record: MatchRecord,
}
