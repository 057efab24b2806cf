//! Match creation: bind two players to colors and lay out the opening position.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::board::Board;
use crate::piece::Color;
use crate::state::{GameState, GameStatus, MatchRecord, PlayerSide, Players};

pub const DEFAULT_INITIAL_MS: i64 = 600_000;
pub const DEFAULT_INCREMENT_MS: i64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeControl {
    pub initial: i64,
    #[serde(default)]
    pub increment: i64,
}

impl Default for TimeControl {
    fn default() -> Self {
        Self {
            initial: DEFAULT_INITIAL_MS,
            increment: DEFAULT_INCREMENT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRules {
    #[serde(default)]
    pub time_control: TimeControl,
    #[serde(default = "default_tick_rate")]
    pub tick_rate: u32,
    #[serde(default = "default_game_mode")]
    pub game_mode: String,
}

fn default_tick_rate() -> u32 {
    1
}

fn default_game_mode() -> String {
    "standard".to_string()
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            time_control: TimeControl::default(),
            tick_rate: default_tick_rate(),
            game_mode: default_game_mode(),
        }
    }
}

/// A player entering a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSeat {
    pub player_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub properties: JsonValue,
}

impl PlayerSeat {
    pub fn new(player_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            username: username.into(),
            properties: JsonValue::Null,
        }
    }

    fn into_side(self, time_left: i64) -> PlayerSide {
        PlayerSide {
            player_id: self.player_id,
            username: self.username,
            time_left,
            captured_pieces: Vec::new(),
            properties: self.properties,
        }
    }
}

/// Fresh game state: standard position, white to move, nothing played.
/// The first seat plays white.
pub fn initial_state(players: [PlayerSeat; 2], rules: &MatchRules) -> GameState {
    let [white, black] = players;
    let clock = rules.time_control.initial;
    GameState {
        board: Board::standard(),
        players: Players {
            white: white.into_side(clock),
            black: black.into_side(clock),
        },
        current_turn: Color::White,
        last_move: None,
        move_history: Vec::new(),
        game_status: GameStatus::Active,
        winner: None,
        end_reason: None,
        draw_offer: None,
    }
}

/// Wrap a fresh game state in the record the match service stores.
pub fn new_match(players: [PlayerSeat; 2], rules: &MatchRules, metadata: JsonValue) -> MatchRecord {
    MatchRecord {
        status: "Ready".to_string(),
        phase: "Playing".to_string(),
        started_at: chrono::Utc::now(),
        ended_at: None,
        game_state: initial_state(players, rules),
        metadata,
        presences: Vec::new(),
        size: 2,
        label: rules.game_mode.clone(),
        tick_rate: rules.tick_rate,
    }
}
