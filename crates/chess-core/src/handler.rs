//! The transition handler: a self-contained request in, an envelope out.
//!
//! This is the one entry point for "validate and apply an action against a
//! state that arrives with the request". The match service and the client
//! predictor both go through [`engine::apply`], so there is no second copy of
//! the rules anywhere.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::action::{Action, ActionPayload};
use crate::engine;
use crate::envelope::Envelope;
use crate::error::RulesError;
use crate::state::GameState;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRequest {
    #[serde(default)]
    pub match_id: Option<String>,
    #[serde(default)]
    pub player_id: Option<String>,
    #[serde(default)]
    pub action: Option<ActionPayload>,
    #[serde(default)]
    pub state: Option<JsonValue>,
}

fn required<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str, RulesError> {
    field
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| RulesError::Validation(format!("Missing required field: {name}")))
}

fn decode_encoded(value: JsonValue) -> Result<JsonValue, RulesError> {
    match value {
        JsonValue::String(encoded) => {
            serde_json::from_str(&encoded).map_err(|e| RulesError::State(e.to_string()))
        }
        other => Ok(other),
    }
}

/// Accepts either a bare game state or a match record carrying one under
/// `gameState`. Either level may arrive as an encoded JSON string.
fn decode_state(value: Option<JsonValue>) -> Result<GameState, RulesError> {
    let value = match value {
        Some(JsonValue::Null) | None => {
            return Err(RulesError::State("Missing required field: state".into()))
        }
        Some(value) => decode_encoded(value)?,
    };
    let inner = match value {
        JsonValue::Object(mut record) if record.contains_key("gameState") => {
            decode_encoded(record.remove("gameState").unwrap_or(JsonValue::Null))?
        }
        bare => bare,
    };
    GameState::from_json(inner)
}

/// Check the request fields, decode the state and run the engine.
pub fn transition(request: TransitionRequest) -> Result<GameState, RulesError> {
    let state = decode_state(request.state)?;
    let payload = request
        .action
        .ok_or_else(|| RulesError::Validation("Missing required field: action".into()))?;
    let player_id = required(&request.player_id, "playerId")?;
    required(&request.match_id, "matchId")?;

    let action = Action::try_from(payload)?;
    engine::apply(&state, player_id, &action)
}

/// [`transition`] rendered into the response envelope.
pub fn handle(request: TransitionRequest) -> Envelope<GameState> {
    transition(request).into()
}
