use axum::{extract::Path, Extension, Json};
use chess_core::setup::{new_match, MatchRules, PlayerSeat};
use chess_core::{gate, movegen, ActionPayload, Envelope, GameState, MatchSnapshot, Square};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::extract::{AppJson, AppQuery};
use crate::store::MatchStore;
use crate::validate;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
    pub players: Vec<PlayerSeat>,
    #[serde(default)]
    pub rules: Option<MatchRules>,
    #[serde(default)]
    pub metadata: Option<JsonValue>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitActionRequest {
    #[serde(default)]
    pub player_id: String,
    #[serde(default)]
    pub action: Option<ActionPayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalMovesQuery {
    pub player_id: String,
}

/// POST /api/matches
pub async fn create_match(
    Extension(store): Extension<MatchStore>,
    AppJson(req): AppJson<CreateMatchRequest>,
) -> Result<Json<Envelope<MatchSnapshot>>, AppError> {
    let seats: [PlayerSeat; 2] = req
        .players
        .try_into()
        .map_err(|_| AppError::BadRequest("A match needs exactly two players".into()))?;
    for seat in &seats {
        validate::player_id(&seat.player_id)?;
        validate::username(&seat.username)?;
    }
    if seats[0].player_id == seats[1].player_id {
        return Err(AppError::BadRequest("Players must be distinct".into()));
    }

    let rules = req.rules.unwrap_or_default();
    let record = new_match(seats, &rules, req.metadata.unwrap_or(JsonValue::Null));
    let match_id = store.insert(record.clone()).await;
    tracing::info!(match_id = %match_id, "Match created");

    Ok(Json(Envelope::ok(MatchSnapshot { match_id, record })))
}

/// GET /api/matches/{match_id}/state
pub async fn get_match_state(
    Extension(store): Extension<MatchStore>,
    Path(match_id): Path<String>,
) -> Result<Json<Envelope<MatchSnapshot>>, AppError> {
    let snapshot = store.snapshot(&match_id).await?;
    Ok(Json(Envelope::ok(snapshot)))
}

/// POST /api/matches/{match_id}/actions
pub async fn submit_action(
    Extension(store): Extension<MatchStore>,
    Path(match_id): Path<String>,
    AppJson(req): AppJson<SubmitActionRequest>,
) -> Result<Json<Envelope<GameState>>, AppError> {
    validate::player_id(&req.player_id)?;
    let action = req
        .action
        .ok_or_else(|| AppError::BadRequest("Missing required field: action".into()))?;
    let action_type = action.action_type.clone().unwrap_or_default();

    match store.apply_action(&match_id, &req.player_id, action).await {
        Ok(state) => {
            tracing::info!(
                match_id = %match_id,
                player_id = %req.player_id,
                action = %action_type,
                moves = state.move_history.len(),
                "Action applied"
            );
            tracing::debug!(match_id = %match_id, board = %state.board.to_fen_placement(), "Board after action");
            Ok(Json(Envelope::ok(state)))
        }
        Err(e) => {
            let kind = match &e {
                AppError::Rules(rules) => rules.kind(),
                AppError::NotFound(_) => "not_found",
                _ => "bad_request",
            };
            tracing::info!(
                match_id = %match_id,
                player_id = %req.player_id,
                action = %action_type,
                kind,
                error = %e,
                "Action rejected"
            );
            Err(e)
        }
    }
}

/// GET /api/matches/{match_id}/moves/{square}?playerId=...
///
/// Destinations to highlight. Empty unless it is this player's turn.
pub async fn get_legal_moves(
    Extension(store): Extension<MatchStore>,
    Path((match_id, square)): Path<(String, String)>,
    AppQuery(q): AppQuery<LegalMovesQuery>,
) -> Result<Json<Envelope<Vec<Square>>>, AppError> {
    let square = Square::parse(&square)?;
    let snapshot = store.snapshot(&match_id).await?;
    let state = &snapshot.record.game_state;
    let color = gate::seat_of(state, &q.player_id)?;

    if state.is_finished() || state.current_turn != color {
        return Ok(Json(Envelope::ok(Vec::new())));
    }
    let moves = movegen::legal_moves(&state.board, square, color);
    Ok(Json(Envelope::ok(moves.into_iter().collect())))
}
