use axum::{extract::Path, Extension, Json};
use chess_core::Envelope;
use chrono::Utc;
use serde::Deserialize;

use crate::error::AppError;
use crate::extract::AppJson;
use crate::matchmaking::{MatchmakingQueue, PairedMatch, Ticket};
use crate::store::MatchStore;
use crate::validate;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    pub player_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub rating: Option<i32>,
}

/// POST /api/matchmaking/tickets
pub async fn create_ticket(
    Extension(queue): Extension<MatchmakingQueue>,
    AppJson(req): AppJson<CreateTicketRequest>,
) -> Result<Json<Envelope<Ticket>>, AppError> {
    validate::player_id(&req.player_id)?;
    validate::username(&req.username)?;
    validate::rating(req.rating)?;

    let ticket = queue.enqueue(&req.player_id, &req.username, req.rating).await;
    tracing::info!(ticket_id = %ticket.id, player_id = %ticket.player_id, "Ticket queued");
    Ok(Json(Envelope::ok(ticket)))
}

/// GET /api/matchmaking/tickets/{ticket_id}
pub async fn get_ticket(
    Extension(queue): Extension<MatchmakingQueue>,
    Path(ticket_id): Path<String>,
) -> Result<Json<Envelope<Ticket>>, AppError> {
    let ticket = queue
        .get(&ticket_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Ticket {ticket_id} not found")))?;
    Ok(Json(Envelope::ok(ticket)))
}

/// POST /api/matchmaking/process
///
/// Runs one pairing pass immediately instead of waiting for the next tick.
pub async fn process(
    Extension(queue): Extension<MatchmakingQueue>,
    Extension(store): Extension<MatchStore>,
) -> Json<Envelope<Vec<PairedMatch>>> {
    let created = queue.process(&store, Utc::now()).await;
    Json(Envelope::ok(created))
}
