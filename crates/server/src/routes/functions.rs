use axum::{http::StatusCode, response::IntoResponse, Json};
use chess_core::handler::{self, TransitionRequest};

use crate::extract::AppJson;

/// POST /api/functions/transition
///
/// Stateless: the caller supplies the state, nothing is stored. Every
/// rejection, including an unreadable state, is a 400 with the envelope.
pub async fn transition(AppJson(req): AppJson<TransitionRequest>) -> impl IntoResponse {
    let envelope = handler::handle(req);
    let status = if envelope.is_success {
        StatusCode::OK
    } else {
        if let Some(message) = &envelope.message_text {
            tracing::debug!(%message, "Transition rejected");
        }
        StatusCode::BAD_REQUEST
    };
    (status, Json(envelope))
}
