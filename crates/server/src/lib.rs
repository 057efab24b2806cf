pub mod config;
pub mod error;
pub mod extract;
pub mod matchmaking;
pub mod routes;
pub mod store;
pub mod validate;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::matchmaking::MatchmakingQueue;
use crate::store::MatchStore;

/// Build the HTTP router over the given shared state.
pub fn app(store: MatchStore, queue: MatchmakingQueue, config: Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(routes::health::health_check))
        // Matches
        .route("/api/matches", post(routes::matches::create_match))
        .route("/api/matches/{match_id}/state", get(routes::matches::get_match_state))
        .route("/api/matches/{match_id}/actions", post(routes::matches::submit_action))
        .route(
            "/api/matches/{match_id}/moves/{square}",
            get(routes::matches::get_legal_moves),
        )
        // Matchmaking
        .route("/api/matchmaking/tickets", post(routes::matchmaking::create_ticket))
        .route(
            "/api/matchmaking/tickets/{ticket_id}",
            get(routes::matchmaking::get_ticket),
        )
        .route("/api/matchmaking/process", post(routes::matchmaking::process))
        // Stateless transition
        .route("/api/functions/transition", post(routes::functions::transition))
        // Shared state
        .layer(Extension(store))
        .layer(Extension(queue))
        .layer(Extension(config))
        .layer(cors)
}
