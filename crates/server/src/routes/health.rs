use axum::{Extension, Json};
use serde_json::{json, Value as JsonValue};

use crate::store::MatchStore;

/// GET /health
pub async fn health_check(Extension(store): Extension<MatchStore>) -> Json<JsonValue> {
    let matches = store.len().await;
    Json(json!({ "status": "ok", "matches": matches }))
}
