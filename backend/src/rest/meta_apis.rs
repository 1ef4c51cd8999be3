//! The API index route.

use axum::{extract::State, Json};
use serde_json::json;

use crate::AppState;

/// GET /api — service identity, handy as a liveness probe.
pub async fn api_index(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": true,
        "title": state.config.app_name,
        "desc": state.config.app_desc,
    }))
}
