use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::state::AppState;
use crate::store;

/// GET /health/live
pub async fn live() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// GET /health/ready - pings the store
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    match store::ping(state.pool()).await {
        Ok(()) => (StatusCode::OK, Json(json!({"status": "ok"}))),
        Err(e) => {
            tracing::warn!("readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"status": "error", "detail": "database unavailable"})),
            )
        }
    }
}
