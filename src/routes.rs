//! Explicit route registration.
//!
//! Every endpoint the service exposes is listed in [`route_table`]; there is
//! no directory scanning or implicit discovery. Adding an endpoint means
//! adding a row here.

use axum::routing::{get, patch, put, MethodRouter};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{health, images, unavailabilities, venues};
use crate::state::AppState;

fn route_table() -> Vec<(&'static str, MethodRouter<AppState>)> {
    vec![
        ("/", get(root)),
        ("/health/live", get(health::live)),
        ("/health/ready", get(health::ready)),
        ("/venues", get(venues::list).post(venues::create)),
        (
            "/venues/:venue_id",
            get(venues::show).patch(venues::update).delete(venues::remove),
        ),
        ("/venues/:venue_id/status", patch(venues::update_status)),
        (
            "/venues/:venue_id/images",
            get(images::list).post(images::create),
        ),
        ("/venues/:venue_id/images/reorder", put(images::reorder)),
        (
            "/venues/:venue_id/images/:image_id",
            patch(images::update).delete(images::remove),
        ),
        (
            "/venues/:venue_id/unavailabilities",
            get(unavailabilities::list).post(unavailabilities::create),
        ),
        (
            "/venues/:venue_id/unavailabilities/:unavailability_id",
            patch(unavailabilities::update).delete(unavailabilities::remove),
        ),
    ]
}

pub fn router(state: AppState) -> Router {
    route_table()
        .into_iter()
        .fold(Router::new(), |router, (path, methods)| router.route(path, methods))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - service descriptor
async fn root() -> Json<Value> {
    Json(json!({
        "name": "venue-api",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "venues": "/venues[/:venue_id]",
            "status": "/venues/:venue_id/status (admin)",
            "images": "/venues/:venue_id/images[/:image_id]",
            "unavailabilities": "/venues/:venue_id/unavailabilities[/:unavailability_id]",
            "health": "/health/live, /health/ready",
        },
    }))
}
