//! Resource handlers, one module per entity.
//!
//! Every mutating handler follows the same pipeline with early exit:
//! schema validation (422), identity resolution (422), authorization (403,
//! after the public-read existence check), then the store call.

pub mod health;
pub mod images;
pub mod unavailabilities;
pub mod venues;

use axum::http::header;
use axum::response::IntoResponse;

/// Cache-Control for collection listings.
pub(crate) const COLLECTION_CACHE: &str = "public, max-age=30";
/// Cache-Control for single-resource reads.
pub(crate) const RESOURCE_CACHE: &str = "public, max-age=60";

/// Attach a static Cache-Control policy to a response. Pure response
/// shaping; nothing is cached server-side.
pub(crate) fn cached<R: IntoResponse>(policy: &'static str, body: R) -> impl IntoResponse {
    ([(header::CACHE_CONTROL, policy)], body)
}
