use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::handlers::{cached, COLLECTION_CACHE, RESOURCE_CACHE};
use crate::identity::CurrentUser;
use crate::schemas::venue::{
    VenueCreate, VenueFilters, VenueListItem, VenueResponse, VenueStatusUpdate, VenueUpdate,
};
use crate::scopes;
use crate::state::AppState;
use crate::store::rows::VenueRow;

/// GET /venues - public, filtered, paginated
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<VenueFilters>,
) -> Result<impl IntoResponse, ApiError> {
    filters.validate()?;

    let rows = state.venues().list(&filters).await?;
    let items: Vec<VenueListItem> = rows.into_iter().map(Into::into).collect();
    Ok(cached(COLLECTION_CACHE, Json(items)))
}

/// GET /venues/{id} - public
pub async fn show(
    State(state): State<AppState>,
    Path(venue_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let (venue, images, unavailabilities) = state
        .venues()
        .get_with_relations(venue_id)
        .await?
        .ok_or_else(|| ApiError::not_found("venue", venue_id))?;

    Ok(cached(
        RESOURCE_CACHE,
        Json(VenueResponse::from_parts(venue, images, unavailabilities)),
    ))
}

/// POST /venues - write scope required; the caller becomes the owner
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(mut payload): ApiJson<VenueCreate>,
) -> Result<impl IntoResponse, ApiError> {
    payload.normalize();
    payload.validate()?;

    if !scopes::can_create(&user) {
        return Err(ApiError::forbidden("You don't have permission to create venues"));
    }

    let venue = state.venues().create(user.id, &payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(VenueResponse::from_parts(venue, Vec::new(), Vec::new())),
    ))
}

/// PATCH /venues/{id} - owner or admin
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(venue_id): Path<Uuid>,
    ApiJson(mut patch): ApiJson<VenueUpdate>,
) -> Result<Json<VenueResponse>, ApiError> {
    patch.normalize();
    patch.validate()?;

    // Venues are public-read, so existence is checked before authorization;
    // a 404 here discloses nothing a GET would not.
    let existing = state.venues().fetch(venue_id).await?;
    if !scopes::can_write_or_admin(&user, existing.owner_id) {
        return Err(ApiError::forbidden("You don't have permission to modify this venue"));
    }

    let updated = state
        .venues()
        .update(venue_id, &patch)
        .await?
        .ok_or_else(|| ApiError::not_found("venue", venue_id))?;

    with_relations(&state, updated).await
}

/// PATCH /venues/{id}/status - admin only, ownership irrelevant
pub async fn update_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(venue_id): Path<Uuid>,
    ApiJson(payload): ApiJson<VenueStatusUpdate>,
) -> Result<Json<VenueResponse>, ApiError> {
    // Pure scope gate; runs before any store access.
    if !scopes::can_admin_write(&user) {
        return Err(ApiError::forbidden("Changing venue status requires an admin scope"));
    }

    let updated = state
        .venues()
        .update_status(venue_id, payload.status)
        .await?
        .ok_or_else(|| ApiError::not_found("venue", venue_id))?;

    with_relations(&state, updated).await
}

/// DELETE /venues/{id} - owner or admin
pub async fn remove(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(venue_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let existing = state.venues().fetch(venue_id).await?;
    if !scopes::can_delete_or_admin(&user, existing.owner_id) {
        return Err(ApiError::forbidden("You don't have permission to delete this venue"));
    }

    if !state.venues().delete(venue_id).await? {
        return Err(ApiError::not_found("venue", venue_id));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn with_relations(state: &AppState, venue: VenueRow) -> Result<Json<VenueResponse>, ApiError> {
    let images = state.images().list_for_venue(venue.id).await?;
    let unavailabilities = state.unavailabilities().list_for_venue(venue.id).await?;
    Ok(Json(VenueResponse::from_parts(venue, images, unavailabilities)))
}
