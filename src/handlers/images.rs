use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::handlers::{cached, COLLECTION_CACHE};
use crate::identity::CurrentUser;
use crate::schemas::image::{VenueImageCreate, VenueImageResponse, VenueImageUpdate};
use crate::scopes;
use crate::state::AppState;

/// GET /venues/{id}/images - public; unknown venue is a 404, not an empty list
pub async fn list(
    State(state): State<AppState>,
    Path(venue_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.venues().fetch(venue_id).await?;

    let images = state.images().list_for_venue(venue_id).await?;
    let body: Vec<VenueImageResponse> = images.into_iter().map(Into::into).collect();
    Ok(cached(COLLECTION_CACHE, Json(body)))
}

/// POST /venues/{id}/images - images scope or admin
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(venue_id): Path<Uuid>,
    ApiJson(payload): ApiJson<VenueImageCreate>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;

    let venue = state.venues().fetch(venue_id).await?;
    if !scopes::can_manage_images(&user, venue.owner_id) {
        return Err(ApiError::forbidden("You don't have permission to manage this venue's images"));
    }

    let row = state.images().create_for_venue(venue_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(VenueImageResponse::from(row))))
}

/// PATCH /venues/{id}/images/{image_id}
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((venue_id, image_id)): Path<(Uuid, Uuid)>,
    ApiJson(patch): ApiJson<VenueImageUpdate>,
) -> Result<Json<VenueImageResponse>, ApiError> {
    patch.validate()?;

    let venue = state.venues().fetch(venue_id).await?;
    if !scopes::can_manage_images(&user, venue.owner_id) {
        return Err(ApiError::forbidden("You don't have permission to manage this venue's images"));
    }

    let row = state
        .images()
        .update(image_id, venue_id, &patch)
        .await?
        .ok_or_else(|| ApiError::not_found("image", image_id))?;
    Ok(Json(row.into()))
}

/// DELETE /venues/{id}/images/{image_id}
pub async fn remove(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((venue_id, image_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let venue = state.venues().fetch(venue_id).await?;
    if !scopes::can_manage_images(&user, venue.owner_id) {
        return Err(ApiError::forbidden("You don't have permission to manage this venue's images"));
    }

    if !state.images().delete(image_id, venue_id).await? {
        return Err(ApiError::not_found("image", image_id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /venues/{id}/images/reorder - body is the full ordered id list
pub async fn reorder(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(venue_id): Path<Uuid>,
    ApiJson(ordered_ids): ApiJson<Vec<Uuid>>,
) -> Result<Json<Vec<VenueImageResponse>>, ApiError> {
    let venue = state.venues().fetch(venue_id).await?;
    if !scopes::can_manage_images(&user, venue.owner_id) {
        return Err(ApiError::forbidden("You don't have permission to manage this venue's images"));
    }

    let rows = state.images().reorder(venue_id, &ordered_ids).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
