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
use crate::schemas::unavailability::{
    VenueUnavailabilityCreate, VenueUnavailabilityResponse, VenueUnavailabilityUpdate,
};
use crate::scopes;
use crate::state::AppState;

/// GET /venues/{id}/unavailabilities - public
pub async fn list(
    State(state): State<AppState>,
    Path(venue_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.venues().fetch(venue_id).await?;

    let windows = state.unavailabilities().list_for_venue(venue_id).await?;
    let body: Vec<VenueUnavailabilityResponse> = windows.into_iter().map(Into::into).collect();
    Ok(cached(COLLECTION_CACHE, Json(body)))
}

/// POST /venues/{id}/unavailabilities - schedule scope or admin
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(venue_id): Path<Uuid>,
    ApiJson(payload): ApiJson<VenueUnavailabilityCreate>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;

    let venue = state.venues().fetch(venue_id).await?;
    if !scopes::can_manage_schedule(&user, venue.owner_id) {
        return Err(ApiError::forbidden("You don't have permission to manage this venue's schedule"));
    }

    let row = state
        .unavailabilities()
        .create_for_venue(venue_id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(VenueUnavailabilityResponse::from(row))))
}

/// PATCH /venues/{id}/unavailabilities/{unavailability_id}
///
/// A half-open patch (only one bound supplied) is merged with the stored
/// window and the result must still satisfy end-after-start.
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((venue_id, unavailability_id)): Path<(Uuid, Uuid)>,
    ApiJson(patch): ApiJson<VenueUnavailabilityUpdate>,
) -> Result<Json<VenueUnavailabilityResponse>, ApiError> {
    patch.validate()?;

    let venue = state.venues().fetch(venue_id).await?;
    if !scopes::can_manage_schedule(&user, venue.owner_id) {
        return Err(ApiError::forbidden("You don't have permission to manage this venue's schedule"));
    }

    let existing = state
        .unavailabilities()
        .find_for_venue(unavailability_id, venue_id)
        .await?
        .ok_or_else(|| ApiError::not_found("unavailability", unavailability_id))?;

    let start_datetime = patch.start_datetime.unwrap_or(existing.start_datetime);
    let end_datetime = patch.end_datetime.unwrap_or(existing.end_datetime);
    if end_datetime <= start_datetime {
        return Err(ApiError::field_error(
            "end_datetime",
            "end_datetime must be after start_datetime",
        ));
    }
    let reason = patch.reason.clone().or(existing.reason);

    let row = state
        .unavailabilities()
        .update_window(
            unavailability_id,
            venue_id,
            start_datetime,
            end_datetime,
            reason.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::not_found("unavailability", unavailability_id))?;

    Ok(Json(row.into()))
}

/// DELETE /venues/{id}/unavailabilities/{unavailability_id}
pub async fn remove(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((venue_id, unavailability_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let venue = state.venues().fetch(venue_id).await?;
    if !scopes::can_manage_schedule(&user, venue.owner_id) {
        return Err(ApiError::forbidden("You don't have permission to manage this venue's schedule"));
    }

    if !state
        .unavailabilities()
        .delete(unavailability_id, venue_id)
        .await?
    {
        return Err(ApiError::not_found("unavailability", unavailability_id));
    }
    Ok(StatusCode::NO_CONTENT)
}
