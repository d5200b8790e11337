use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::store::rows::VenueUnavailabilityRow;

/// Payload for blocking a time window; the venue id comes from the path.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "end_after_start"))]
pub struct VenueUnavailabilityCreate {
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    #[validate(length(max = 255))]
    pub reason: Option<String>,
}

fn end_after_start(value: &VenueUnavailabilityCreate) -> Result<(), ValidationError> {
    if value.end_datetime <= value.start_datetime {
        let mut err = ValidationError::new("end_after_start");
        err.message = Some("end_datetime must be after start_datetime".into());
        return Err(err);
    }
    Ok(())
}

/// Partial update. The pair rule is re-checked here when both bounds are
/// supplied; a half-open patch is checked against the stored row by the
/// handler.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "end_after_start_partial"))]
pub struct VenueUnavailabilityUpdate {
    pub start_datetime: Option<DateTime<Utc>>,
    pub end_datetime: Option<DateTime<Utc>>,
    #[validate(length(max = 255))]
    pub reason: Option<String>,
}

fn end_after_start_partial(value: &VenueUnavailabilityUpdate) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (value.start_datetime, value.end_datetime) {
        if end <= start {
            let mut err = ValidationError::new("end_after_start");
            err.message = Some("end_datetime must be after start_datetime".into());
            return Err(err);
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct VenueUnavailabilityResponse {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub reason: Option<String>,
}

impl From<VenueUnavailabilityRow> for VenueUnavailabilityResponse {
    fn from(row: VenueUnavailabilityRow) -> Self {
        Self {
            id: row.id,
            venue_id: row.venue_id,
            start_datetime: row.start_datetime,
            end_datetime: row.end_datetime,
            reason: row.reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2025-06-01T10:00:00Z".parse().unwrap()
    }

    #[test]
    fn valid_window_passes() {
        let payload = VenueUnavailabilityCreate {
            start_datetime: now(),
            end_datetime: now() + Duration::hours(2),
            reason: Some("Holiday".to_string()),
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn end_before_start_is_rejected() {
        let payload = VenueUnavailabilityCreate {
            start_datetime: now() + Duration::hours(2),
            end_datetime: now(),
            reason: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn zero_length_window_is_rejected() {
        let payload = VenueUnavailabilityCreate {
            start_datetime: now(),
            end_datetime: now(),
            reason: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn update_with_single_bound_passes_schema_check() {
        let patch = VenueUnavailabilityUpdate {
            start_datetime: Some(now()),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn update_with_inverted_pair_is_rejected() {
        let patch = VenueUnavailabilityUpdate {
            start_datetime: Some(now() + Duration::hours(1)),
            end_datetime: Some(now()),
            reason: None,
        };
        assert!(patch.validate().is_err());
    }
}
