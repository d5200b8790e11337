use std::collections::BTreeMap;

use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::schemas::image::VenueImageResponse;
use crate::schemas::unavailability::VenueUnavailabilityResponse;
use crate::store::rows::{VenueImageRow, VenueListRow, VenueRow, VenueUnavailabilityRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SportType {
    Football,
    Basketball,
    Tennis,
    Volleyball,
    Swimming,
    Gym,
    Padel,
    Other,
}

/// Venue lifecycle status. New venues always start out `pending`; moving a
/// venue anywhere else is an administrative action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "venue_status", rename_all = "lowercase")]
pub enum VenueStatus {
    Pending,
    Active,
    Rejected,
    Suspended,
}

/// Opening and closing time for a single day, wire format "HH:MM".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayHours {
    #[serde(with = "hhmm")]
    pub open: NaiveTime,
    #[serde(with = "hhmm")]
    pub close: NaiveTime,
}

/// Weekly schedule keyed by weekday index `"0"` (Monday) through `"6"`.
/// A `null` value marks the venue closed on that day.
pub type WeeklyHours = BTreeMap<String, Option<DayHours>>;

mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(de::Error::custom)
    }
}

pub(crate) fn validate_working_hours(hours: &WeeklyHours) -> Result<(), ValidationError> {
    for (day, slot) in hours {
        if !matches!(day.as_str(), "0" | "1" | "2" | "3" | "4" | "5" | "6") {
            let mut err = ValidationError::new("invalid_day_key");
            err.message = Some(format!("invalid day key '{}'; must be \"0\" through \"6\"", day).into());
            return Err(err);
        }
        if let Some(window) = slot {
            if window.close <= window.open {
                let mut err = ValidationError::new("close_before_open");
                err.message = Some("close time must be after open time".into());
                return Err(err);
            }
        }
    }
    Ok(())
}

fn validate_latitude(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::from(-90) || *value > Decimal::from(90) {
        let mut err = ValidationError::new("range");
        err.message = Some("latitude must be between -90 and 90".into());
        return Err(err);
    }
    Ok(())
}

fn validate_longitude(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::from(-180) || *value > Decimal::from(180) {
        let mut err = ValidationError::new("range");
        err.message = Some("longitude must be between -180 and 180".into());
        return Err(err);
    }
    Ok(())
}

fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("must be greater than or equal to 0".into());
        return Err(err);
    }
    Ok(())
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_capacity() -> i32 {
    1
}

fn dedup_preserving_order(types: Vec<SportType>) -> Vec<SportType> {
    let mut seen: Vec<SportType> = Vec::with_capacity(types.len());
    for t in types {
        if !seen.contains(&t) {
            seen.push(t);
        }
    }
    seen
}

/// Payload for POST /venues.
///
/// The owner id is injected from the authenticated caller and the status
/// always starts `pending`; neither is accepted from the client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VenueCreate {
    #[validate(length(min = 2, max = 255))]
    pub name: String,
    #[validate(length(min = 10))]
    pub description: String,
    #[serde(default)]
    pub sport_types: Vec<SportType>,

    #[validate(length(max = 500))]
    pub address: String,
    #[validate(length(max = 100))]
    pub city: String,
    #[validate(custom = "validate_latitude")]
    pub latitude: Option<Decimal>,
    #[validate(custom = "validate_longitude")]
    pub longitude: Option<Decimal>,

    #[validate(custom = "validate_non_negative")]
    pub price_per_hour: Decimal,
    #[serde(default = "default_currency")]
    #[validate(length(equal = 3))]
    pub currency: String,

    #[serde(default = "default_capacity")]
    #[validate(range(min = 1))]
    pub capacity: i32,
    #[serde(default)]
    pub is_indoor: bool,
    #[serde(default)]
    pub has_parking: bool,
    #[serde(default)]
    pub has_changing_rooms: bool,
    #[serde(default)]
    pub has_showers: bool,
    #[serde(default)]
    pub has_equipment_rental: bool,
    #[serde(default)]
    pub amenities: Vec<String>,

    #[serde(default)]
    #[validate(custom = "validate_working_hours")]
    pub working_hours: WeeklyHours,
}

impl VenueCreate {
    /// Uppercase the currency and drop duplicate sport types while keeping
    /// the caller's ordering. Runs before validation.
    pub fn normalize(&mut self) {
        self.currency = self.currency.to_ascii_uppercase();
        self.sport_types = dedup_preserving_order(std::mem::take(&mut self.sport_types));
    }
}

/// Partial update for PATCH /venues/{id}: only supplied fields are applied.
/// Status is deliberately absent; it has its own admin-gated endpoint.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct VenueUpdate {
    #[validate(length(min = 2, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 10))]
    pub description: Option<String>,
    pub sport_types: Option<Vec<SportType>>,

    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(custom = "validate_latitude")]
    pub latitude: Option<Decimal>,
    #[validate(custom = "validate_longitude")]
    pub longitude: Option<Decimal>,

    #[validate(custom = "validate_non_negative")]
    pub price_per_hour: Option<Decimal>,
    #[validate(length(equal = 3))]
    pub currency: Option<String>,

    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    pub is_indoor: Option<bool>,
    pub has_parking: Option<bool>,
    pub has_changing_rooms: Option<bool>,
    pub has_showers: Option<bool>,
    pub has_equipment_rental: Option<bool>,
    pub amenities: Option<Vec<String>>,

    #[validate(custom = "validate_working_hours")]
    pub working_hours: Option<WeeklyHours>,
}

impl VenueUpdate {
    pub fn normalize(&mut self) {
        if let Some(currency) = &mut self.currency {
            *currency = currency.to_ascii_uppercase();
        }
        if let Some(types) = self.sport_types.take() {
            self.sport_types = Some(dedup_preserving_order(types));
        }
    }
}

/// Admin-only payload for PATCH /venues/{id}/status.
#[derive(Debug, Clone, Deserialize)]
pub struct VenueStatusUpdate {
    pub status: VenueStatus,
}

/// Full venue representation returned from any read endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct VenueResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub sport_types: Vec<SportType>,
    pub status: VenueStatus,

    pub address: String,
    pub city: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,

    pub price_per_hour: Decimal,
    pub currency: String,

    pub capacity: i32,
    pub is_indoor: bool,
    pub has_parking: bool,
    pub has_changing_rooms: bool,
    pub has_showers: bool,
    pub has_equipment_rental: bool,
    pub amenities: Vec<String>,

    pub working_hours: WeeklyHours,

    pub rating: Decimal,
    pub total_reviews: i32,
    pub total_bookings: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub images: Vec<VenueImageResponse>,
    pub unavailabilities: Vec<VenueUnavailabilityResponse>,
}

impl VenueResponse {
    pub fn from_parts(
        venue: VenueRow,
        images: Vec<VenueImageRow>,
        unavailabilities: Vec<VenueUnavailabilityRow>,
    ) -> Self {
        Self {
            id: venue.id,
            owner_id: venue.owner_id,
            name: venue.name,
            description: venue.description,
            sport_types: venue.sport_types.0,
            status: venue.status,
            address: venue.address,
            city: venue.city,
            latitude: venue.latitude,
            longitude: venue.longitude,
            price_per_hour: venue.price_per_hour,
            currency: venue.currency,
            capacity: venue.capacity,
            is_indoor: venue.is_indoor,
            has_parking: venue.has_parking,
            has_changing_rooms: venue.has_changing_rooms,
            has_showers: venue.has_showers,
            has_equipment_rental: venue.has_equipment_rental,
            amenities: venue.amenities.0,
            working_hours: venue.working_hours.0,
            rating: venue.rating,
            total_reviews: venue.total_reviews,
            total_bookings: venue.total_bookings,
            created_at: venue.created_at,
            updated_at: venue.updated_at,
            images: images.into_iter().map(Into::into).collect(),
            unavailabilities: unavailabilities.into_iter().map(Into::into).collect(),
        }
    }
}

/// Lightweight projection for GET /venues; omits heavy relations.
#[derive(Debug, Clone, Serialize)]
pub struct VenueListItem {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub sport_types: Vec<SportType>,
    pub status: VenueStatus,
    pub price_per_hour: Decimal,
    pub currency: String,
    pub capacity: i32,
    pub is_indoor: bool,
    pub rating: Decimal,
    pub total_reviews: i32,
    /// Url of the thumbnail image, when one is flagged.
    pub thumbnail: Option<String>,
}

impl From<VenueListRow> for VenueListItem {
    fn from(row: VenueListRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            city: row.city,
            sport_types: row.sport_types.0,
            status: row.status,
            price_per_hour: row.price_per_hour,
            currency: row.currency,
            capacity: row.capacity,
            is_indoor: row.is_indoor,
            rating: row.rating,
            total_reviews: row.total_reviews,
            thumbnail: row.thumbnail,
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

/// Query parameters for GET /venues. No implicit status filter: leaving
/// `status` out returns venues in every state.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_price_range"))]
pub struct VenueFilters {
    pub city: Option<String>,
    pub sport_type: Option<SportType>,
    pub is_indoor: Option<bool>,
    pub has_parking: Option<bool>,
    #[validate(custom = "validate_non_negative")]
    pub min_price: Option<Decimal>,
    #[validate(custom = "validate_non_negative")]
    pub max_price: Option<Decimal>,
    #[validate(range(min = 1))]
    pub min_capacity: Option<i32>,
    pub status: Option<VenueStatus>,
    pub owner_id: Option<Uuid>,

    // Pagination
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u32,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: u32,
}

fn validate_price_range(filters: &VenueFilters) -> Result<(), ValidationError> {
    if let (Some(min), Some(max)) = (filters.min_price, filters.max_price) {
        if min > max {
            let mut err = ValidationError::new("price_range");
            err.message = Some("min_price must not exceed max_price".into());
            return Err(err);
        }
    }
    Ok(())
}
