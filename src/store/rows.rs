//! Row types decoded straight from the venue tables.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use uuid::Uuid;

use crate::schemas::venue::{SportType, VenueStatus, WeeklyHours};
use crate::store::repository::Entity;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VenueRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub sport_types: Json<Vec<SportType>>,
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
    pub amenities: Json<Vec<String>>,
    pub working_hours: Json<WeeklyHours>,
    pub rating: Decimal,
    pub total_reviews: i32,
    pub total_bookings: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for VenueRow {
    type Id = Uuid;
    const TABLE: &'static str = "venues";
    const KIND: &'static str = "venue";
}

/// Projection for the list endpoint; `thumbnail` is resolved in SQL.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VenueListRow {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub sport_types: Json<Vec<SportType>>,
    pub status: VenueStatus,
    pub price_per_hour: Decimal,
    pub currency: String,
    pub capacity: i32,
    pub is_indoor: bool,
    pub rating: Decimal,
    pub total_reviews: i32,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VenueImageRow {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub url: String,
    pub is_thumbnail: bool,
    pub order: i32,
}

impl Entity for VenueImageRow {
    type Id = Uuid;
    const TABLE: &'static str = "venue_images";
    const KIND: &'static str = "image";
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VenueUnavailabilityRow {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub reason: Option<String>,
}

impl Entity for VenueUnavailabilityRow {
    type Id = Uuid;
    const TABLE: &'static str = "venue_unavailabilities";
    const KIND: &'static str = "unavailability";
}
