use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::store::rows::VenueImageRow;

/// Payload for adding an image; the venue id comes from the path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VenueImageCreate {
    #[validate(length(max = 500))]
    pub url: String,
    #[serde(default)]
    pub is_thumbnail: bool,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub order: i32,
}

/// Partial update; only supplied fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct VenueImageUpdate {
    #[validate(length(max = 500))]
    pub url: Option<String>,
    pub is_thumbnail: Option<bool>,
    #[validate(range(min = 0))]
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VenueImageResponse {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub url: String,
    pub is_thumbnail: bool,
    pub order: i32,
}

impl From<VenueImageRow> for VenueImageResponse {
    fn from(row: VenueImageRow) -> Self {
        Self {
            id: row.id,
            venue_id: row.venue_id,
            url: row.url,
            is_thumbnail: row.is_thumbnail,
            order: row.order,
        }
    }
}
