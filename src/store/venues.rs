use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::schemas::venue::{VenueCreate, VenueFilters, VenueStatus, VenueUpdate};
use crate::store::repository::Repository;
use crate::store::rows::{VenueImageRow, VenueListRow, VenueRow, VenueUnavailabilityRow};
use crate::store::StoreError;

pub struct VenueStore {
    repo: Repository<VenueRow>,
}

impl VenueStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: Repository::new(pool),
        }
    }

    fn pool(&self) -> &PgPool {
        self.repo.pool()
    }

    /// Insert a venue owned by `owner_id`. The status column defaults to
    /// `pending`; the payload cannot influence owner or status.
    pub async fn create(&self, owner_id: Uuid, payload: &VenueCreate) -> Result<VenueRow, StoreError> {
        let row = sqlx::query_as::<_, VenueRow>(
            r#"
            INSERT INTO venues (
                id, owner_id, name, description, sport_types, address, city,
                latitude, longitude, price_per_hour, currency, capacity,
                is_indoor, has_parking, has_changing_rooms, has_showers,
                has_equipment_rental, amenities, working_hours
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19
            )
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(Json(&payload.sport_types))
        .bind(&payload.address)
        .bind(&payload.city)
        .bind(payload.latitude)
        .bind(payload.longitude)
        .bind(payload.price_per_hour)
        .bind(&payload.currency)
        .bind(payload.capacity)
        .bind(payload.is_indoor)
        .bind(payload.has_parking)
        .bind(payload.has_changing_rooms)
        .bind(payload.has_showers)
        .bind(payload.has_equipment_rental)
        .bind(Json(&payload.amenities))
        .bind(Json(&payload.working_hours))
        .fetch_one(self.pool())
        .await?;

        Ok(row)
    }

    /// Existence-checked fetch; absence surfaces as a typed not-found.
    pub async fn fetch(&self, id: Uuid) -> Result<VenueRow, StoreError> {
        self.repo.fetch(id).await
    }

    /// Venue plus its images (by display order) and unavailability windows
    /// (by start time).
    pub async fn get_with_relations(
        &self,
        id: Uuid,
    ) -> Result<Option<(VenueRow, Vec<VenueImageRow>, Vec<VenueUnavailabilityRow>)>, StoreError>
    {
        let Some(venue) = self.repo.find(id).await? else {
            return Ok(None);
        };

        let images = sqlx::query_as::<_, VenueImageRow>(
            r#"SELECT * FROM venue_images WHERE venue_id = $1 ORDER BY "order", id"#,
        )
        .bind(id)
        .fetch_all(self.pool())
        .await?;

        let unavailabilities = sqlx::query_as::<_, VenueUnavailabilityRow>(
            "SELECT * FROM venue_unavailabilities WHERE venue_id = $1 ORDER BY start_datetime, id",
        )
        .bind(id)
        .fetch_all(self.pool())
        .await?;

        Ok(Some((venue, images, unavailabilities)))
    }

    /// Filtered, paginated listing in insertion order.
    pub async fn list(&self, filters: &VenueFilters) -> Result<Vec<VenueListRow>, StoreError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT v.id, v.name, v.city, v.sport_types, v.status, v.price_per_hour, \
             v.currency, v.capacity, v.is_indoor, v.rating, v.total_reviews, \
             (SELECT i.url FROM venue_images i \
              WHERE i.venue_id = v.id AND i.is_thumbnail LIMIT 1) AS thumbnail \
             FROM venues v",
        );

        let mut first = true;
        let mut clause = |qb: &mut QueryBuilder<Postgres>| {
            qb.push(if first { " WHERE " } else { " AND " });
            first = false;
        };

        if let Some(status) = filters.status {
            clause(&mut qb);
            qb.push("v.status = ").push_bind(status);
        }
        if let Some(owner_id) = filters.owner_id {
            clause(&mut qb);
            qb.push("v.owner_id = ").push_bind(owner_id);
        }
        if let Some(city) = &filters.city {
            clause(&mut qb);
            qb.push("v.city ILIKE ").push_bind(format!("%{}%", city));
        }
        if let Some(sport_type) = filters.sport_type {
            clause(&mut qb);
            qb.push("v.sport_types @> ").push_bind(Json(vec![sport_type]));
        }
        if let Some(is_indoor) = filters.is_indoor {
            clause(&mut qb);
            qb.push("v.is_indoor = ").push_bind(is_indoor);
        }
        if let Some(has_parking) = filters.has_parking {
            clause(&mut qb);
            qb.push("v.has_parking = ").push_bind(has_parking);
        }
        if let Some(min_price) = filters.min_price {
            clause(&mut qb);
            qb.push("v.price_per_hour >= ").push_bind(min_price);
        }
        if let Some(max_price) = filters.max_price {
            clause(&mut qb);
            qb.push("v.price_per_hour <= ").push_bind(max_price);
        }
        if let Some(min_capacity) = filters.min_capacity {
            clause(&mut qb);
            qb.push("v.capacity >= ").push_bind(min_capacity);
        }

        qb.push(" ORDER BY v.created_at, v.id");
        qb.push(" LIMIT ").push_bind(i64::from(filters.page_size));
        qb.push(" OFFSET ")
            .push_bind(i64::from(filters.page - 1) * i64::from(filters.page_size));

        Ok(qb.build_query_as::<VenueListRow>().fetch_all(self.pool()).await?)
    }

    /// Partial merge: only fields present in the patch are written.
    pub async fn update(&self, id: Uuid, patch: &VenueUpdate) -> Result<Option<VenueRow>, StoreError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE venues SET updated_at = now()");

        if let Some(name) = &patch.name {
            qb.push(", name = ").push_bind(name);
        }
        if let Some(description) = &patch.description {
            qb.push(", description = ").push_bind(description);
        }
        if let Some(sport_types) = &patch.sport_types {
            qb.push(", sport_types = ").push_bind(Json(sport_types));
        }
        if let Some(address) = &patch.address {
            qb.push(", address = ").push_bind(address);
        }
        if let Some(city) = &patch.city {
            qb.push(", city = ").push_bind(city);
        }
        if let Some(latitude) = patch.latitude {
            qb.push(", latitude = ").push_bind(latitude);
        }
        if let Some(longitude) = patch.longitude {
            qb.push(", longitude = ").push_bind(longitude);
        }
        if let Some(price_per_hour) = patch.price_per_hour {
            qb.push(", price_per_hour = ").push_bind(price_per_hour);
        }
        if let Some(currency) = &patch.currency {
            qb.push(", currency = ").push_bind(currency);
        }
        if let Some(capacity) = patch.capacity {
            qb.push(", capacity = ").push_bind(capacity);
        }
        if let Some(is_indoor) = patch.is_indoor {
            qb.push(", is_indoor = ").push_bind(is_indoor);
        }
        if let Some(has_parking) = patch.has_parking {
            qb.push(", has_parking = ").push_bind(has_parking);
        }
        if let Some(has_changing_rooms) = patch.has_changing_rooms {
            qb.push(", has_changing_rooms = ").push_bind(has_changing_rooms);
        }
        if let Some(has_showers) = patch.has_showers {
            qb.push(", has_showers = ").push_bind(has_showers);
        }
        if let Some(has_equipment_rental) = patch.has_equipment_rental {
            qb.push(", has_equipment_rental = ").push_bind(has_equipment_rental);
        }
        if let Some(amenities) = &patch.amenities {
            qb.push(", amenities = ").push_bind(Json(amenities));
        }
        if let Some(working_hours) = &patch.working_hours {
            qb.push(", working_hours = ").push_bind(Json(working_hours));
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        Ok(qb.build_query_as::<VenueRow>().fetch_optional(self.pool()).await?)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: VenueStatus,
    ) -> Result<Option<VenueRow>, StoreError> {
        Ok(sqlx::query_as::<_, VenueRow>(
            "UPDATE venues SET status = $1, updated_at = now() WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(self.pool())
        .await?)
    }

    /// Images and unavailability windows go with the venue; the cascade is a
    /// single DELETE through `ON DELETE CASCADE`, so it is all-or-nothing.
    pub async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        self.repo.delete(id).await
    }
}
