use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::schemas::unavailability::VenueUnavailabilityCreate;
use crate::store::repository::Repository;
use crate::store::rows::VenueUnavailabilityRow;
use crate::store::StoreError;

/// Overlapping windows for the same venue are allowed; the range invariant
/// (end after start) is checked upstream and backed by a table CHECK.
pub struct VenueUnavailabilityStore {
    repo: Repository<VenueUnavailabilityRow>,
}

impl VenueUnavailabilityStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: Repository::new(pool),
        }
    }

    fn pool(&self) -> &PgPool {
        self.repo.pool()
    }

    pub async fn list_for_venue(
        &self,
        venue_id: Uuid,
    ) -> Result<Vec<VenueUnavailabilityRow>, StoreError> {
        Ok(sqlx::query_as::<_, VenueUnavailabilityRow>(
            "SELECT * FROM venue_unavailabilities WHERE venue_id = $1 ORDER BY start_datetime, id",
        )
        .bind(venue_id)
        .fetch_all(self.pool())
        .await?)
    }

    pub async fn create_for_venue(
        &self,
        venue_id: Uuid,
        payload: &VenueUnavailabilityCreate,
    ) -> Result<VenueUnavailabilityRow, StoreError> {
        Ok(sqlx::query_as::<_, VenueUnavailabilityRow>(
            r#"
            INSERT INTO venue_unavailabilities (id, venue_id, start_datetime, end_datetime, reason)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(venue_id)
        .bind(payload.start_datetime)
        .bind(payload.end_datetime)
        .bind(payload.reason.as_deref())
        .fetch_one(self.pool())
        .await?)
    }

    pub async fn find_for_venue(
        &self,
        unavailability_id: Uuid,
        venue_id: Uuid,
    ) -> Result<Option<VenueUnavailabilityRow>, StoreError> {
        Ok(sqlx::query_as::<_, VenueUnavailabilityRow>(
            "SELECT * FROM venue_unavailabilities WHERE id = $1 AND venue_id = $2",
        )
        .bind(unavailability_id)
        .bind(venue_id)
        .fetch_optional(self.pool())
        .await?)
    }

    /// Write the merged window back. Callers resolve the effective values
    /// first; this is a single venue-scoped UPDATE.
    pub async fn update_window(
        &self,
        unavailability_id: Uuid,
        venue_id: Uuid,
        start_datetime: DateTime<Utc>,
        end_datetime: DateTime<Utc>,
        reason: Option<&str>,
    ) -> Result<Option<VenueUnavailabilityRow>, StoreError> {
        Ok(sqlx::query_as::<_, VenueUnavailabilityRow>(
            r#"
            UPDATE venue_unavailabilities
            SET start_datetime = $1, end_datetime = $2, reason = $3
            WHERE id = $4 AND venue_id = $5
            RETURNING *
            "#,
        )
        .bind(start_datetime)
        .bind(end_datetime)
        .bind(reason)
        .bind(unavailability_id)
        .bind(venue_id)
        .fetch_optional(self.pool())
        .await?)
    }

    pub async fn delete(
        &self,
        unavailability_id: Uuid,
        venue_id: Uuid,
    ) -> Result<bool, StoreError> {
        let result =
            sqlx::query("DELETE FROM venue_unavailabilities WHERE id = $1 AND venue_id = $2")
                .bind(unavailability_id)
                .bind(venue_id)
                .execute(self.pool())
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
