use sqlx::PgPool;
use uuid::Uuid;

use crate::schemas::image::{VenueImageCreate, VenueImageUpdate};
use crate::store::repository::Repository;
use crate::store::rows::VenueImageRow;
use crate::store::StoreError;

pub struct VenueImageStore {
    repo: Repository<VenueImageRow>,
}

impl VenueImageStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: Repository::new(pool),
        }
    }

    fn pool(&self) -> &PgPool {
        self.repo.pool()
    }

    pub async fn list_for_venue(&self, venue_id: Uuid) -> Result<Vec<VenueImageRow>, StoreError> {
        Ok(sqlx::query_as::<_, VenueImageRow>(
            r#"SELECT * FROM venue_images WHERE venue_id = $1 ORDER BY "order", id"#,
        )
        .bind(venue_id)
        .fetch_all(self.pool())
        .await?)
    }

    /// Insert an image. A venue has at most one thumbnail: when the new image
    /// is flagged, existing thumbnails are demoted in the same transaction.
    pub async fn create_for_venue(
        &self,
        venue_id: Uuid,
        payload: &VenueImageCreate,
    ) -> Result<VenueImageRow, StoreError> {
        let mut tx = self.pool().begin().await?;

        if payload.is_thumbnail {
            sqlx::query("UPDATE venue_images SET is_thumbnail = FALSE WHERE venue_id = $1 AND is_thumbnail")
                .bind(venue_id)
                .execute(&mut *tx)
                .await?;
        }

        let row = sqlx::query_as::<_, VenueImageRow>(
            r#"
            INSERT INTO venue_images (id, venue_id, url, is_thumbnail, "order")
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(venue_id)
        .bind(&payload.url)
        .bind(payload.is_thumbnail)
        .bind(payload.order)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Merge the patch over the stored row and write it back. Promoting an
    /// image to thumbnail demotes the others transactionally.
    pub async fn update(
        &self,
        image_id: Uuid,
        venue_id: Uuid,
        patch: &VenueImageUpdate,
    ) -> Result<Option<VenueImageRow>, StoreError> {
        let mut tx = self.pool().begin().await?;

        let Some(current) = sqlx::query_as::<_, VenueImageRow>(
            "SELECT * FROM venue_images WHERE id = $1 AND venue_id = $2",
        )
        .bind(image_id)
        .bind(venue_id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(None);
        };

        if patch.is_thumbnail == Some(true) {
            sqlx::query(
                "UPDATE venue_images SET is_thumbnail = FALSE \
                 WHERE venue_id = $1 AND is_thumbnail AND id <> $2",
            )
            .bind(venue_id)
            .bind(image_id)
            .execute(&mut *tx)
            .await?;
        }

        let url = patch.url.as_deref().unwrap_or(current.url.as_str());
        let is_thumbnail = patch.is_thumbnail.unwrap_or(current.is_thumbnail);
        let order = patch.order.unwrap_or(current.order);

        let row = sqlx::query_as::<_, VenueImageRow>(
            r#"UPDATE venue_images SET url = $1, is_thumbnail = $2, "order" = $3 WHERE id = $4 RETURNING *"#,
        )
        .bind(url)
        .bind(is_thumbnail)
        .bind(order)
        .bind(image_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(row))
    }

    /// Venue-scoped delete; reports whether anything was removed.
    pub async fn delete(&self, image_id: Uuid, venue_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM venue_images WHERE id = $1 AND venue_id = $2")
            .bind(image_id)
            .bind(venue_id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Persist the positions implied by `ordered_ids`, then return the
    /// venue's images in their new order. Ids not belonging to the venue are
    /// ignored rather than reassigned.
    pub async fn reorder(
        &self,
        venue_id: Uuid,
        ordered_ids: &[Uuid],
    ) -> Result<Vec<VenueImageRow>, StoreError> {
        let mut tx = self.pool().begin().await?;

        for (position, image_id) in ordered_ids.iter().enumerate() {
            sqlx::query(r#"UPDATE venue_images SET "order" = $1 WHERE id = $2 AND venue_id = $3"#)
                .bind(position as i32)
                .bind(image_id)
                .bind(venue_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        self.list_for_venue(venue_id).await
    }
}
