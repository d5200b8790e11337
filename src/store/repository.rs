//! Generic by-id access, implemented once and instantiated per entity.

use std::marker::PhantomData;

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres};

use crate::store::StoreError;

/// A persisted entity: its table, a human-readable kind for error reporting,
/// and its identifier type.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    type Id: for<'q> sqlx::Encode<'q, Postgres>
        + sqlx::Type<Postgres>
        + std::fmt::Display
        + Copy
        + Send
        + Sync
        + 'static;

    const TABLE: &'static str;
    const KIND: &'static str;
}

/// By-id operations shared by every entity store.
pub struct Repository<E: Entity> {
    pool: PgPool,
    _marker: PhantomData<E>,
}

impl<E: Entity> Repository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn find(&self, id: E::Id) -> Result<Option<E>, StoreError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", E::TABLE);
        Ok(sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// Like [`find`](Self::find) but absence is an error carrying the entity
    /// kind and id.
    pub async fn fetch(&self, id: E::Id) -> Result<E, StoreError> {
        self.find(id).await?.ok_or_else(|| StoreError::NotFound {
            entity: E::KIND,
            id: id.to_string(),
        })
    }

    /// Delete by id; reports whether a row was actually removed.
    pub async fn delete(&self, id: E::Id) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", E::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
