use sqlx::PgPool;

use crate::store::{VenueImageStore, VenueStore, VenueUnavailabilityStore};

/// Shared application state: the connection pool, handed to handlers through
/// axum's `State` extractor. Stores are cheap per-request views over it.
#[derive(Clone)]
pub struct AppState {
    pool: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn venues(&self) -> VenueStore {
        VenueStore::new(self.pool.clone())
    }

    pub fn images(&self) -> VenueImageStore {
        VenueImageStore::new(self.pool.clone())
    }

    pub fn unavailabilities(&self) -> VenueUnavailabilityStore {
        VenueUnavailabilityStore::new(self.pool.clone())
    }
}
