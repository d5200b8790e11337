//! Data-access layer: connection pool setup plus one store per entity.

pub mod images;
pub mod repository;
pub mod rows;
pub mod unavailabilities;
pub mod venues;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

use crate::config::AppConfig;

pub use images::VenueImageStore;
pub use repository::{Entity, Repository};
pub use unavailabilities::VenueUnavailabilityStore;
pub use venues::VenueStore;

/// Errors from the data-access layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Open the connection pool against `DB_URL`.
pub async fn connect(config: &AppConfig) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.db_url)
        .await?;
    Ok(pool)
}

/// Apply pending migrations from the embedded `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("database migrations up to date");
    Ok(())
}

/// One-statement connectivity probe, used by the readiness endpoint.
pub async fn ping(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
