use tracing_subscriber::EnvFilter;

use venue_api::config::AppConfig;
use venue_api::routes;
use venue_api::state::AppState;
use venue_api::store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so local runs pick up DB_URL / USERS_MS_URL.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    let pool = store::connect(&config).await?;
    store::run_migrations(&pool).await?;

    let app = routes::router(AppState::new(pool));

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("venue-api listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
