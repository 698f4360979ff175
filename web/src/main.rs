//! marketd HTTP service entry point.

use marketd_web::{router, AppState, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = marketd_postgres::connect(&config.database_url).await?;
    marketd_postgres::migrate(&pool).await?;

    let state = AppState::new(pool, config.session_ttl);
    let app = router::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "marketd listening");
    axum::serve(listener, app).await?;

    Ok(())
}
