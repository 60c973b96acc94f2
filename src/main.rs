use laundry_api::{auth::TokenService, config::AppConfig, create_router, db, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true)
        .init();

    if let Err(e) = run().await {
        tracing::error!("Laundry API failed to start: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Laundry API - Starting...");

    let config = AppConfig::from_env()?;
    let addr = config.bind_addr()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;

    tracing::info!("Running database migrations...");
    db::run_migrations(&pool).await?;
    tracing::info!("Migrations completed successfully");

    let state = AppState::new(pool, TokenService::new(&config.jwt_secret));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Laundry API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
