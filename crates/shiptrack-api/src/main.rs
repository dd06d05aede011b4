//! Shiptrack API server binary.

use shiptrack_api::db;
use shiptrack_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let pool = db::init_pool().await?;

    let state = AppState::with_pool(pool);
    if let Some(pool) = &state.db_pool {
        db::statuses::ensure_seeded(pool).await?;
        let records = db::shipments::load_all(pool).await?;
        tracing::info!(count = records.len(), "loaded shipments from database");
        state.shipments.load(records);
    }

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    let app = shiptrack_api::app(state);

    tracing::info!(%addr, "shiptrack-api listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
