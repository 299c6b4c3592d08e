// API Server Binary Entry Point
//
// Usage: cargo run --bin api_server
// Configuration: HOST, PORT, YIELD_FIXED_JITTER, RUST_LOG

use crop_yield_estimator::{create_router, AppState, CropTable, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "crop_yield_estimator=info,api_server=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting crop yield prediction service...");

    let config = ServerConfig::from_env();
    tracing::info!("Configuration:");
    tracing::info!("  HOST: {}", config.host);
    tracing::info!("  PORT: {}", config.port);
    tracing::info!("  JITTER: {}", config.jitter.label());

    let table = CropTable::global();
    tracing::info!("Loaded {} crop profiles: {}", table.len(), table.ids().join(", "));

    let app = create_router(AppState::from_config(&config));

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
