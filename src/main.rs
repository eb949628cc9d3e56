//! Pricing engine server
//!
//! Serves the package pricing API over HTTP/JSON.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use travel_pricing::config::Config;
use travel_pricing::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travel_pricing=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(
        home_currency = %config.pricing.home_currency,
        foreign_currency = %config.pricing.foreign_currency,
        default_rate = %config.pricing.default_exchange_rate,
        zero_rate_policy = ?config.pricing.zero_rate_policy,
        "Pricing settings loaded"
    );

    let addr = config.bind_address();
    let app = create_router(AppState::new(config));

    let listener = TcpListener::bind(&addr).await?;
    info!("Pricing engine listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
