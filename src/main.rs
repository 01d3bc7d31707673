//! MONKI upload service
//!
//! Serves the badge-icon and clan-emblem upload routes.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use monki_client::config::Config;
use monki_client::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MONKI upload service");
    tracing::info!("Backend URL: {}", config.api_url);
    tracing::info!("Upload directory: {:?}", config.upload_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.admin_token.is_none() {
        tracing::warn!(
            "No admin token configured (MONKI_ADMIN_TOKEN). Uploads only require a bearer header!"
        );
    }

    let bind_addr = config.bind_addr;
    let app = create_router(AppState::new(config));

    // Start server
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
