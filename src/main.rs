use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use storefront::config::Config;
use storefront::router::create_app_router;
use storefront::state::AppState;
use storefront::telemetry::setup_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();
    let config = Config::parse();

    // Initialize application state
    let state = Arc::new(AppState::from_config(&config).context("failed to set up catalog client")?);

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    info!(addr = %config.bind, "storefront listening");

    // Start the server
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
