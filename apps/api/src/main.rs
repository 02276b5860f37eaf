mod compliance;
mod config;
mod documents;
mod enhancement;
mod errors;
mod llm_client;
mod models;
mod routes;
mod scoring;
mod state;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::ProviderRouter;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; no provider key is required
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume ATS API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize provider clients (missing keys disable a provider)
    let router = ProviderRouter::from_config(&config)?;

    // Rendered resumes are written here and served under /output
    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .with_context(|| format!("Failed to create {}", config.output_dir.display()))?;
    info!("Output directory: {}", config.output_dir.display());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;

    // Build app state
    let state = AppState::new(config, router);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
