mod config;
mod embedder;
mod errors;
mod extract;
mod preprocess;
mod ranking;
mod routes;
mod sections;
mod state;
#[cfg(test)]
mod test_utils;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embedder::HttpEmbedder;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SmartHire API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize embedding client
    let embedder = Arc::new(HttpEmbedder::new(
        config.embedding_endpoint.clone(),
        config.embedding_model.clone(),
    ));
    info!(
        "Embedding client initialized (model: {}, endpoint: {})",
        config.embedding_model, config.embedding_endpoint
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        embedder,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
