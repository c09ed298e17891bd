mod api_client;
mod config;
mod indicators;
mod models;
mod routes;
mod services;
mod state;

use anyhow::Context;
use axum::{routing::get, Router};
use config::Config;
use state::AppState;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let addr = config.bind_addr;
    tracing::info!("Using market data API at {}", config.coingecko_api_base);

    let state = AppState::new(config);

    let api_routes = Router::new()
        .route("/health", get(routes::health))
        .route("/indicators", get(routes::indicators::get_indicators))
        .route("/analysis", get(routes::analysis::get_analysis));

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
