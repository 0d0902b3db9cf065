//! Inflection HTTP Server Binary
//!
//! Main entry point for the call-volume inflection REST API. It loads the
//! configuration, initializes the repository (optionally seeded from a JSON
//! file), sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the in-memory repository (default)
//! cargo run --bin inflection-server
//!
//! # Seed the repository from an export of the call warehouse
//! INFLECTION_SEED_FILE=data/calls.json cargo run --bin inflection-server
//! ```
//!
//! # Environment Variables
//!
//! - `INFLECTION_CONFIG`: Path to `inflection.toml` (default: searched)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: Repository backend (default: local)
//! - `INFLECTION_SEED_FILE`: JSON call rows loaded at startup
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use calls_inflection::config::AppConfig;
use calls_inflection::db::RepositoryFactory;
use calls_inflection::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting inflection HTTP server");

    let config = AppConfig::load()?;
    info!(
        "Analysis defaults: strategy={}, mode={}",
        config.analysis.default_strategy, config.analysis.default_mode
    );

    let repository =
        RepositoryFactory::from_settings(&config.repository, &config.data.window()).await?;
    info!("Repository initialized successfully");

    let addr: SocketAddr = config.server.bind_address().parse()?;
    let app = create_router(AppState::with_config(repository, config));

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
