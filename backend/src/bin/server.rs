//! LitLog HTTP Server Binary
//!
//! This is the main entry point for the LitLog REST API server.
//! It opens the repository, sets up the HTTP router, and serves requests
//! until Ctrl-C.
//!
//! # Usage
//!
//! ```bash
//! # SQLite file in the working directory (default)
//! cargo run --bin litlog-server
//!
//! # In-memory repository
//! REPOSITORY_TYPE=local cargo run --bin litlog-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 127.0.0.1)
//! - `PORT`: Server port (default: 8000)
//! - `DATABASE_URL`: SQLite file path (default: litlog.db)
//! - `REPOSITORY_TYPE`: `sqlite` or `local`
//! - `CORS_ORIGINS`: Comma-separated allowed origins
//! - `RUST_LOG`: Log filter (default: info)

use tracing::{info, warn};

use litlog::db::RepositoryFactory;
use litlog::http::{create_router_with_config, AppState, ServerConfig};
use litlog::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    info!("Starting LitLog HTTP Server");

    let repository = RepositoryFactory::resolve().await?;
    info!("Repository initialized successfully");

    let state = AppState::new(repository);
    let config = ServerConfig::from_env();
    let app = create_router_with_config(state, &config);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C; shutting down"),
    }
}
