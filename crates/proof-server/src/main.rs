//! HTTP API server for allowlist Merkle proofs.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod config;
mod handlers;
mod routes;

#[cfg(test)]
mod tests;

use airdrop_prover::{Allowlist, Snapshot};
use config::ServerConfig;

/// Application state shared across handlers.
///
/// The allowlist is immutable after startup, so handlers read it without locking.
pub struct AppState {
    pub allowlist: Allowlist,
}

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    tracing::info!(snapshot = %config.snapshot.display(), "loading snapshot");
    let snapshot = Snapshot::load_from_path(&config.snapshot)?;
    let allowlist = Allowlist::from_snapshot(&snapshot)?;
    tracing::info!(root = %allowlist.root_hex(), addresses = allowlist.len(), "allowlist committed");

    let state = Arc::new(AppState { allowlist });

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    tracing::info!(addr = %config.listen, "listening");
    axum::serve(listener, app(state)).await?;

    Ok(())
}
