//! API route definitions.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::AppState;

/// Create API routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Committed root
        .route("/api/root", get(handlers::root))
        // Proof generation and verification
        .route("/api/prove", post(handlers::prove))
        .route("/api/verify", post(handlers::verify))
        // Utility endpoints
        .route("/api/leaf/encode", post(handlers::encode_leaf))
}
