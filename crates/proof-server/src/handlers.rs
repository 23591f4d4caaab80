//! HTTP request handlers for roots, proofs and verification.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use airdrop_prover::{
    format_hash, parse_address, parse_balance, EncodingError, MerkleVerifier, ProveError, Record,
};

use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: impl ToString) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

// ============ Root ============

#[derive(Serialize)]
pub struct RootResponse {
    pub root: String,
    pub leaf_count: usize,
    pub depth: usize,
}

pub async fn root(State(state): State<Arc<AppState>>) -> Json<RootResponse> {
    let tree = state.allowlist.tree();
    Json(RootResponse {
        root: state.allowlist.root_hex(),
        leaf_count: tree.leaf_count(),
        depth: tree.depth(),
    })
}

// ============ Leaf ============

#[derive(Deserialize)]
pub struct LeafRequest {
    pub address: String,
    pub balance: String,
}

#[derive(Serialize)]
pub struct LeafResponse {
    pub leaf: String,
}

fn parse_record(address: &str, balance: &str) -> Result<Record, EncodingError> {
    Ok(Record::new(parse_address(address)?, parse_balance(balance)?)?)
}

pub async fn encode_leaf(Json(req): Json<LeafRequest>) -> impl IntoResponse {
    match parse_record(&req.address, &req.balance) {
        Ok(record) => (
            StatusCode::OK,
            Json(LeafResponse {
                leaf: format_hash(&record.leaf_hash()),
            }),
        )
            .into_response(),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e),
    }
}

// ============ Prove ============

#[derive(Deserialize)]
pub struct ProveRequest {
    pub address: String,
    /// Defaults to the balance listed for the address
    #[serde(default)]
    pub balance: Option<String>,
}

pub async fn prove(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProveRequest>,
) -> impl IntoResponse {
    let address = match parse_address(&req.address) {
        Ok(a) => a,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
    };

    let result = match req.balance.as_deref() {
        Some(balance) => match parse_balance(balance) {
            Ok(b) => state.allowlist.prove(address, b),
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
        },
        None => state.allowlist.prove_address(&address),
    };

    match result {
        Ok(claim) => (StatusCode::OK, Json(claim.to_json())).into_response(),
        Err(e @ ProveError::NotListed(_)) => error_response(StatusCode::NOT_FOUND, e),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e),
    }
}

// ============ Verify ============

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub address: String,
    pub balance: String,
    pub proof: Vec<String>,
    /// Defaults to the committed root
    #[serde(default)]
    pub root: Option<String>,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
}

pub async fn verify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyRequest>,
) -> Json<VerifyResponse> {
    let verifier = match req.root.as_deref() {
        Some(root) => MerkleVerifier::from_hex(root).ok(),
        None => Some(MerkleVerifier::new(state.allowlist.root())),
    };

    let valid = verifier
        .map(|v| v.verify_hex(&req.address, &req.proof, &req.balance))
        .unwrap_or(false);

    tracing::debug!(address = %req.address, valid, "verified claim");
    Json(VerifyResponse { valid })
}
