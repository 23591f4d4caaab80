//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use airdrop_prover::{Allowlist, Snapshot};

use crate::{app, AppState};

const SNAPSHOT: &str = r#"[
    { "address": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266", "balance": "100000000000000000000" },
    { "address": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8", "balance": "200000000000000000000" },
    { "address": "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC", "balance": "300000000000000000000" }
]"#;

const ROOT: &str = "0xc44ad8e9a229cc5af5b91c2412abf15a09962820c083552c08dd10ca11cdb0be";

fn test_app() -> axum::Router {
    let snapshot = Snapshot::from_json_str(SNAPSHOT).unwrap();
    let allowlist = Allowlist::from_snapshot(&snapshot).unwrap();
    app(Arc::new(AppState { allowlist }))
}

async fn send(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = test_app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_root() {
    let (status, body) = send("GET", "/api/root", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["root"], ROOT);
    assert_eq!(body["leaf_count"], 3);
    assert_eq!(body["depth"], 2);
}

#[tokio::test]
async fn test_prove_then_verify() {
    let (status, claim) = send(
        "POST",
        "/api/prove",
        Some(json!({ "address": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(claim["root"], ROOT);
    assert_eq!(claim["balance"], "200000000000000000000");
    assert_eq!(claim["proof"].as_array().unwrap().len(), 2);

    let (status, body) = send(
        "POST",
        "/api/verify",
        Some(json!({
            "address": claim["address"],
            "balance": claim["balance"],
            "proof": claim["proof"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
}

#[tokio::test]
async fn test_verify_wrong_balance() {
    let (_, claim) = send(
        "POST",
        "/api/prove",
        Some(json!({ "address": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266" })),
    )
    .await;

    let (status, body) = send(
        "POST",
        "/api/verify",
        Some(json!({
            "address": claim["address"],
            "balance": "100000000000000000001",
            "proof": claim["proof"],
            "root": ROOT,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
}

#[tokio::test]
async fn test_verify_malformed_proof_is_false() {
    let (status, body) = send(
        "POST",
        "/api/verify",
        Some(json!({
            "address": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
            "balance": "100000000000000000000",
            "proof": ["0x12"],
            "root": "not-a-root",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
}

#[tokio::test]
async fn test_prove_unlisted() {
    let (status, body) = send(
        "POST",
        "/api/prove",
        Some(json!({ "address": "0x90F79bf6EB2c4f870365E785982E1f101E93b906" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not on the allowlist"));

    let (status, _) = send(
        "POST",
        "/api/prove",
        Some(json!({
            "address": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
            "balance": "5",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_prove_bad_address() {
    let (status, _) = send("POST", "/api/prove", Some(json!({ "address": "0x1234" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_encode_leaf() {
    let (status, body) = send(
        "POST",
        "/api/leaf/encode",
        Some(json!({
            "address": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
            "balance": "100000000000000000000",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["leaf"],
        "0x5f494f9fb7a0fdd304bf18018ddbdad949e2c04676b775ce1cc5899d5ba94030"
    );

    let (status, _) = send(
        "POST",
        "/api/leaf/encode",
        Some(json!({ "address": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266", "balance": "-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
