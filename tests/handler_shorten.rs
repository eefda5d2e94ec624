mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use shortlink::api::handlers::shorten_handler;
use shortlink::domain::repositories::LinkRepository;
use shortlink::infrastructure::persistence::MemoryLinkRepository;
use std::sync::Arc;

fn make_server() -> (TestServer, Arc<MemoryLinkRepository>) {
    let (state, repository, _rx) = common::create_test_state();
    let app = Router::new()
        .route("/api/shorten", post(shorten_handler))
        .with_state(state);
    (TestServer::new(app).unwrap(), repository)
}

#[tokio::test]
async fn test_shorten_generated_code() {
    let (server, repository) = make_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/some/long/path" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let json = response.json::<serde_json::Value>();
    let code = json["short_code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(json["short_url"], format!("{}/{}", common::BASE_URL, code));
    assert_eq!(json["original_url"], "https://example.com/some/long/path");
    assert!(json.get("expires_at").is_none());

    let stored = repository.get_by_code(code).await.unwrap();
    assert_eq!(stored.target_url, "https://example.com/some/long/path");
    assert_eq!(stored.click_count, 0);
}

#[tokio::test]
async fn test_shorten_adds_missing_scheme() {
    let (server, _repository) = make_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "example.com" }))
        .await;

    assert_eq!(response.status_code(), 201);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["original_url"], "https://example.com");
}

#[tokio::test]
async fn test_shorten_custom_code() {
    let (server, _repository) = make_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com", "custom_code": "promo" }))
        .await;

    assert_eq!(response.status_code(), 201);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["short_code"], "promo");
    assert_eq!(json["short_url"], "http://sho.rt/promo");
}

#[tokio::test]
async fn test_shorten_empty_custom_code_generates() {
    let (server, _repository) = make_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com", "custom_code": "" }))
        .await;

    assert_eq!(response.status_code(), 201);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["short_code"].as_str().unwrap().len(), 6);
}

#[tokio::test]
async fn test_shorten_duplicate_custom_code_conflict() {
    let (server, repository) = make_server();
    common::create_test_link(&repository, "promo", "https://first.example.com").await;

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://second.example.com", "custom_code": "promo" }))
        .await;

    assert_eq!(response.status_code(), 409);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "conflict");

    let stored = repository.get_by_code("promo").await.unwrap();
    assert_eq!(stored.target_url, "https://first.example.com");
}

#[tokio::test]
async fn test_shorten_code_held_by_expired_link_conflicts() {
    let (server, repository) = make_server();
    common::create_expired_link(&repository, "old", "https://old.example.com").await;

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://new.example.com", "custom_code": "old" }))
        .await;

    assert_eq!(response.status_code(), 409);
}

#[tokio::test]
async fn test_shorten_invalid_custom_code() {
    let (server, repository) = make_server();

    let too_long = "x".repeat(21);
    for code in ["ab", "has space", "bad!", too_long.as_str()] {
        let response = server
            .post("/api/shorten")
            .json(&json!({ "url": "https://example.com", "custom_code": code }))
            .await;

        assert_eq!(response.status_code(), 400, "code {code:?}");
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"]["code"], "validation_error");
        assert_eq!(json["error"]["details"]["field"], "custom_code");
    }

    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let (server, repository) = make_server();

    let too_long = format!("https://example.com/{}", "a".repeat(2100));
    for url in ["https://", "http://[invalid", too_long.as_str()] {
        let response = server
            .post("/api/shorten")
            .json(&json!({ "url": url }))
            .await;

        assert_eq!(response.status_code(), 400);
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"]["code"], "validation_error");
        assert_eq!(json["error"]["details"]["field"], "url");
    }

    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_shorten_empty_url() {
    let (server, _repository) = make_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_malformed_json() {
    let (server, _repository) = make_server();

    let response = server
        .post("/api/shorten")
        .content_type("application/json")
        .text("{ not json")
        .await;

    assert_eq!(response.status_code(), 400);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_missing_url_field() {
    let (server, _repository) = make_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "custom_code": "promo" }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_shorten_with_expiry() {
    let (server, repository) = make_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com", "custom_code": "temp", "expires_in": 3600 }))
        .await;

    assert_eq!(response.status_code(), 201);
    let json = response.json::<serde_json::Value>();
    assert!(json["expires_at"].is_string());

    let stored = repository.get_by_code("temp").await.unwrap();
    let ttl = stored.expires_at.unwrap() - stored.created_at;
    assert_eq!(ttl.num_seconds(), 3600);
}

#[tokio::test]
async fn test_shorten_non_positive_expiry_never_expires() {
    let (server, repository) = make_server();

    for (code, ttl) in [("zero", json!(0)), ("negative", json!(-5)), ("text", json!("0"))] {
        let response = server
            .post("/api/shorten")
            .json(&json!({ "url": "https://example.com", "custom_code": code, "expires_in": ttl }))
            .await;

        assert_eq!(response.status_code(), 201);
        assert!(response.json::<serde_json::Value>().get("expires_at").is_none());
        let stored = repository.get_by_code(code).await.unwrap();
        assert!(stored.expires_at.is_none());
    }
}

#[tokio::test]
async fn test_shorten_rejects_control_characters() {
    let (server, repository) = make_server();

    for url in ["https://example.com/a\nb", "https://exa\tmple.com"] {
        let response = server
            .post("/api/shorten")
            .json(&json!({ "url": url, "custom_code": "ctrl1" }))
            .await;

        assert_eq!(response.status_code(), 400);
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"]["details"]["field"], "url");
    }

    assert!(repository.is_empty());
}
