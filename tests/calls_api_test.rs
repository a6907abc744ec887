//! End-to-end tests for the call ingestion HTTP surface.
//!
//! Requests go through the full router (extractors, middleware, service,
//! lookup cache) against an in-memory store.

mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::DateTime;
use std::sync::Arc;
use tower::ServiceExt;

use callsink::adapters::cache::LookupCache;
use callsink::adapters::http::{CallsHttpConfig, CallsHttpServer};
use callsink::adapters::memory::{InMemoryStore, StoreOperation};
use callsink::domain::models::LookupEntry;
use callsink::domain::ports::LookupRepository;
use callsink::domain::DomainResult;
use callsink::services::CallService;
use common::{build_app, get, json_body, post_json, seeded_store};

/// Lookup store whose driver blows up on every call.
struct PanickingLookups;

#[async_trait]
impl LookupRepository for PanickingLookups {
    async fn find_campaign(&self, _id: i64) -> DomainResult<bool> {
        panic!("driver bug")
    }

    async fn find_voice_id_by_name(&self, _name: &str) -> DomainResult<Option<i64>> {
        panic!("driver bug")
    }

    async fn find_category_id_by_name(&self, _name: &str) -> DomainResult<Option<i64>> {
        panic!("driver bug")
    }

    async fn list_all_voices(&self) -> DomainResult<Vec<LookupEntry>> {
        panic!("driver bug")
    }

    async fn list_all_categories(&self) -> DomainResult<Vec<LookupEntry>> {
        panic!("driver bug")
    }

    async fn list_enabled_campaign_ids(&self) -> DomainResult<Vec<i64>> {
        panic!("driver bug")
    }
}

#[tokio::test]
async fn test_enabled_campaign_call_is_created() {
    let store = seeded_store().await;
    let (_, app) = build_app(&store).await;

    let response = app
        .oneshot(post_json(
            "/api/calls",
            r#"{"client_campaign_model_id": 5, "number": "15551234567"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["number"], "15551234567");
    assert_eq!(body["message"], "Call saved successfully");
    let timestamp = body["timestamp"].as_str().expect("timestamp is a string");
    assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());

    assert_eq!(store.stored_calls().await.len(), 1);
    assert_eq!(store.calls(StoreOperation::FindCampaign), 0);
}

#[tokio::test]
async fn test_unknown_campaign_is_rejected() {
    let store = seeded_store().await;
    let (cache, app) = build_app(&store).await;

    let response = app
        .oneshot(post_json(
            "/api/calls",
            r#"{"client_campaign_model_id": 999, "number": "15551234567"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Invalid client_campaign_model_id");

    assert!(store.stored_calls().await.is_empty());
    assert_eq!(store.calls(StoreOperation::InsertCall), 0);
    assert_eq!(cache.lookup_campaign(999).await, Some(false));
}

#[tokio::test]
async fn test_unknown_voice_is_rejected_without_caching() {
    let store = seeded_store().await;
    let (cache, app) = build_app(&store).await;

    let response = app
        .oneshot(post_json(
            "/api/calls",
            r#"{"client_campaign_model_id": 5, "number": "15551234567", "voice_name": "Aria"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Voice doesn't exist");

    assert!(store.stored_calls().await.is_empty());
    assert_eq!(cache.lookup_voice("Aria").await, None);
    assert_eq!(store.calls(StoreOperation::FindVoice), 1);
}

#[tokio::test]
async fn test_insert_failure_returns_server_error() {
    let store = seeded_store().await;
    let (_, app) = build_app(&store).await;
    store.fail(StoreOperation::InsertCall).await;

    let response = app
        .oneshot(post_json(
            "/api/calls",
            r#"{
                "client_campaign_model_id": 5,
                "number": "15551234567",
                "voice_name": "Orion",
                "response_category_name": "Interested"
            }"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Failed to save call");
    assert_eq!(store.calls(StoreOperation::InsertCall), 1);
}

#[tokio::test]
async fn test_full_submission_resolves_all_references() {
    let store = seeded_store().await;
    let (_, app) = build_app(&store).await;

    let response = app
        .oneshot(post_json(
            "/api/calls",
            r#"{
                "client_campaign_model_id": 5,
                "number": "15551234567",
                "transcription": "yes please call me back",
                "stage": 3,
                "voice_name": "Nova",
                "response_category_name": "Interested",
                "list_id": "list-77",
                "transferred": true,
                "dispo_punched": false
            }"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let stored = store.stored_calls().await;
    let call = &stored[0].call;
    assert_eq!(call.campaign_id, 5);
    assert_eq!(call.voice_id, Some(2));
    assert_eq!(call.response_category_id, Some(10));
    assert_eq!(call.stage, Some(3));
    assert_eq!(call.list_id.as_deref(), Some("list-77"));
    assert!(call.transferred);
    assert_eq!(call.dispo_punched, Some(false));
}

#[tokio::test]
async fn test_unknown_category_is_rejected() {
    let store = seeded_store().await;
    let (_, app) = build_app(&store).await;

    let response = app
        .oneshot(post_json(
            "/api/calls",
            r#"{"client_campaign_model_id": 5, "number": "1555", "response_category_name": "Hostile"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Response category doesn't exist");
}

#[tokio::test]
async fn test_missing_number_is_rejected() {
    let store = seeded_store().await;
    let (_, app) = build_app(&store).await;

    let response = app
        .oneshot(post_json("/api/calls", r#"{"client_campaign_model_id": 5}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Number is required");
}

#[tokio::test]
async fn test_null_number_is_treated_as_missing() {
    let store = seeded_store().await;
    let (_, app) = build_app(&store).await;

    let response = app
        .oneshot(post_json(
            "/api/calls",
            r#"{"client_campaign_model_id": 5, "number": null, "transferred": null}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Number is required");
}

#[tokio::test]
async fn test_disabled_campaign_is_rejected_and_cached() {
    let store = seeded_store().await;
    let (cache, app) = build_app(&store).await;

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/calls",
                r#"{"client_campaign_model_id": 6, "number": "15551234567"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Invalid client_campaign_model_id");
    }

    assert_eq!(cache.lookup_campaign(6).await, Some(false));
    assert_eq!(store.calls(StoreOperation::FindCampaign), 1);
    assert_eq!(store.calls(StoreOperation::InsertCall), 0);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let store = seeded_store().await;
    let (_, app) = build_app(&store).await;

    for body in [
        "not json",
        r#"{"number": "15551234567"}"#,
        r#"{"client_campaign_model_id": "five", "number": "1"}"#,
    ] {
        let response = app.clone().oneshot(post_json("/api/calls", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let json = json_body(response).await;
        assert_eq!(json["error"], "Invalid request");
    }
    assert_eq!(store.calls(StoreOperation::InsertCall), 0);
}

#[tokio::test]
async fn test_lookup_outage_returns_server_error() {
    let store = seeded_store().await;
    let (_, app) = build_app(&store).await;
    store.fail(StoreOperation::FindCampaign).await;

    let response = app
        .oneshot(post_json(
            "/api/calls",
            r#"{"client_campaign_model_id": 42, "number": "15551234567"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Lookup store unavailable");
}

#[tokio::test]
async fn test_health_reflects_store() {
    let store = seeded_store().await;
    let (_, app) = build_app(&store).await;

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");

    store.fail(StoreOperation::Ping).await;
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_body(response).await["status"], "unhealthy");
}

#[tokio::test]
async fn test_handler_panic_returns_server_error() {
    let calls = Arc::new(InMemoryStore::new());
    let cache = Arc::new(LookupCache::new(Arc::new(PanickingLookups)));
    let service = CallService::new(cache, Arc::clone(&calls));
    let app = CallsHttpServer::new(service, CallsHttpConfig::default()).build_router();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/calls",
            r#"{"client_campaign_model_id": 5, "number": "15551234567"}"#,
        ))
        .await
        .expect("panic should become a response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["error"], "Internal server error");

    // The router keeps serving after a panic.
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(calls.stored_calls().await.is_empty());
}
