//! Common test utilities for integration tests
//!
//! Provides a seeded in-memory store and a router wired exactly as the
//! binary wires it, minus PostgreSQL.

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use std::sync::Arc;

use callsink::adapters::cache::{preload, LookupCache};
use callsink::adapters::http::{CallsHttpConfig, CallsHttpServer};
use callsink::adapters::memory::InMemoryStore;
use callsink::services::CallService;

/// Store with campaigns 5 (enabled) and 6 (disabled), voices Orion/Nova,
/// and two response categories.
pub async fn seeded_store() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    store.add_campaign(5, true).await;
    store.add_campaign(6, false).await;
    store.add_voice(1, "Orion").await;
    store.add_voice(2, "Nova").await;
    store.add_category(10, "Interested").await;
    store.add_category(11, "Do Not Call").await;
    store
}

/// Preload a cache over `store` and build the HTTP router around it.
#[allow(dead_code)]
pub async fn build_app(store: &Arc<InMemoryStore>) -> (Arc<LookupCache<InMemoryStore>>, Router) {
    let cache = Arc::new(LookupCache::new(Arc::clone(store)));
    preload(&cache).await;

    let service = CallService::new(Arc::clone(&cache), Arc::clone(store));
    let router = CallsHttpServer::new(service, CallsHttpConfig::default()).build_router();
    (cache, router)
}

#[allow(dead_code)]
pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

/// Collect a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
