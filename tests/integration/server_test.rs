use crate::common::test_server::TestServer;
use explorer::domain::ServiceCatalog;
use explorer_core::{ApiService, AppState, SchemaForm};
use std::sync::Arc;

#[tokio::test]
async fn test_health_endpoint() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let response = client.get(server.url("/health")).send().await.unwrap();

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].is_number());
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_fetched_document_drives_form() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .get(server.url("/api/services/buzz/v1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let service: ApiService = serde_json::from_value(body["data"].clone()).unwrap();

    let service = Arc::new(service);
    let mut form = SchemaForm::new(Arc::new(AppState::new(service.clone())));
    form.set_method(service, "activities.insert");
    assert_eq!(
        form.string_value(),
        r#"{"object":{"content":""},"title":""}"#
    );
}

#[tokio::test]
async fn test_config_exposes_api_key() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .get(server.url("/api/config"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["data"]["apiKeyConfigured"], true);
    assert_eq!(body["data"]["apiKey"], "test-key");
}

#[tokio::test]
async fn test_reload_is_visible_to_requests() {
    let server = TestServer::with_catalog(ServiceCatalog::new()).await;
    let client = reqwest::Client::new();

    let response = client.get(server.url("/health/ready")).send().await.unwrap();
    assert_eq!(response.status(), 503);

    let mut catalog = ServiceCatalog::new();
    catalog.insert(ApiService::new("tasks", "v1"));
    server.settings.write().await.catalog = catalog;

    let response = client.get(server.url("/health/ready")).send().await.unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = client
        .get(server.url("/api/services"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"][0]["name"], "tasks");
}

#[tokio::test]
async fn test_spa_fallback() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let response = client.get(server.url("/services/buzz")).send().await.unwrap();
    assert_eq!(response.status(), 200);

    let response = client.get(server.url("/pkg/missing.wasm")).send().await.unwrap();
    assert_eq!(response.status(), 404);
}
