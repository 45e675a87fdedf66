use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use explorer::adapters::health_handler::HealthHandler;
use explorer::config::{DiscoverySettings, ServerSettings, Settings};
use explorer::domain::ServiceCatalog;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::util::ServiceExt;

const BUZZ: &str = include_str!("../discovery/buzz.json");

fn create_test_app(catalog: ServiceCatalog) -> Router {
    let settings = Arc::new(RwLock::new(Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        discovery: DiscoverySettings::default(),
        api_key: None,
        catalog,
    }));
    let health_handler = Arc::new(HealthHandler::new(settings.clone()));
    explorer::create_app(settings, health_handler)
}

fn buzz_catalog() -> ServiceCatalog {
    let mut catalog = ServiceCatalog::new();
    catalog.insert(serde_json::from_str(BUZZ).unwrap());
    catalog
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body_bytes).unwrap())
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = create_test_app(buzz_catalog());

    let (status, body) = get_json(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["services"], 1);

    let (status, _) = get_json(app.clone(), "/health/ready").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_json(app, "/health/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_not_ready_without_services() {
    let app = create_test_app(ServiceCatalog::new());
    let (status, body) = get_json(app, "/health/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "not_ready");
}

#[tokio::test]
async fn test_list_services() {
    let app = create_test_app(buzz_catalog());

    let (status, body) = get_json(app, "/api/services").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let services = body["data"].as_array().unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0]["name"], "buzz");
    assert_eq!(services[0]["version"], "v1");
}

#[tokio::test]
async fn test_get_service_document() {
    let app = create_test_app(buzz_catalog());

    let (status, body) = get_json(app, "/api/services/buzz/v1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "buzz");
    assert_eq!(body["data"]["basePath"], "/buzz/v1/");
    assert!(body["data"]["schemas"]["Activity"].is_object());
    assert_eq!(
        body["data"]["resources"]["activities"]["methods"]["list"]["path"],
        "activities/{userId}/{scope}"
    );
}

#[tokio::test]
async fn test_unknown_service_is_not_found() {
    let app = create_test_app(buzz_catalog());

    let (status, body) = get_json(app, "/api/services/buzz/v2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("buzz v2"));
}

#[tokio::test]
async fn test_client_config() {
    let app = create_test_app(ServiceCatalog::new());

    let (status, body) = get_json(app, "/api/config").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].get("rootUrl").is_none());
    assert_eq!(body["data"]["apiKeyConfigured"], false);
    assert!(body["data"].get("apiKey").is_none());
}

#[tokio::test]
async fn test_document_root_url_reaches_client() {
    let mut catalog = ServiceCatalog::new();
    catalog.insert(
        serde_json::from_value(serde_json::json!({
            "name": "local",
            "version": "v1",
            "rootUrl": "http://localhost:8080/",
            "basePath": "/local/v1/"
        }))
        .unwrap(),
    );
    let app = create_test_app(catalog);

    let (status, body) = get_json(app.clone(), "/api/services/local/v1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["rootUrl"], "http://localhost:8080/");

    // The client config carries nothing that would shadow it.
    let (_, body) = get_json(app, "/api/config").await;
    assert!(body["data"].get("rootUrl").is_none());
    assert_eq!(body["data"]["apiKeyConfigured"], false);
}
