use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Settings;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub config: String,
    pub services: usize,
}

pub struct HealthHandler {
    settings: Arc<RwLock<Settings>>,
    start_time: std::time::Instant,
}

impl HealthHandler {
    pub fn new(settings: Arc<RwLock<Settings>>) -> Self {
        Self {
            settings,
            start_time: std::time::Instant::now(),
        }
    }

    /// Basic health check - returns 200 if server is running
    pub async fn health(&self) -> impl IntoResponse {
        let services = self.settings.read().await.catalog.len();
        let status = HealthStatus {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            checks: HealthChecks {
                config: "ok".to_string(),
                services,
            },
        };

        (StatusCode::OK, Json(status))
    }

    /// Readiness check - ready once at least one discovery document is loaded
    pub async fn ready(&self) -> impl IntoResponse {
        let settings = self.settings.read().await;

        if !settings.catalog.is_empty() {
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "status": "ready",
                    "message": format!("{} services loaded", settings.catalog.len())
                })),
            )
        } else {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "not_ready",
                    "message": "No discovery documents loaded"
                })),
            )
        }
    }

    /// Liveness check
    pub async fn live(&self) -> impl IntoResponse {
        (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "alive",
                "message": "Server is alive"
            })),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DiscoverySettings, ServerSettings};
    use crate::domain::catalog::ServiceCatalog;
    use explorer_core::ApiService;

    fn settings(catalog: ServiceCatalog) -> Arc<RwLock<Settings>> {
        Arc::new(RwLock::new(Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            discovery: DiscoverySettings::default(),
            api_key: None,
            catalog,
        }))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let handler = HealthHandler::new(settings(ServiceCatalog::new()));
        let response = handler.health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_requires_services() {
        let handler = HealthHandler::new(settings(ServiceCatalog::new()));
        let response = handler.ready().await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let mut catalog = ServiceCatalog::new();
        catalog.insert(ApiService::new("tasks", "v1"));
        let handler = HealthHandler::new(settings(catalog));
        let response = handler.ready().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_live_endpoint() {
        let handler = HealthHandler::new(settings(ServiceCatalog::new()));
        let response = handler.live().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
