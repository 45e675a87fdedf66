//! REST API handlers for the explorer UI
//!
//! Serves the discovery catalog and the client settings.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Settings;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub settings: Arc<RwLock<Settings>>,
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

// ============================================================================
// Catalog Endpoints
// ============================================================================

/// GET /api/services - List loaded services
pub async fn list_services(State(state): State<ApiState>) -> impl IntoResponse {
    let settings = state.settings.read().await;
    Json(ApiResponse::success(settings.catalog.summaries()))
}

/// GET /api/services/:name/:version - Full discovery document
pub async fn get_service(
    State(state): State<ApiState>,
    Path((name, version)): Path<(String, String)>,
) -> impl IntoResponse {
    let settings = state.settings.read().await;

    match settings.catalog.get(&name, &version) {
        Some(service) => (
            StatusCode::OK,
            Json(ApiResponse::success(service.as_ref().clone())),
        ),
        None => {
            tracing::debug!("Unknown service requested: {} {}", name, version);
            (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(format!(
                    "Service not found: {} {}",
                    name, version
                ))),
            )
        }
    }
}

/// GET /api/config - Settings the browser needs to issue requests
pub async fn get_config(State(state): State<ApiState>) -> impl IntoResponse {
    let settings = state.settings.read().await;
    Json(ApiResponse::success(settings.client_config()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DiscoverySettings, ServerSettings};
    use crate::domain::catalog::ServiceCatalog;
    use explorer_core::ApiService;

    fn state() -> ApiState {
        let mut catalog = ServiceCatalog::new();
        catalog.insert(ApiService::new("tasks", "v1"));
        ApiState {
            settings: Arc::new(RwLock::new(Settings {
                server: ServerSettings {
                    host: "127.0.0.1".to_string(),
                    port: 3000,
                },
                discovery: DiscoverySettings::default(),
                api_key: Some("secret".to_string()),
                catalog,
            })),
        }
    }

    #[tokio::test]
    async fn test_get_known_service() {
        let response = get_service(
            State(state()),
            Path(("tasks".to_string(), "v1".to_string())),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_unknown_service() {
        let response = get_service(
            State(state()),
            Path(("tasks".to_string(), "v2".to_string())),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_response_shape() {
        let value = serde_json::to_value(ApiResponse::<()>::error("nope")).unwrap();
        assert_eq!(value, serde_json::json!({ "success": false, "error": "nope" }));
    }
}
