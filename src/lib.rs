//! # Explorer - API Explorer Server
//!
//! Explorer serves discovery documents and a browser UI that turns them into
//! request forms and readable, link-annotated responses. The form and
//! rendering logic lives in `explorer-core`; this crate loads, validates, and
//! serves the documents.
//!
//! ## Features
//!
//! - **Discovery catalog**: JSON or YAML documents loaded from a directory
//! - **Health Checks**: Kubernetes-ready health endpoints
//! - **Live Reload**: Automatic configuration and catalog reloading
//! - **Validation**: Cross-reference checks on every loaded document
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use explorer::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Load configuration and the discovery catalog
//!     let settings = Settings::new()?;
//!     println!("{} services loaded", settings.catalog.len());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;

use crate::adapters::api_handler::{self, ApiState};
use crate::adapters::health_handler::HealthHandler;
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Creates the Axum application router with all endpoints configured.
///
/// # Arguments
///
/// * `settings` - Application settings, including the loaded catalog
/// * `health_handler` - Health check handler
///
/// # Returns
///
/// Configured Axum Router
pub fn create_app(
    settings: Arc<RwLock<crate::config::Settings>>,
    health_handler: Arc<HealthHandler>,
) -> Router {
    let health_router = Router::new()
        .route("/health", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.health().await }
            }
        }))
        .route("/health/ready", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.ready().await }
            }
        }))
        .route("/health/live", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.live().await }
            }
        }));

    let api_router = Router::new()
        .route("/services", get(api_handler::list_services))
        .route("/services/:name/:version", get(api_handler::get_service))
        .route("/config", get(api_handler::get_config))
        .with_state(ApiState { settings });

    health_router
        .nest("/api", api_router)
        // UI endpoint (catch-all for SPA)
        .fallback(crate::adapters::ui_handler::UIHandler::serve)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
}
