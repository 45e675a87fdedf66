use explorer::adapters::health_handler::HealthHandler;
use explorer::config::{DiscoverySettings, ServerSettings, Settings};
use explorer::domain::ServiceCatalog;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct TestServer {
    pub addr: SocketAddr,
    pub base_url: String,
    pub settings: Arc<RwLock<Settings>>,
}

impl TestServer {
    pub async fn new() -> Self {
        let mut catalog = ServiceCatalog::new();
        catalog.insert(serde_json::from_str(include_str!("../../../discovery/buzz.json")).unwrap());
        Self::with_catalog(catalog).await
    }

    pub async fn with_catalog(catalog: ServiceCatalog) -> Self {
        // Create test configuration
        let settings = Arc::new(RwLock::new(Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
            },
            discovery: DiscoverySettings::default(),
            api_key: Some("test-key".to_string()),
            catalog,
        }));

        let health_handler = Arc::new(HealthHandler::new(settings.clone()));
        let app = explorer::create_app(settings.clone(), health_handler);

        // Start server on random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to be ready
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestServer {
            addr,
            base_url,
            settings,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
