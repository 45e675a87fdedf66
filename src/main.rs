use clap::Parser;
use explorer::adapters::health_handler::HealthHandler;
use explorer::cli::Cli;
use explorer::config::{config_root, watcher::ConfigWatcher, Settings};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Load configuration and discovery documents
    let settings = Settings::new_with_cli(&cli)?;
    let host = settings.server.host.clone();
    let port = settings.server.port;

    if cli.check {
        for summary in settings.catalog.summaries() {
            info!(
                "{} {}: {} methods",
                summary.name, summary.version, summary.methods
            );
        }
        info!("Configuration OK: {} services", settings.catalog.len());
        return Ok(());
    }

    info!("Starting API Explorer on {}:{}", host, port);

    let discovery_dir = settings.discovery_dir(&config_root(&cli.config));

    // Wrap settings in Arc<RwLock> for live reload
    let settings = Arc::new(RwLock::new(settings));

    // Start config watcher
    let settings_for_watcher = settings.clone();
    let cli_for_watcher = cli.clone();
    let _watcher = ConfigWatcher::new(vec![cli.config.clone(), discovery_dir], move || {
        match Settings::new_with_cli(&cli_for_watcher) {
            Ok(new_settings) => {
                let services = new_settings.catalog.len();
                let mut w = settings_for_watcher.blocking_write();
                *w = new_settings;
                info!("Configuration reloaded successfully ({} services)", services);
            }
            Err(e) => error!("Failed to reload configuration: {}", e),
        }
    })?;

    let health_handler = Arc::new(HealthHandler::new(settings.clone()));

    // Create application using the library function
    let app = explorer::create_app(settings, health_handler);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
