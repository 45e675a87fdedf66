use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod validator;
pub mod watcher;

use crate::cli::Cli;
use crate::domain::catalog::ServiceCatalog;

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub discovery: DiscoverySettings,
    /// Browser API key appended as `key=` to explorer requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Documents loaded from `discovery.directory`.
    #[serde(skip)]
    pub catalog: ServiceCatalog,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscoverySettings {
    /// Directory of discovery documents, relative to the config file.
    #[serde(default = "default_discovery_dir")]
    pub directory: String,
    /// Replaces the `rootUrl` of every loaded document when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_url: Option<String>,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            directory: default_discovery_dir(),
            root_url: None,
        }
    }
}

fn default_discovery_dir() -> String {
    "discovery".to_string()
}

/// Settings the browser needs, served at `/api/config`. Requests go to each
/// service's own `rootUrl`, which already carries any configured override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub api_key_configured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Create settings from CLI arguments (includes config file and CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let config_path = &cli.config;
        let root = config_root(config_path);

        let s = Config::builder()
            .add_source(File::from(config_path.clone()).required(false))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.load_catalog(&root)?;
        settings.validate()?;

        Ok(settings)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(dir) = &cli.discovery_dir {
            self.discovery.directory = dir.display().to_string();
        }
    }

    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = Path::new(root).join("explorer");
        let s = Config::builder()
            .add_source(File::from(config_path).required(false))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        settings.load_catalog(Path::new(root))?;
        settings.validate()?;

        Ok(settings)
    }

    /// Resolved discovery directory for a config root.
    pub fn discovery_dir(&self, root: &Path) -> PathBuf {
        let dir = Path::new(&self.discovery.directory);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            root.join(dir)
        }
    }

    fn load_catalog(&mut self, root: &Path) -> Result<(), anyhow::Error> {
        let mut catalog = ServiceCatalog::load_dir(&self.discovery_dir(root))?;
        if let Some(root_url) = &self.discovery.root_url {
            catalog.override_root_url(root_url);
        }
        self.catalog = catalog;
        Ok(())
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        let api_key = self.api_key.clone().filter(|k| !k.is_empty());
        ClientConfig {
            api_key_configured: api_key.is_some(),
            api_key,
        }
    }
}

/// Directory holding the config file; discovery paths resolve against it.
pub fn config_root(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
