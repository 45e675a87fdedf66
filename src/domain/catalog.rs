//! The set of discovery documents served to the explorer UI.

use explorer_core::ApiService;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Invalid discovery directory pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// Listing entry for one service version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub methods: usize,
}

impl From<&ApiService> for ServiceSummary {
    fn from(service: &ApiService) -> Self {
        Self {
            name: service.name.clone(),
            version: service.version.clone(),
            title: service.title.clone(),
            description: service.description.clone(),
            methods: service.all_methods().len(),
        }
    }
}

/// Loaded discovery documents, in load order. Duplicates are kept so the
/// validator can report them.
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    services: Vec<Arc<ApiService>>,
}

impl ServiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, service: ApiService) {
        self.services.push(Arc::new(service));
    }

    /// First loaded document for a name and version.
    pub fn get(&self, name: &str, version: &str) -> Option<Arc<ApiService>> {
        self.services
            .iter()
            .find(|s| s.name == name && s.version == version)
            .cloned()
    }

    pub fn services(&self) -> &[Arc<ApiService>] {
        &self.services
    }

    /// Summaries sorted by name, then version.
    pub fn summaries(&self) -> Vec<ServiceSummary> {
        let mut summaries: Vec<ServiceSummary> = self
            .services
            .iter()
            .map(|s| ServiceSummary::from(s.as_ref()))
            .collect();
        summaries.sort_by(|a, b| (&a.name, &a.version).cmp(&(&b.name, &b.version)));
        summaries.dedup_by(|a, b| a.name == b.name && a.version == b.version);
        summaries
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Point every service at another root URL, e.g. a local proxy.
    pub fn override_root_url(&mut self, root_url: &str) {
        for service in &mut self.services {
            Arc::make_mut(service).root_url = root_url.to_string();
        }
    }

    /// Load every `.json`, `.yaml`, and `.yml` document in a directory. A
    /// missing directory yields an empty catalog.
    pub fn load_dir(dir: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        if !dir.exists() {
            tracing::warn!("Discovery directory does not exist: {}", dir.display());
            return Ok(catalog);
        }

        let pattern = format!("{}/*", dir.display());
        let mut paths: Vec<_> = glob::glob(&pattern)?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::warn!("Failed to read glob entry: {}", e);
                    None
                }
            })
            .collect();
        paths.sort();

        for path in paths {
            let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            if !matches!(ext, "json" | "yaml" | "yml") {
                continue;
            }
            let content = std::fs::read_to_string(&path).map_err(|source| CatalogError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let service = parse_document(&path, ext, &content)?;
            tracing::debug!(
                "Loaded discovery document {} {} from {}",
                service.name,
                service.version,
                path.display()
            );
            catalog.insert(service);
        }

        tracing::info!("Loaded {} discovery documents from {}", catalog.len(), dir.display());
        Ok(catalog)
    }
}

fn parse_document(path: &Path, ext: &str, content: &str) -> Result<ApiService, CatalogError> {
    let parsed = if ext == "json" {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    };
    parsed.map_err(|reason| CatalogError::Parse {
        path: path.display().to_string(),
        reason,
    })
}
