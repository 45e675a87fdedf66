//! Shared types for the Explorer Web UI
//!
//! These types mirror the backend API response structures.

use serde::{Deserialize, Serialize};

/// Generic API response wrapper
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// Listing entry for one service version
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServiceSummary {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub methods: usize,
}

impl ServiceSummary {
    pub fn display_name(&self) -> String {
        match &self.title {
            Some(title) => format!("{} ({})", title, self.version),
            None => format!("{} {}", self.name, self.version),
        }
    }
}

/// Settings the server hands to the browser
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub api_key_configured: bool,
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Outcome of sending a request to the API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl ApiResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Operation selection decoded from the URL fragment:
/// `#_s=<service>&_v=<version>&_m=<method>&<param>=<value>...`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeepLink {
    pub service: Option<String>,
    pub version: Option<String>,
    pub method: Option<String>,
    /// Parameter bindings in fragment order. A name may repeat.
    pub params: Vec<(String, String)>,
}

impl DeepLink {
    pub fn parse(fragment: &str) -> Self {
        let mut link = DeepLink::default();
        let fragment = fragment.trim_start_matches('#');

        for pair in fragment.split('&').filter(|p| !p.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string());
            match name {
                "_s" => link.service = Some(value),
                "_v" => link.version = Some(value),
                "_m" => link.method = Some(value),
                _ => link.params.push((name.to_string(), value)),
            }
        }

        link
    }

    /// Whether the link names a service version other than the given one.
    pub fn targets_other(&self, name: &str, version: &str) -> bool {
        match (&self.service, &self.version) {
            (Some(s), Some(v)) => s != name || v != version,
            _ => false,
        }
    }
}
