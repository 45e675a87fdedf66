//! Discovery documents: services, their methods, and the explorer context.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::schema::Schema;

/// Root URL used when a discovery document does not name one.
pub const DEFAULT_ROOT_URL: &str = "https://www.googleapis.com";

fn default_root_url() -> String {
    DEFAULT_ROOT_URL.to_string()
}

/// HTTP verb of an API method.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl HttpMethod {
    /// GET and HEAD requests never carry a body.
    pub fn accepts_body(&self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Head)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        }
    }
}

/// Where a parameter is carried in the request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    #[default]
    Query,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiParameter {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub location: ParameterLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default)]
    pub repeated: bool,
}

/// Reference from a method to its request or response schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchemaRef {
    #[serde(rename = "$ref")]
    pub reference: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMethod {
    /// Operation identifier, e.g. `buzz.activities.list`. Schema annotations
    /// are keyed by it.
    #[serde(default)]
    pub id: String,
    /// Path template relative to the service base path.
    pub path: String,
    #[serde(default)]
    pub http_method: HttpMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, ApiParameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameter_order: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<SchemaRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<SchemaRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
}

impl ApiMethod {
    pub fn new(path: impl Into<String>, http_method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            http_method,
            ..Default::default()
        }
    }

    /// Names of the `{placeholders}` in the path template, in order.
    pub fn path_parameters(&self) -> Vec<String> {
        crate::link::parse_template(&self.path)
            .into_iter()
            .filter_map(|part| match part {
                crate::link::TemplatePart::Placeholder(name) => Some(name),
                crate::link::TemplatePart::Literal(_) => None,
            })
            .collect()
    }
}

/// A group of methods, possibly nested.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResource {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub methods: BTreeMap<String, ApiMethod>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, ApiResource>,
}

/// A discovery document describing one version of one API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiService {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_root_url")]
    pub root_url: String,
    #[serde(default)]
    pub base_path: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub schemas: BTreeMap<String, Schema>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub methods: BTreeMap<String, ApiMethod>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, ApiResource>,
    /// Parameters accepted by every method, e.g. `fields` and `alt`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, ApiParameter>,
}

impl ApiService {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            title: None,
            description: None,
            root_url: default_root_url(),
            base_path: String::new(),
            schemas: BTreeMap::new(),
            methods: BTreeMap::new(),
            resources: BTreeMap::new(),
            parameters: BTreeMap::new(),
        }
    }

    /// Every method of the service keyed by its dotted resource path
    /// (`activities.list`), top-level methods first, then resources in
    /// sorted order.
    pub fn all_methods(&self) -> Vec<(String, &ApiMethod)> {
        let mut out: Vec<(String, &ApiMethod)> = self
            .methods
            .iter()
            .map(|(name, method)| (name.clone(), method))
            .collect();
        for (name, resource) in &self.resources {
            collect_methods(name, resource, &mut out);
        }
        out
    }

    /// Look up a method by its dotted key.
    pub fn method(&self, key: &str) -> Option<&ApiMethod> {
        if let Some(method) = self.methods.get(key) {
            return Some(method);
        }
        let mut parts: Vec<&str> = key.split('.').collect();
        let method_name = parts.pop()?;
        let mut resources = &self.resources;
        let mut current: Option<&ApiResource> = None;
        for part in parts {
            let resource = resources.get(part)?;
            resources = &resource.resources;
            current = Some(resource);
        }
        current?.methods.get(method_name)
    }

    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Schema of the body a method accepts, when it takes one.
    pub fn request_schema(&self, method: &ApiMethod) -> Option<&Schema> {
        method
            .request
            .as_ref()
            .and_then(|r| self.schema(&r.reference))
    }

    /// Schema of the body a method returns.
    pub fn response_schema(&self, method: &ApiMethod) -> Option<&Schema> {
        method
            .response
            .as_ref()
            .and_then(|r| self.schema(&r.reference))
    }

    /// `rootUrl` joined with `basePath`: the prefix every request URL of this
    /// service starts with.
    pub fn api_link_prefix(&self) -> String {
        format!("{}{}", self.root_url.trim_end_matches('/'), self.base_path)
    }
}

fn collect_methods<'a>(
    prefix: &str,
    resource: &'a ApiResource,
    out: &mut Vec<(String, &'a ApiMethod)>,
) {
    for (name, method) in &resource.methods {
        out.push((format!("{}.{}", prefix, name), method));
    }
    for (name, child) in &resource.resources {
        collect_methods(&format!("{}.{}", prefix, name), child, out);
    }
}

/// Lookups the form builder and the renderer need about the service being
/// explored. Passed explicitly rather than read from global state.
pub trait ServiceContext: Send + Sync {
    /// The service currently selected.
    fn service(&self) -> &ApiService;

    /// Identifier of the selected operation, used to resolve per-operation
    /// annotations.
    fn current_method_id(&self) -> Option<&str>;

    /// Resolve a named top-level schema.
    fn schema(&self, name: &str) -> Option<&Schema> {
        self.service().schema(name)
    }
}

/// The explorer's selection: a service and, optionally, one of its methods.
#[derive(Clone, Debug)]
pub struct AppState {
    service: Arc<ApiService>,
    method_key: Option<String>,
}

impl AppState {
    pub fn new(service: Arc<ApiService>) -> Self {
        Self {
            service,
            method_key: None,
        }
    }

    /// Select a method by its dotted key. Unknown keys clear the selection.
    pub fn select_method(&mut self, key: &str) -> Option<&ApiMethod> {
        if self.service.method(key).is_some() {
            self.method_key = Some(key.to_string());
        } else {
            tracing::warn!(service = %self.service.name, method = key, "Unknown method selected");
            self.method_key = None;
        }
        self.current_method()
    }

    pub fn with_method(mut self, key: &str) -> Self {
        self.select_method(key);
        self
    }

    pub fn method_key(&self) -> Option<&str> {
        self.method_key.as_deref()
    }

    pub fn current_method(&self) -> Option<&ApiMethod> {
        self.method_key
            .as_deref()
            .and_then(|key| self.service.method(key))
    }

    pub fn shared_service(&self) -> Arc<ApiService> {
        self.service.clone()
    }
}

impl ServiceContext for AppState {
    fn service(&self) -> &ApiService {
        &self.service
    }

    /// Falls back to the method key when the document omits method ids.
    fn current_method_id(&self) -> Option<&str> {
        let method = self.current_method()?;
        if method.id.is_empty() {
            self.method_key.as_deref()
        } else {
            Some(method.id.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tasks_service() -> ApiService {
        serde_json::from_value(json!({
            "name": "tasks",
            "version": "v1",
            "basePath": "/tasks/v1/",
            "schemas": {
                "Task": { "id": "Task", "type": "object", "properties": { "title": { "type": "string" } } }
            },
            "resources": {
                "tasks": {
                    "methods": {
                        "insert": {
                            "id": "tasks.tasks.insert",
                            "path": "lists/{tasklist}/tasks",
                            "httpMethod": "POST",
                            "request": { "$ref": "Task" },
                            "response": { "$ref": "Task" }
                        },
                        "list": {
                            "id": "tasks.tasks.list",
                            "path": "lists/{tasklist}/tasks",
                            "httpMethod": "GET"
                        }
                    }
                },
                "tasklists": {
                    "methods": {
                        "get": { "id": "tasks.tasklists.get", "path": "users/@me/lists/{tasklist}" }
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_all_methods_flattens_resources() {
        let service = tasks_service();
        let keys: Vec<String> = service.all_methods().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["tasklists.get", "tasks.insert", "tasks.list"]);
        assert_eq!(service.root_url, DEFAULT_ROOT_URL);
    }

    #[test]
    fn test_method_lookup_and_schemas() {
        let service = tasks_service();
        let insert = service.method("tasks.insert").unwrap();
        assert_eq!(insert.http_method, HttpMethod::Post);
        assert!(insert.http_method.accepts_body());
        assert_eq!(service.request_schema(insert).unwrap().id.as_deref(), Some("Task"));

        let get = service.method("tasklists.get").unwrap();
        assert_eq!(get.http_method, HttpMethod::Get);
        assert!(!get.http_method.accepts_body());
        assert!(service.request_schema(get).is_none());
        assert_eq!(get.path_parameters(), vec!["tasklist"]);

        assert!(service.method("tasks.missing").is_none());
        assert!(service.method("nothing").is_none());
    }

    #[test]
    fn test_app_state_method_id() {
        let state = AppState::new(Arc::new(tasks_service())).with_method("tasks.insert");
        assert_eq!(state.current_method_id(), Some("tasks.tasks.insert"));
        assert_eq!(state.method_key(), Some("tasks.insert"));

        let state = state.with_method("tasks.unknown");
        assert_eq!(state.current_method_id(), None);
    }
}
