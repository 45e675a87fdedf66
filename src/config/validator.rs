use std::collections::HashMap;
use thiserror::Error;

use explorer_core::{ApiService, Schema};

use crate::config::{DiscoverySettings, ServerSettings, Settings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Cross-reference error: {0}")]
    CrossReference(String),

    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_server(&settings.server) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_discovery(&settings.discovery) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_services(settings.catalog.services()) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(server: &ServerSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if server.host.is_empty() {
            errors.push(ValidationError::MissingField("server.host".to_string()));
        }

        if server.port == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_discovery(discovery: &DiscoverySettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if discovery.directory.is_empty() {
            errors.push(ValidationError::MissingField(
                "discovery.directory".to_string(),
            ));
        }

        if let Some(root_url) = &discovery.root_url {
            if !root_url.starts_with("http://") && !root_url.starts_with("https://") {
                errors.push(ValidationError::InvalidValue {
                    field: "discovery.root_url".to_string(),
                    reason: format!("'{}' is not an http(s) URL", root_url),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_services<S: AsRef<ApiService>>(services: &[S]) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut seen = HashMap::new();

        for (idx, service) in services.iter().enumerate() {
            let service = service.as_ref();

            if service.name.is_empty() {
                errors.push(ValidationError::MissingField(format!(
                    "services[{}].name",
                    idx
                )));
            }
            if service.version.is_empty() {
                errors.push(ValidationError::MissingField(format!(
                    "services[{}].version",
                    idx
                )));
            }

            if let Some(prev_idx) = seen.insert((&service.name, &service.version), idx) {
                errors.push(ValidationError::Duplicate(format!(
                    "Service '{} {}' appears at indices {} and {}",
                    service.name, service.version, prev_idx, idx
                )));
            }

            errors.extend(Self::validate_method_refs(service));
            Self::warn_dangling_property_refs(service);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Request and response schemas must exist; the form and renderer are
    /// built from them.
    fn validate_method_refs(service: &ApiService) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (key, method) in service.all_methods() {
            let refs = method
                .request
                .iter()
                .map(|r| ("request", &r.reference))
                .chain(method.response.iter().map(|r| ("response", &r.reference)));
            for (kind, name) in refs {
                if service.schema(name).is_none() {
                    errors.push(ValidationError::CrossReference(format!(
                        "{} {}: method '{}' {} refers to unknown schema '{}'",
                        service.name, service.version, key, kind, name
                    )));
                }
            }

            if !method.path.is_empty() {
                for param in method.path_parameters() {
                    if !method.parameters.is_empty() && !method.parameters.contains_key(&param) {
                        errors.push(ValidationError::CrossReference(format!(
                            "{} {}: method '{}' path uses undeclared parameter '{}'",
                            service.name, service.version, key, param
                        )));
                    }
                }
            } else {
                errors.push(ValidationError::MissingField(format!(
                    "{} {}: methods.{}.path",
                    service.name, service.version, key
                )));
            }
        }

        errors
    }

    /// Property-level `$ref`s to unknown schemas degrade to empty objects in
    /// the form, so they are only reported.
    fn warn_dangling_property_refs(service: &ApiService) {
        fn walk(service: &ApiService, owner: &str, schema: &Schema) {
            if let Some(name) = &schema.reference {
                if service.schema(name).is_none() {
                    tracing::warn!(
                        "{} {}: schema '{}' refers to unknown schema '{}'",
                        service.name,
                        service.version,
                        owner,
                        name
                    );
                }
            }
            for child in schema.properties.values() {
                walk(service, owner, child);
            }
            if let Some(items) = &schema.items {
                walk(service, owner, items);
            }
        }

        for (name, schema) in &service.schemas {
            walk(service, name, schema);
        }
    }
}
