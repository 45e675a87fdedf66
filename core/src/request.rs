//! Building request paths from parameter values.

use std::collections::BTreeMap;

use crate::discovery::{ApiMethod, ApiService, HttpMethod};
use crate::error::RequestError;
use crate::link::{parse_template, TemplatePart};

/// Query parameter carrying the API key.
pub const API_KEY_PARAM: &str = "key";

/// Path of the discovery document for one version of a service.
pub fn discovery_path(service: &str, version: &str) -> Result<String, RequestError> {
    if service.is_empty() {
        return Err(RequestError::InvalidArgument(
            "Service name cannot be null or empty",
        ));
    }
    if version.is_empty() {
        return Err(RequestError::InvalidArgument(
            "Version cannot be null or empty",
        ));
    }
    Ok(format!("/discovery/v1/apis/{}/{}/rest", service, version))
}

/// Percent-encode a path segment, leaving `@` intact.
pub fn encode_path_segment(segment: &str) -> String {
    segment
        .split('@')
        .map(|part| urlencoding::encode(part).into_owned())
        .collect::<Vec<_>>()
        .join("@")
}

pub fn encode_query_string(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// A request to send: either a method invocation with parameter values, or a
/// GET of a fixed path.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub http_method: HttpMethod,
    method: Option<(String, ApiMethod)>,
    base_path: String,
    fixed_path: Option<String>,
    /// Parameter name -> values, in the order they were added.
    pub param_values: BTreeMap<String, Vec<String>>,
    body: Option<String>,
}

impl ApiRequest {
    pub fn for_method(service: &ApiService, method_key: &str) -> Result<Self, RequestError> {
        let method = service
            .method(method_key)
            .ok_or_else(|| RequestError::UnknownMethod(method_key.to_string()))?;

        let mut param_values = BTreeMap::new();
        for (name, param) in &method.parameters {
            if let Some(default) = &param.default {
                if param.required {
                    param_values.insert(name.clone(), vec![default.clone()]);
                }
            }
        }

        Ok(Self {
            http_method: method.http_method,
            method: Some((method_key.to_string(), method.clone())),
            base_path: service.base_path.clone(),
            fixed_path: None,
            param_values,
            body: None,
        })
    }

    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            http_method: HttpMethod::Get,
            method: None,
            base_path: String::new(),
            fixed_path: Some(path.into()),
            param_values: BTreeMap::new(),
            body: None,
        }
    }

    pub fn method_key(&self) -> Option<&str> {
        self.method.as_ref().map(|(key, _)| key.as_str())
    }

    pub fn method(&self) -> Option<&ApiMethod> {
        self.method.as_ref().map(|(_, method)| method)
    }

    /// Append a value to a parameter.
    pub fn add_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.param_values
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// Replace every value of a parameter.
    pub fn set_param(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.param_values.insert(name.into(), values);
    }

    /// Add the API key as the `key` parameter. Empty keys are ignored.
    pub fn set_api_key(&mut self, api_key: &str) {
        if !api_key.is_empty() {
            self.set_param(API_KEY_PARAM, vec![api_key.to_string()]);
        }
    }

    /// Attach a body. Methods whose verb carries no body drop it.
    pub fn set_body(&mut self, body: impl Into<String>) {
        let body = body.into();
        if self.http_method.accepts_body() && !body.is_empty() {
            self.body = Some(body);
        } else {
            self.body = None;
        }
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Path and query string of the request. Unset path parameters are left
    /// empty.
    pub fn request_path(&self) -> String {
        if let Some(path) = &self.fixed_path {
            return path.clone();
        }
        let Some((_, method)) = &self.method else {
            return self.base_path.clone();
        };

        let mut path = self.base_path.clone();
        let mut path_params = Vec::new();
        for part in parse_template(&method.path) {
            match part {
                TemplatePart::Literal(lit) => path.push_str(&lit),
                TemplatePart::Placeholder(name) => {
                    if let Some(value) = self.param_values.get(&name).and_then(|v| v.first()) {
                        path.push_str(&encode_path_segment(value));
                    }
                    path_params.push(name);
                }
            }
        }

        let query: Vec<String> = self
            .param_values
            .iter()
            .filter(|(name, _)| !path_params.contains(*name))
            .flat_map(|(name, values)| {
                values
                    .iter()
                    .map(move |value| format!("{}={}", name, encode_query_string(value)))
            })
            .collect();

        if !query.is_empty() {
            path.push('?');
            path.push_str(&query.join("&"));
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ApiService {
        let mut service = ApiService::new("service", "v1");
        service.base_path = "/base".to_string();
        service.methods.insert(
            "method".to_string(),
            ApiMethod::new("/path/to/{pathParam}", HttpMethod::Get),
        );
        service
            .methods
            .insert("create".to_string(), ApiMethod::new("/items", HttpMethod::Post));
        service
    }

    #[test]
    fn test_request_path_with_params() {
        let service = service();
        let mut request = ApiRequest::for_method(&service, "method").unwrap();
        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.request_path(), "/base/path/to/");

        request.add_param("pathParam", "1234");
        assert_eq!(request.request_path(), "/base/path/to/1234");

        request.set_param("pathParam", vec!["12/34".to_string()]);
        assert_eq!(request.request_path(), "/base/path/to/12%2F34");

        request.add_param("nonPathParam", "abc/de");
        assert_eq!(
            request.request_path(),
            "/base/path/to/12%2F34?nonPathParam=abc%2Fde"
        );
    }

    #[test]
    fn test_repeated_query_params() {
        let service = service();
        let mut request = ApiRequest::for_method(&service, "method").unwrap();
        request.add_param("b", "2");
        request.add_param("a", "x y");
        request.add_param("b", "3");
        assert_eq!(request.request_path(), "/base/path/to/?a=x%20y&b=2&b=3");
    }

    #[test]
    fn test_at_sign_kept_in_path() {
        assert_eq!(encode_path_segment("@me"), "@me");
        assert_eq!(encode_path_segment("a b@c/d"), "a%20b@c%2Fd");
        assert_eq!(encode_query_string("@me"), "%40me");
    }

    #[test]
    fn test_api_key() {
        let service = service();
        let mut request = ApiRequest::for_method(&service, "method").unwrap();
        request.set_api_key("");
        assert!(!request.param_values.contains_key(API_KEY_PARAM));

        request.set_api_key("MY_API_KEY");
        assert_eq!(
            request.param_values.get(API_KEY_PARAM),
            Some(&vec!["MY_API_KEY".to_string()])
        );
        assert_eq!(request.request_path(), "/base/path/to/?key=MY_API_KEY");
    }

    #[test]
    fn test_fixed_path_request() {
        let mut request = ApiRequest::from_path("/some/path");
        assert_eq!(request.request_path(), "/some/path");
        assert_eq!(request.http_method, HttpMethod::Get);
        assert!(request.method().is_none());

        request.set_api_key("MY_API_KEY");
        assert_eq!(request.request_path(), "/some/path");
    }

    #[test]
    fn test_body_only_for_body_methods() {
        let service = service();
        let mut get = ApiRequest::for_method(&service, "method").unwrap();
        get.set_body(r#"{"a":1}"#);
        assert_eq!(get.body(), None);

        let mut post = ApiRequest::for_method(&service, "create").unwrap();
        post.set_body(r#"{"a":1}"#);
        assert_eq!(post.body(), Some(r#"{"a":1}"#));
        post.set_body("");
        assert_eq!(post.body(), None);
    }

    #[test]
    fn test_unknown_method() {
        assert_eq!(
            ApiRequest::for_method(&service(), "missing"),
            Err(RequestError::UnknownMethod("missing".to_string()))
        );
    }

    #[test]
    fn test_discovery_path() {
        assert_eq!(
            discovery_path("service", "version").unwrap(),
            "/discovery/v1/apis/service/version/rest"
        );
        assert_eq!(
            discovery_path("", "version").unwrap_err().to_string(),
            "Service name cannot be null or empty"
        );
        assert_eq!(
            discovery_path("service", "").unwrap_err().to_string(),
            "Version cannot be null or empty"
        );
    }
}
