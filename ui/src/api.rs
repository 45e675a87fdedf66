//! API client for the Explorer backend and the explored APIs

use crate::types::*;
use explorer_core::{ApiRequest, ApiService, HttpMethod};
use gloo_net::http::{Method, Request, RequestBuilder};

const API_BASE: &str = "/api";

/// Fetch the loaded services
pub async fn list_services() -> Result<Vec<ServiceSummary>, String> {
    let url = format!("{}/services", API_BASE);
    fetch_json::<Vec<ServiceSummary>>(&url).await
}

/// Fetch a full discovery document
pub async fn get_service(name: &str, version: &str) -> Result<ApiService, String> {
    let url = format!(
        "{}/services/{}/{}",
        API_BASE,
        urlencoding::encode(name),
        urlencoding::encode(version)
    );
    fetch_json::<ApiService>(&url).await
}

/// Fetch the client settings
pub async fn get_config() -> Result<ClientConfig, String> {
    let url = format!("{}/config", API_BASE);
    fetch_json::<ClientConfig>(&url).await
}

/// Send a built request to the explored API and return the raw response.
pub async fn send_request(root_url: &str, request: &ApiRequest) -> Result<ApiResult, String> {
    let url = format!("{}{}", root_url.trim_end_matches('/'), request.request_path());
    log::debug!("{} {}", request.http_method.as_str(), url);

    let builder = RequestBuilder::new(&url).method(method(request.http_method));
    let prepared = match request.body() {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(body.to_string()),
        None => builder.build(),
    }
    .map_err(|e| format!("Failed to build request: {}", e))?;

    let response = prepared
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    let status = response.status();
    let status_text = response.status_text();
    let body = response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))?;

    Ok(ApiResult {
        status,
        status_text,
        body,
    })
}

fn method(http_method: HttpMethod) -> Method {
    match http_method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Head => Method::HEAD,
    }
}

// ============================================================================
// Helper functions
// ============================================================================

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    let api_response: ApiResponse<T> = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    if api_response.success {
        api_response.data.ok_or_else(|| "No data in response".to_string())
    } else {
        Err(api_response.error.unwrap_or_else(|| "Unknown error".to_string()))
    }
}
