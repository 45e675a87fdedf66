use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "ui/dist"]
struct Asset;

/// Serves the compiled explorer UI.
pub struct UIHandler;

impl UIHandler {
    pub async fn serve(uri: Uri) -> impl IntoResponse {
        let path = uri.path().trim_start_matches('/');
        let path = if path.is_empty() { "index.html" } else { path };

        if let Some(response) = Self::asset(path) {
            return response;
        }

        // Explorer state lives in the fragment, but unknown routes without a
        // file extension still get the app shell.
        if !Self::looks_like_file(path) {
            if let Some(response) = Self::asset("index.html") {
                return response;
            }
        }

        (StatusCode::NOT_FOUND, "404 Not Found").into_response()
    }

    fn asset(path: &str) -> Option<Response> {
        let content = Asset::get(path)?;
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        Some(([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response())
    }

    fn looks_like_file(path: &str) -> bool {
        path.rsplit('/')
            .next()
            .map(|last| last.contains('.'))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_file() {
        assert!(UIHandler::looks_like_file("pkg/explorer_ui.wasm"));
        assert!(UIHandler::looks_like_file("style.css"));
        assert!(!UIHandler::looks_like_file("services/buzz/v1"));
        assert!(!UIHandler::looks_like_file("v1.2/methods"));
    }

    #[tokio::test]
    async fn test_index_served_at_root() {
        let response = UIHandler::serve(Uri::from_static("/")).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_asset_is_not_found() {
        let response = UIHandler::serve(Uri::from_static("/pkg/missing.js"))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
