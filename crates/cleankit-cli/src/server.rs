//! HTTP surface: `GET /extract?key=<API_KEY>&url=<URL>`

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use cleankit::{ExtractError, ExtractRequest, Tool};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    tool: Arc<Tool>,
    api_key: Arc<str>,
}

impl AppState {
    pub fn new(tool: Tool, api_key: impl Into<String>) -> Self {
        Self {
            tool: Arc::new(tool),
            api_key: Arc::from(api_key.into()),
        }
    }
}

/// Query parameters for `/extract`
#[derive(Debug, Deserialize)]
struct ExtractParams {
    key: Option<String>,
    url: Option<String>,
}

/// Success body for `/extract`
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractBody {
    pub title: String,
    pub clean_text: String,
    pub tokens_estimate: usize,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/extract", get(extract_handler))
        .with_state(state)
}

pub async fn run(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, create_app(state)).await
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn extract_handler(
    State(state): State<AppState>,
    Query(params): Query<ExtractParams>,
) -> Result<Json<ExtractBody>, ApiError> {
    // Credentials first, so unauthenticated callers learn nothing about the URL
    let authorized = params
        .key
        .as_deref()
        .is_some_and(|key| keys_match(key, &state.api_key));
    if !authorized {
        return Err(ApiError::new(
            StatusCode::UNAUTHORIZED,
            "invalid or missing API key",
        ));
    }

    let url = match params.url {
        Some(url) if !url.is_empty() => url,
        _ => {
            return Err(ApiError::new(
                StatusCode::BAD_REQUEST,
                "missing url parameter",
            ))
        }
    };

    let response = state
        .tool
        .execute(ExtractRequest::new(url.as_str()))
        .await
        .map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Extraction failed");
            ApiError::from(e)
        })?;

    tracing::info!(url = %url, tokens_estimate = response.tokens_estimate, "Extracted page");

    Ok(Json(ExtractBody {
        title: response.title,
        clean_text: response.clean_text,
        tokens_estimate: response.tokens_estimate,
    }))
}

/// Compare keys without exiting at the first differing byte
fn keys_match(given: &str, expected: &str) -> bool {
    let (given, expected) = (given.as_bytes(), expected.as_bytes());
    if given.len() != expected.len() {
        return false;
    }
    given
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Error response wrapper
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedContent(_) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "failed to parse page")
            }
            e if e.is_invalid_request() => ApiError::new(StatusCode::BAD_REQUEST, e.to_string()),
            _ => ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "failed to fetch url"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app() -> Router {
        create_app(AppState::new(Tool::default(), "secret"))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_missing_key() {
        let (status, body) = get_json(app(), "/extract?url=https://example.com").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid or missing API key");
    }

    #[tokio::test]
    async fn test_wrong_key_checked_before_url() {
        let (status, body) = get_json(app(), "/extract?key=nope").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid or missing API key");
    }

    #[tokio::test]
    async fn test_missing_url() {
        let (status, body) = get_json(app(), "/extract?key=secret").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing url parameter");

        let (status, _) = get_json(app(), "/extract?key=secret&url=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_scheme() {
        let (status, body) = get_json(app(), "/extract?key=secret&url=ftp://example.com").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Invalid URL: must start with http:// or https://"
        );
    }

    #[tokio::test]
    async fn test_extract_success() {
        let mock_server = MockServer::start().await;
        let sentence = "The library reopened on Monday after a long and careful renovation.";

        Mock::given(method("GET"))
            .and(path("/news"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                format!(
                    "<html><title>News</title><p>{s}</p><p>{s}</p><p>Privacy Policy</p></html>",
                    s = sentence
                ),
                "text/html",
            ))
            .mount(&mock_server)
            .await;

        let uri = format!("/extract?key=secret&url={}/news", mock_server.uri());
        let (status, body) = get_json(app(), &uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "News");
        assert_eq!(body["clean_text"], sentence);
        assert_eq!(body["tokens_estimate"], 11);
    }

    #[tokio::test]
    async fn test_unsupported_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/doc.pdf"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"%PDF-1.4".to_vec())
                    .insert_header("content-type", "application/pdf"),
            )
            .mount(&mock_server)
            .await;

        let uri = format!("/extract?key=secret&url={}/doc.pdf", mock_server.uri());
        let (status, body) = get_json(app(), &uri).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "failed to parse page");
    }

    #[test]
    fn test_keys_match() {
        assert!(keys_match("secret", "secret"));
        assert!(!keys_match("secreT", "secret"));
        assert!(!keys_match("secret1", "secret"));
        assert!(!keys_match("", "secret"));
    }

    #[tokio::test]
    async fn test_key_prefix_rejected() {
        let (status, _) = get_json(app(), "/extract?key=secre&url=https://example.com").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_error_mapping() {
        let err = ApiError::from(ExtractError::FirstByteTimeout);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "failed to fetch url");

        let err = ApiError::from(ExtractError::BlockedUrl);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
