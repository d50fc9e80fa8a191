//! Reverse proxy from `/api/*` to the configured IAM backend.
//!
//! DESIGN
//! ======
//! The proxy is a pass-through: method, path, query string, body and the
//! `authorization` and `content-type` headers go upstream unchanged, and the
//! upstream status, content type and body come back unchanged. Only failures
//! to reach the backend are answered locally, as 502.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use std::time::Duration;

use axum::Json;
use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Largest request body forwarded upstream.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Headers copied from the browser request to the upstream request.
const FORWARDED_HEADERS: [header::HeaderName; 3] = [header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT];

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("http client setup failed: {0}")]
    Client(String),
    #[error("request body unreadable: {0}")]
    Body(String),
    #[error("backend unreachable: {0}")]
    Upstream(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Body(_) => StatusCode::BAD_REQUEST,
            Self::Client(_) | Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Shared upstream client; cheap to clone into handler state.
#[derive(Clone, Debug)]
pub struct Upstream {
    client: reqwest::Client,
    base: String,
}

impl Upstream {
    /// # Errors
    ///
    /// Returns `ProxyError::Client` if the HTTP client cannot be built.
    pub fn new(base: &str, timeout: Duration) -> Result<Self, ProxyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProxyError::Client(e.to_string()))?;
        Ok(Self { client, base: base.trim_end_matches('/').to_owned() })
    }

    /// Upstream URL for a browser request path such as `/api/users?x=1`.
    #[must_use]
    pub fn target_url(&self, path_and_query: &str) -> String {
        format!("{}{path_and_query}", self.base)
    }
}

fn forwarded_headers(incoming: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in &FORWARDED_HEADERS {
        if let Some(value) = incoming.get(name) {
            out.insert(name.clone(), value.clone());
        }
    }
    out
}

/// Forward one request and relay the response.
pub async fn forward(State(upstream): State<Upstream>, request: Request) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();
    let path_and_query = parts.uri.path_and_query().map_or("/", |pq| pq.as_str());
    let url = upstream.target_url(path_and_query);
    let body = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| ProxyError::Body(e.to_string()))?;

    let response = upstream
        .client
        .request(parts.method.clone(), &url)
        .headers(forwarded_headers(&parts.headers))
        .body(body)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(method = %parts.method, %url, error = %e, "upstream request failed");
            ProxyError::Upstream(e.to_string())
        })?;

    let status = response.status();
    let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ProxyError::Upstream(e.to_string()))?;
    tracing::debug!(method = %parts.method, %url, status = status.as_u16(), "proxied");

    let mut relayed = Response::builder().status(status);
    if let Some(content_type) = content_type {
        relayed = relayed.header(header::CONTENT_TYPE, content_type);
    }
    relayed.body(Body::from(bytes)).map_err(|e| ProxyError::Upstream(e.to_string()))
}
