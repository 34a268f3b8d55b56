//! `/api/*` forwarding to the marketplace backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser only ever talks to this host, so backend session cookies stay
//! first-party. Every `/api/{path}` request is replayed against
//! `{BACKEND_URL}/{path}` with the same method, query, and body.
//!
//! Only an allow-list of headers crosses the proxy in either direction:
//! credentials and content negotiation on the way in, content type and
//! cookies on the way out.
//!
//! ERROR HANDLING
//! ==============
//! Backend error statuses pass through untouched. Failures of the proxy
//! itself (unreadable request body, unreachable backend) become a JSON
//! `{ "error": ... }` body with `400` or `502`.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use axum::body::{Body, Bytes};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderName, Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("request body rejected: {0}")]
    Body(String),
    #[error("backend unreachable: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl ProxyError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Body(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(%status, error = %self, "proxy request failed");
        (status, axum::Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Target URL for `path` (and optional raw `query`) under `base`.
pub fn upstream_url(base: &str, path: &str, query: Option<&str>) -> String {
    let mut url = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    if let Some(q) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(q);
    }
    url
}

/// Request headers copied to the backend.
pub fn forward_request_header(name: &HeaderName) -> bool {
    name == header::COOKIE
        || name == header::CONTENT_TYPE
        || name == header::ACCEPT
        || name == header::AUTHORIZATION
        || name.as_str().starts_with("x-")
}

/// Response headers copied back to the browser.
pub fn forward_response_header(name: &HeaderName) -> bool {
    name == header::CONTENT_TYPE || name == header::SET_COOKIE
}

fn filter_headers(source: &HeaderMap, keep: fn(&HeaderName) -> bool) -> HeaderMap {
    let mut out = HeaderMap::new();
    for (name, value) in source {
        if keep(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

/// Forward one `/api/{*path}` request.
///
/// # Errors
///
/// [`ProxyError::Body`] when the request body exceeds the configured limit,
/// [`ProxyError::Upstream`] when the backend cannot be reached or its body
/// cannot be read.
pub async fn forward(
    State(state): State<AppState>,
    Path(path): Path<String>,
    req: Request<Body>,
) -> Result<Response, ProxyError> {
    let url = upstream_url(&state.config.backend_url, &path, req.uri().query());
    let method = req.method().clone();
    let headers = filter_headers(req.headers(), forward_request_header);
    let body = axum::body::to_bytes(req.into_body(), state.config.body_limit)
        .await
        .map_err(|e| ProxyError::Body(e.to_string()))?;

    tracing::debug!(%method, %url, bytes = body.len(), "proxying request");

    let upstream = state.http.request(method, &url).headers(headers).body(body).send().await?;
    let status = upstream.status();
    let headers = filter_headers(upstream.headers(), forward_response_header);
    let bytes: Bytes = upstream.bytes().await?;

    if status.is_server_error() {
        tracing::warn!(%status, %url, "backend error");
    }

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}
