//! Fallback handler: forward passed-through requests to the upstream application.

use std::{sync::Arc, time::Duration};

use axum::{
    Extension,
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderName, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::app::errors::json_error;
use crate::context::IdentityContext;
use crate::gate::headers::{insert_identity, strip_identity};

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection-scoped headers that must not be forwarded.
const HOP_BY_HOP: [HeaderName; 7] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

#[derive(Debug, Clone)]
pub struct Upstream {
    client: reqwest::Client,
    base_url: String,
}

impl Upstream {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

pub async fn forward(
    upstream: Option<Extension<Arc<Upstream>>>,
    identity: Option<Extension<IdentityContext>>,
    req: Request,
) -> Response {
    let Some(Extension(upstream)) = upstream else {
        return json_error(StatusCode::NOT_FOUND, "not_found", "not found");
    };

    let (parts, body) = req.into_parts();
    let body = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(body) => body,
        Err(e) => return json_error(StatusCode::PAYLOAD_TOO_LARGE, "body_too_large", e.to_string()),
    };

    let path_and_query = parts.uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let url = format!("{}{}", upstream.base_url, path_and_query);

    let mut headers = parts.headers;
    let original_host = headers.remove(header::HOST);
    strip_hop_by_hop(&mut headers);
    strip_identity(&mut headers);
    if let Some(host) = original_host {
        headers.insert(HeaderName::from_static("x-forwarded-host"), host);
    }
    if let Some(Extension(identity)) = &identity {
        insert_identity(&mut headers, identity.token());
    }

    let res = match upstream
        .client
        .request(parts.method, &url)
        .headers(headers)
        .body(body)
        .send()
        .await
    {
        Ok(res) => res,
        Err(e) => {
            tracing::warn!(%url, error = %e, "upstream request failed");
            return json_error(StatusCode::BAD_GATEWAY, "upstream_unavailable", "upstream request failed");
        }
    };

    let status = res.status();
    let mut headers = res.headers().clone();
    strip_hop_by_hop(&mut headers);
    headers.remove(header::CONTENT_LENGTH);

    match res.bytes().await {
        Ok(bytes) => (status, headers, Body::from(bytes)).into_response(),
        Err(e) => {
            tracing::warn!(%url, error = %e, "upstream body read failed");
            json_error(StatusCode::BAD_GATEWAY, "upstream_unavailable", "upstream response was cut short")
        }
    }
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let named: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in HOP_BY_HOP.into_iter().chain(named) {
        headers.remove(name);
    }
    headers.remove(HeaderName::from_static("keep-alive"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn strips_connection_scoped_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONNECTION, HeaderValue::from_static("close, x-debug"));
        headers.insert(HeaderName::from_static("x-debug"), HeaderValue::from_static("1"));
        headers.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/html"));

        strip_hop_by_hop(&mut headers);

        assert!(headers.get(header::CONNECTION).is_none());
        assert!(headers.get("x-debug").is_none());
        assert!(headers.get(header::TRANSFER_ENCODING).is_none());
        assert_eq!(headers[header::ACCEPT], "text/html");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let upstream = Upstream::new("http://127.0.0.1:3000/").unwrap();
        assert_eq!(upstream.base_url, "http://127.0.0.1:3000");
    }
}
