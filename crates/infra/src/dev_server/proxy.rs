//! API proxy
//!
//! Forwards the request unchanged (method, path, query, body) to the
//! configured backend and relays the response.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::header::{self, HeaderMap};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{debug, warn};

use super::DevServerState;

/// Headers scoped to a single connection; never forwarded.
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

pub(super) async fn forward(
    State(state): State<Arc<DevServerState>>,
    request: Request,
) -> Response {
    let (parts, body) = request.into_parts();
    let path_and_query = parts.uri.path_and_query().map_or("/", |pq| pq.as_str());
    let url = format!("{}{}", state.proxy_target, path_and_query);

    let body = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(%url, error = %err, "failed to read request body");
            return (StatusCode::BAD_REQUEST, format!("failed to read request body: {err}"))
                .into_response();
        }
    };

    let mut headers = strip_hop_by_hop(&parts.headers);
    headers.remove(header::CONTENT_LENGTH);
    if state.change_origin {
        headers.remove(header::HOST);
    }

    debug!(method = %parts.method, %url, "proxying request");

    let upstream = state.http_client.request(parts.method.clone(), &url).headers(headers).body(body);

    match state.http_client.send(upstream).await {
        Ok(response) => relay(response, &url).await,
        Err(err) => {
            warn!(method = %parts.method, %url, error = %err, "proxy request failed");
            bad_gateway(&err.to_string())
        }
    }
}

async fn relay(upstream: reqwest::Response, url: &str) -> Response {
    let status = upstream.status();
    let headers = strip_hop_by_hop(upstream.headers());

    match upstream.bytes().await {
        Ok(bytes) => {
            debug!(%url, %status, bytes = bytes.len(), "relaying upstream response");
            let mut response = Response::new(Body::from(bytes));
            *response.status_mut() = status;
            *response.headers_mut() = headers;
            response
        }
        Err(err) => {
            warn!(%url, error = %err, "failed to read upstream response");
            bad_gateway(&err.to_string())
        }
    }
}

fn strip_hop_by_hop(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = headers.clone();
    for name in HOP_BY_HOP {
        forwarded.remove(name);
    }
    forwarded
}

fn bad_gateway(reason: &str) -> Response {
    (StatusCode::BAD_GATEWAY, format!("proxy error: {reason}")).into_response()
}
