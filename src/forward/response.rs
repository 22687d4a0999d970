//! Response translation back to the caller.
//!
//! # Design Decisions
//! - Full-fidelity passthrough: status and content-type are copied
//!   verbatim, and only the framing strip-list is removed from the
//!   upstream headers
//! - Audio and raw binary payloads are streamed instead of buffered;
//!   generation endpoints can return bodies far too large to hold

use axum::body::Body;
use axum::http::header::{HeaderValue, CONTENT_TYPE};
use axum::response::Response;

use crate::forward::error::ForwardError;
use crate::forward::headers::filter_response_headers;

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Translate the upstream response into the outbound one.
pub async fn relay(upstream: reqwest::Response) -> Result<Response, ForwardError> {
    let status = upstream.status();
    let mut headers = filter_response_headers(upstream.headers());

    let content_type = upstream
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();
    if !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    }

    let body = if is_streamed(&content_type) {
        Body::from_stream(upstream.bytes_stream())
    } else {
        // A read timeout can fire mid-download just as well as before
        // the response starts; both are Gateway Timeout conditions.
        let bytes = upstream.bytes().await.map_err(|e| {
            if e.is_timeout() {
                ForwardError::UpstreamTimeout
            } else {
                ForwardError::UpstreamUnreachable(e.to_string())
            }
        })?;
        Body::from(bytes)
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

/// Whether a content-type is delivered via the streaming path.
fn is_streamed(content_type: &str) -> bool {
    content_type.contains("audio") || content_type.starts_with("application/octet-stream")
}
