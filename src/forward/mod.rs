//! Request forwarding pipeline.
//!
//! # Data Flow
//! ```text
//! inbound Request
//!     → url.rs      (rebuild target URL, force version prefix)
//!     → headers.rs  (strip hop headers, inject API key)
//!     → body.rs     (classify: JSON / multipart / raw / empty)
//!     → client.rs   (encode & dispatch via reqwest, bounded timeout)
//!     → response.rs (filter headers, stream or buffer back)
//! ```
//!
//! # Design Decisions
//! - Exactly one body representation is chosen per request; the
//!   dispatcher consumes the tagged value without re-inspecting types
//! - Failures surface only at this boundary, as one of three conditions
//!   (timeout / unreachable / internal) — there are no retries
//! - A JSON body that fails to parse is forwarded as *no* body. This is
//!   deliberate, documented behavior, not an error path.

pub mod body;
pub mod client;
pub mod error;
pub mod headers;
pub mod response;
pub mod url;

pub use body::OutboundBody;
pub use error::ForwardError;

use axum::extract::Request;
use axum::http::header::CONTENT_TYPE;
use axum::response::Response;

use crate::config::ProxyConfig;

/// Forward one inbound request to the upstream API and relay the answer.
pub async fn forward(
    config: &ProxyConfig,
    client: &reqwest::Client,
    request: Request,
) -> Result<Response, ForwardError> {
    let method = request.method().clone();
    let target = url::build_target_url(
        &config.upstream.base_url,
        request.uri().path(),
        request.uri().query(),
        &config.upstream.version_prefix,
    );

    let mut outbound_headers = headers::filter_request_headers(request.headers(), &config.upstream);
    let body = body::classify(request).await?;

    if matches!(body, OutboundBody::Multipart(_)) {
        // The multipart encoder picks a fresh boundary; a stale inbound
        // content-type would advertise the old one.
        outbound_headers.remove(CONTENT_TYPE);
    }

    tracing::info!(method = %method, target = %target, "Forwarding request");

    let upstream = client::dispatch(client, method, &target, outbound_headers, body).await?;
    response::relay(upstream).await
}
