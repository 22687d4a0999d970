//! Upstream dispatch.
//!
//! Encodes the chosen [`OutboundBody`] into a reqwest request and sends
//! it. The shared client enforces the configured timeout and follows
//! redirects transparently; one connection is scoped to one
//! request/response cycle and released when it ends, however it ends.

use std::time::Duration;

use axum::http::{HeaderMap, Method};
use reqwest::multipart::{Form, Part};
use reqwest::redirect::Policy;

use crate::config::UpstreamConfig;
use crate::forward::body::{MultipartPayload, OutboundBody};
use crate::forward::error::ForwardError;

/// Build the shared upstream client. Called once at startup.
pub fn build_client(upstream: &UpstreamConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(upstream.timeout_secs))
        .redirect(Policy::limited(10))
        .build()
}

/// Execute the outbound request and hand back the raw upstream response.
pub async fn dispatch(
    client: &reqwest::Client,
    method: Method,
    target: &str,
    headers: HeaderMap,
    body: OutboundBody,
) -> Result<reqwest::Response, ForwardError> {
    let builder = client.request(method, target).headers(headers);

    let builder = match body {
        OutboundBody::Empty => builder,
        OutboundBody::Json(value) => builder.json(&value),
        OutboundBody::Raw(bytes) => builder.body(bytes),
        OutboundBody::Multipart(payload) => builder.multipart(encode_form(payload)?),
    };

    builder.send().await.map_err(classify_transport_error)
}

/// Re-encode the decoded multipart payload. reqwest generates a fresh
/// boundary here; the inbound one is never reused.
fn encode_form(payload: MultipartPayload) -> Result<Form, ForwardError> {
    let mut form = Form::new();
    for (name, value) in payload.fields {
        form = form.text(name, value);
    }
    for file in payload.files {
        let part = Part::bytes(file.data.to_vec())
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| ForwardError::Internal(format!("invalid file content-type: {e}")))?;
        form = form.part(file.name, part);
    }
    Ok(form)
}

fn classify_transport_error(error: reqwest::Error) -> ForwardError {
    if error.is_timeout() {
        ForwardError::UpstreamTimeout
    } else if error.is_builder() {
        // Request could not even be constructed (bad URL, bad header).
        ForwardError::Internal(error.to_string())
    } else {
        ForwardError::UpstreamUnreachable(error.to_string())
    }
}
