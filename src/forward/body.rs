//! Body classification for the request direction.
//!
//! # Responsibilities
//! - Decide the single outbound body representation from the inbound
//!   method and content-type
//! - Decode multipart forms into plain fields and file parts so the
//!   dispatcher can re-encode them with a fresh boundary
//!
//! # Design Decisions
//! - Only POST/PUT/PATCH carry a body; every other method forwards none
//! - A declared-JSON body that fails to parse forwards as `Empty`.
//!   Best-effort by design: malformed-but-tolerated clients must keep
//!   observing the same behavior.
//! - Anything that is neither JSON nor multipart is an opaque byte
//!   passthrough, with no charset assumptions

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;

use crate::forward::error::ForwardError;

/// The one outbound body representation chosen for a request.
#[derive(Debug)]
pub enum OutboundBody {
    /// No body is sent upstream.
    Empty,
    /// Re-serialized JSON document.
    Json(serde_json::Value),
    /// Multipart form, re-encoded by the client with a new boundary.
    Multipart(MultipartPayload),
    /// Opaque byte passthrough.
    Raw(Bytes),
}

/// Decoded multipart form content.
#[derive(Debug, Default)]
pub struct MultipartPayload {
    /// Plain text fields, in arrival order.
    pub fields: Vec<(String, String)>,
    /// File parts, in arrival order.
    pub files: Vec<FilePart>,
}

/// One uploaded file from a multipart form.
#[derive(Debug)]
pub struct FilePart {
    pub name: String,
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Classify the inbound request into exactly one [`OutboundBody`].
/// Consumes the request, so callers must copy method/URI/headers first.
pub async fn classify(request: Request) -> Result<OutboundBody, ForwardError> {
    if !matches!(
        *request.method(),
        Method::POST | Method::PUT | Method::PATCH
    ) {
        return Ok(OutboundBody::Empty);
    }

    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.contains("application/json") {
        let bytes = read_body(request).await?;
        // Parse failure is swallowed: the request forwards with no body.
        Ok(match serde_json::from_slice(&bytes) {
            Ok(value) => OutboundBody::Json(value),
            Err(_) => OutboundBody::Empty,
        })
    } else if content_type.contains("multipart/form-data") {
        classify_multipart(request).await
    } else {
        let bytes = read_body(request).await?;
        if bytes.is_empty() {
            Ok(OutboundBody::Empty)
        } else {
            Ok(OutboundBody::Raw(bytes))
        }
    }
}

async fn classify_multipart(request: Request) -> Result<OutboundBody, ForwardError> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| ForwardError::Internal(e.to_string()))?;

    let mut payload = MultipartPayload::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ForwardError::Internal(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name() {
            Some(file_name) => {
                let file_name = if file_name.is_empty() {
                    "file".to_string()
                } else {
                    file_name.to_string()
                };
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ForwardError::Internal(e.to_string()))?;
                payload.files.push(FilePart {
                    name,
                    file_name,
                    content_type,
                    data,
                });
            }
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ForwardError::Internal(e.to_string()))?;
                payload.fields.push((name, value));
            }
        }
    }

    if payload.fields.is_empty() && payload.files.is_empty() {
        Ok(OutboundBody::Empty)
    } else {
        Ok(OutboundBody::Multipart(payload))
    }
}

async fn read_body(request: Request) -> Result<Bytes, ForwardError> {
    axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .map_err(|e| ForwardError::Internal(format!("failed to read request body: {e}")))
}
