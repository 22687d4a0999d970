//! Error taxonomy for the forwarding pipeline.
//!
//! Three mutually exclusive conditions, mapped 1:1 to status codes at
//! the handler boundary. Diagnostic bodies are intentionally verbose:
//! this is an internal diagnostic proxy, not a hardened public gateway.

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failure conditions a forwarded request can end in.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The upstream did not respond within the configured timeout.
    #[error("Gateway Timeout")]
    UpstreamTimeout,

    /// Transport-level failure reaching the upstream (DNS, connection
    /// refused, TLS). Carries the underlying error text for operators.
    #[error("Bad Gateway: {0}")]
    UpstreamUnreachable(String),

    /// Unexpected failure while preparing or dispatching the request.
    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl ForwardError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            Self::UpstreamUnreachable(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Forwarding failed");
        (self.status(), Body::from(self.to_string())).into_response()
    }
}
