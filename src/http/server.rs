//! HTTP server setup and request handlers.
//!
//! # Responsibilities
//! - Create the Axum router: `/` service description + catch-all proxy
//! - Wire up middleware (request ID, tracing, CORS)
//! - Build the shared upstream client once at startup
//! - Run with graceful shutdown

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    response::{IntoResponse, Json, Response},
    routing::{any, get},
    Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::forward;
use crate::http::request::{MakeProxyRequestId, X_REQUEST_ID};

/// Application state injected into handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub client: reqwest::Client,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let client = forward::client::build_client(&config.upstream)?;
        let state = AppState {
            config: Arc::new(config),
            client,
        };
        Ok(Self {
            router: Self::build_router(state),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        // The root GET is a service description; every other method on
        // `/` forwards like any path would.
        Router::new()
            .route("/", get(service_info).fallback(proxy_handler))
            .route("/{*path}", any(proxy_handler))
            .with_state(state)
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeProxyRequestId))
            .layer(CorsLayer::permissive())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main proxy handler: the whole forwarding pipeline, one linear pass.
async fn proxy_handler(State(state): State<AppState>, request: Request) -> Response {
    forward::forward(&state.config, &state.client, request)
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

/// Static service description served on `GET /`; never forwarded.
async fn service_info(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "service": "ElevenLabs API Proxy",
        "version": env!("CARGO_PKG_VERSION"),
        "base_url": state.config.upstream.base_url,
        "endpoints": {
            "voices": "/v1/voices",
            "text-to-speech": "/v1/text-to-speech/{voice_id}",
            "models": "/v1/models",
            "user": "/v1/user",
            "usage": "/v1/user/subscription",
            "history": "/v1/history",
        },
    }))
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
