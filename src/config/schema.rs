//! Configuration schema definitions.
//!
//! All types derive Serde traits and carry defaults that match the
//! production deployment, so a minimal environment is enough to start.

use serde::{Deserialize, Serialize};

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream API settings.
    pub upstream: UpstreamConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Upstream API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the upstream API, without a trailing slash.
    pub base_url: String,

    /// Path prefix every forwarded request must carry.
    pub version_prefix: String,

    /// Fallback API key, used when the caller sends none.
    pub api_key: Option<String>,

    /// Total request timeout in seconds. Generous by default to
    /// accommodate slow generation endpoints.
    pub timeout_secs: u64,

    /// Whether to resolve and inject an API key at all.
    pub forward_auth: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io".to_string(),
            version_prefix: "/v1".to_string(),
            api_key: None,
            timeout_secs: 300,
            forward_auth: true,
        }
    }
}
