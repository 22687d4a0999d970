//! Configuration loading from the process environment.

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid upstream base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("upstream base URL {0:?} must use http or https")]
    UnsupportedScheme(String),

    #[error("invalid {var} value {value:?}: expected a whole number of seconds")]
    InvalidTimeout { var: &'static str, value: String },
}

impl ProxyConfig {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<ProxyConfig, ConfigError> {
        Self::from_source(|var| std::env::var(var).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset, matching how deployment
    /// platforms render blank environment entries.
    pub fn from_source<F>(get: F) -> Result<ProxyConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| get(var).filter(|v| !v.trim().is_empty());
        let mut config = ProxyConfig::default();

        if let Some(addr) = get("BIND_ADDRESS") {
            config.listener.bind_address = addr;
        }

        if let Some(base) = get("ELEVENLABS_API_BASE") {
            config.upstream.base_url = normalize_base_url(&base)?;
        }

        config.upstream.api_key = get("ELEVENLABS_API_KEY");

        if let Some(value) = get("REQUEST_TIMEOUT_SECS") {
            config.upstream.timeout_secs =
                value.parse().map_err(|_| ConfigError::InvalidTimeout {
                    var: "REQUEST_TIMEOUT_SECS",
                    value,
                })?;
        }

        Ok(config)
    }
}

/// Validate the base URL and trim trailing slashes so path
/// concatenation never produces `//`.
fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        _ => Err(ConfigError::UnsupportedScheme(raw.to_string())),
    }
}
