//! Header filtering for both directions of the relay.
//!
//! # Responsibilities
//! - Strip headers the transport must regenerate (request direction)
//! - Resolve and inject the upstream API key
//! - Strip upstream framing headers before replying (response direction)
//!
//! Everything not on a strip-list passes through untouched; the proxy
//! never invents headers the caller or the upstream did not send.

use axum::http::header::{
    HeaderMap, HeaderName, HeaderValue, CONNECTION, CONTENT_ENCODING, CONTENT_LENGTH, HOST,
    TRANSFER_ENCODING,
};

use crate::config::UpstreamConfig;

/// Header the upstream authenticates with.
pub const XI_API_KEY: HeaderName = HeaderName::from_static("xi-api-key");

/// Custom key header accepted from callers, taking precedence over
/// [`XI_API_KEY`] when both are present.
pub const X_API_KEY: HeaderName = HeaderName::from_static("x-api-key");

const REQUEST_STRIP: [HeaderName; 3] = [HOST, CONTENT_LENGTH, CONNECTION];

const RESPONSE_STRIP: [HeaderName; 5] = [
    CONTENT_ENCODING,
    TRANSFER_ENCODING,
    CONNECTION,
    HOST,
    // The relayed byte count can differ from the upstream's (the client
    // decompresses transparently), so the transport recomputes it.
    CONTENT_LENGTH,
];

/// Build the outbound header map: pass everything through except the
/// strip-list, then inject the resolved API key under `xi-api-key`.
///
/// Key precedence: caller's `x-api-key`, caller's `xi-api-key`, then the
/// configured fallback key. Whichever wins overwrites any prior value.
pub fn filter_request_headers(inbound: &HeaderMap, upstream: &UpstreamConfig) -> HeaderMap {
    let mut outbound = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        if REQUEST_STRIP.contains(name) {
            continue;
        }
        outbound.append(name.clone(), value.clone());
    }

    if upstream.forward_auth {
        let api_key = inbound
            .get(&X_API_KEY)
            .or_else(|| inbound.get(&XI_API_KEY))
            .cloned()
            .or_else(|| fallback_key_value(upstream));
        if let Some(api_key) = api_key {
            outbound.insert(XI_API_KEY, api_key);
        }
    }

    outbound
}

/// Strip upstream framing headers; everything else relays verbatim.
pub fn filter_response_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut outbound = HeaderMap::with_capacity(upstream.len());
    for (name, value) in upstream {
        if RESPONSE_STRIP.contains(name) {
            continue;
        }
        outbound.append(name.clone(), value.clone());
    }
    outbound
}

fn fallback_key_value(upstream: &UpstreamConfig) -> Option<HeaderValue> {
    // A fallback key with bytes invalid in a header value cannot be
    // sent; treat it as absent.
    upstream
        .api_key
        .as_deref()
        .and_then(|key| HeaderValue::from_str(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream_with_key(key: Option<&str>) -> UpstreamConfig {
        UpstreamConfig {
            api_key: key.map(str::to_string),
            ..UpstreamConfig::default()
        }
    }

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                name.parse::<HeaderName>().unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn hop_headers_are_stripped() {
        let inbound = headers(&[
            ("Host", "proxy.internal"),
            ("Content-Length", "42"),
            ("Connection", "keep-alive"),
            ("accept", "application/json"),
        ]);
        let outbound = filter_request_headers(&inbound, &upstream_with_key(None));
        assert!(!outbound.contains_key(HOST));
        assert!(!outbound.contains_key(CONTENT_LENGTH));
        assert!(!outbound.contains_key(CONNECTION));
        assert_eq!(outbound.get("accept").unwrap(), "application/json");
    }

    #[test]
    fn custom_key_header_wins_over_native_and_fallback() {
        let inbound = headers(&[("x-api-key", "custom"), ("xi-api-key", "native")]);
        let outbound = filter_request_headers(&inbound, &upstream_with_key(Some("fallback")));
        assert_eq!(outbound.get(XI_API_KEY).unwrap(), "custom");
    }

    #[test]
    fn native_key_header_wins_over_fallback() {
        let inbound = headers(&[("xi-api-key", "native")]);
        let outbound = filter_request_headers(&inbound, &upstream_with_key(Some("fallback")));
        assert_eq!(outbound.get(XI_API_KEY).unwrap(), "native");
    }

    #[test]
    fn fallback_key_is_injected_when_caller_sends_none() {
        let inbound = headers(&[("accept", "*/*")]);
        let outbound = filter_request_headers(&inbound, &upstream_with_key(Some("abc123")));
        assert_eq!(outbound.get(XI_API_KEY).unwrap(), "abc123");
    }

    #[test]
    fn no_key_is_injected_without_any_source() {
        let inbound = headers(&[("accept", "*/*")]);
        let outbound = filter_request_headers(&inbound, &upstream_with_key(None));
        assert!(!outbound.contains_key(XI_API_KEY));
    }

    #[test]
    fn auth_injection_can_be_disabled() {
        let mut upstream = upstream_with_key(Some("fallback"));
        upstream.forward_auth = false;
        let inbound = headers(&[("x-api-key", "custom")]);
        let outbound = filter_request_headers(&inbound, &upstream);
        // x-api-key still passes through; nothing is injected.
        assert!(!outbound.contains_key(XI_API_KEY));
        assert_eq!(outbound.get(X_API_KEY).unwrap(), "custom");
    }

    #[test]
    fn injection_overwrites_rather_than_duplicates() {
        let inbound = headers(&[("x-api-key", "custom"), ("xi-api-key", "native")]);
        let outbound = filter_request_headers(&inbound, &upstream_with_key(None));
        let values: Vec<_> = outbound.get_all(XI_API_KEY).iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0], "custom");
    }

    #[test]
    fn response_framing_headers_are_stripped() {
        let upstream = headers(&[
            ("content-encoding", "gzip"),
            ("transfer-encoding", "chunked"),
            ("connection", "close"),
            ("host", "api.elevenlabs.io"),
            ("content-length", "1000"),
            ("content-type", "audio/mpeg"),
            ("x-request-cost", "7"),
        ]);
        let outbound = filter_response_headers(&upstream);
        assert_eq!(outbound.len(), 2);
        assert_eq!(outbound.get("content-type").unwrap(), "audio/mpeg");
        assert_eq!(outbound.get("x-request-cost").unwrap(), "7");
    }

    #[test]
    fn duplicate_response_headers_are_preserved() {
        let mut upstream = HeaderMap::new();
        upstream.append("set-cookie", HeaderValue::from_static("a=1"));
        upstream.append("set-cookie", HeaderValue::from_static("b=2"));
        let outbound = filter_response_headers(&upstream);
        assert_eq!(outbound.get_all("set-cookie").iter().count(), 2);
    }
}
