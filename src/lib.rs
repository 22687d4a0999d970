//! Transparent reverse proxy for the ElevenLabs API.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌─────────────────────────────────────────────┐
//!                    │              ELEVENLABS PROXY               │
//!                    │                                             │
//!   Client Request   │  ┌────────┐    ┌─────────────────────────┐ │
//!   ─────────────────┼─▶│  http  │───▶│        forward          │ │
//!                    │  │ server │    │  url → headers → body   │ │
//!                    │  └────────┘    └───────────┬─────────────┘ │
//!                    │                            ▼               │
//!   Client Response  │  ┌──────────┐    ┌──────────────────┐      │     Upstream
//!   ◀────────────────┼──│ response │◀───│  reqwest client  │◀─────┼──── API
//!                    │  │  relay   │    └──────────────────┘      │
//!                    │  └──────────┘                              │
//!                    │                                             │
//!                    │  ┌─────────────────────────────────────┐   │
//!                    │  │  config (env, immutable after load) │   │
//!                    │  └─────────────────────────────────────┘   │
//!                    └─────────────────────────────────────────────┘
//! ```
//!
//! Every inbound request is handled as one linear pipeline: rebuild the
//! target URL (forcing the configured `/v1` prefix), filter headers and
//! inject the API key, pick exactly one outbound body representation,
//! dispatch with a bounded timeout, and relay the upstream response back,
//! streaming it for audio and raw binary payloads. No state is shared
//! between requests beyond the read-only configuration and the connection
//! pool inside the HTTP client.

pub mod config;
pub mod forward;
pub mod http;

pub use config::ProxyConfig;
pub use http::HttpServer;
