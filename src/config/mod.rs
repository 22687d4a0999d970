//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → loader.rs (read & validate variables)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc with every request handler
//! ```
//!
//! # Design Decisions
//! - Config is read exactly once at startup; there is no runtime reload
//! - All fields have defaults so the proxy runs with zero configuration
//! - Handlers receive the config by injection, never from ambient globals

pub mod loader;
pub mod schema;

pub use loader::ConfigError;
pub use schema::ProxyConfig;
pub use schema::UpstreamConfig;
