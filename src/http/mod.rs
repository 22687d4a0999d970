//! HTTP surface of the proxy.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, routes, middleware)
//!     → request.rs (attach request ID)
//!     → forward pipeline (everything except `/`)
//!     → send to client
//! ```

pub mod request;
pub mod server;

pub use request::{MakeProxyRequestId, X_REQUEST_ID};
pub use server::HttpServer;
