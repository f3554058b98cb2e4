//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, dispatch)
//!     → request.rs (x-request-id injection)
//!     → forward rule match? → proxy::forwarder (upstream passthrough)
//!     → otherwise           → spa.rs (entry document / dev assets)
//! ```

pub mod request;
pub mod server;
pub mod spa;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
