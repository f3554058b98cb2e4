//! Dev server and client routing core for a chat single-page app.
//!
//! Two cooperating pieces:
//!
//! - A **client routing core** ([`routing`]): an immutable route table
//!   validated at startup, driven by a navigation resolver with
//!   browser-style history. Pure code, no I/O.
//! - A **dev server** ([`http`], [`proxy`]): an axum server that forwards
//!   `/api`-style calls to an upstream origin (rewriting the path and
//!   presenting the upstream's host identity) and serves the app's entry
//!   document for every other path.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod routing;
pub mod views;

pub use config::DevServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use proxy::{ForwardRule, Forwarder};
pub use routing::{Resolver, RouteTable};
