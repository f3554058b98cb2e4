//! Development-time request forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Outbound request (path, query, headers, body)
//!     → rule.rs (prefix match, pure path rewrite, upstream URL)
//!     → forwarder.rs (host identity, streaming delivery)
//!     → Return: upstream response verbatim, or UpstreamUnreachable
//! ```
//!
//! # Design Decisions
//! - Rules compiled from config at startup, immutable afterwards
//! - Rewrite applied exactly once per request
//! - Response passthrough: no retries, no caching, no synthesized bodies
//! - Redirects are not followed; 3xx responses pass through like any other

pub mod forwarder;
pub mod rule;

pub use forwarder::{ForwardError, Forwarder};
pub use rule::{ForwardRule, RuleError};
