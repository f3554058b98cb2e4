//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! The zero-config `Default` reproduces the stock chat application: two
//! client routes and a single `/api` forward rule.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the dev server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DevServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Single-page-app serving configuration.
    pub spa: SpaConfig,

    /// Client route table entries, in match order.
    pub routes: Vec<RouteConfig>,

    /// Dev-time forward rules, checked in order.
    pub forward: Vec<ForwardRuleConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            spa: SpaConfig::default(),
            routes: default_routes(),
            forward: default_forward_rules(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:5173").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5173".to_string(),
        }
    }
}

/// Single-page-app serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SpaConfig {
    /// Application base path the client router is mounted under.
    pub base_path: String,

    /// Directory holding the app's entry document and assets. When unset,
    /// a built-in entry shell is served.
    pub root: Option<PathBuf>,

    /// Entry document file name inside `root`.
    pub index: String,
}

impl Default for SpaConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
            root: None,
            index: "index.html".to_string(),
        }
    }
}

/// One client route table entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// URL path, matched exactly.
    pub path: String,

    /// Unique route identifier for reverse lookup and logging.
    pub name: String,

    /// View component rendered when this route is active.
    pub view: String,
}

/// One dev-time forward rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ForwardRuleConfig {
    /// Path prefix that triggers forwarding.
    pub match_prefix: String,

    /// Upstream base URL forwarded requests are delivered to.
    pub target_origin: String,

    /// Present the upstream's own host identity instead of the client's.
    /// Required when the upstream enforces origin checks.
    #[serde(default)]
    pub change_origin: bool,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time until response head) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig {
            path: "/".to_string(),
            name: "chat".to_string(),
            view: "ChatBot".to_string(),
        },
        RouteConfig {
            path: "/chat".to_string(),
            name: "chat with clarifai".to_string(),
            view: "ChatClarifai".to_string(),
        },
    ]
}

fn default_forward_rules() -> Vec<ForwardRuleConfig> {
    vec![ForwardRuleConfig {
        match_prefix: "/api".to_string(),
        target_origin: "https://api.anthropic.com/v1/claude".to_string(),
        change_origin: true,
    }]
}
