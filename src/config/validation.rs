//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Addresses parse, timeouts are sane, forward rules compile
//! - Route table invariants (duplicate paths/names, unknown views) are
//!   enforced separately at `RouteTable` construction, where the view
//!   registry is available
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: DevServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::DevServerConfig;
use crate::proxy::rule::{ForwardRule, RuleError};

/// A single semantic violation in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid bind address {0:?}")]
    InvalidBindAddress(String),

    #[error("invalid metrics address {0:?}")]
    InvalidMetricsAddress(String),

    #[error("spa base path {0:?} must begin with '/'")]
    BaseNotRooted(String),

    #[error("request timeout must be greater than zero")]
    ZeroRequestTimeout,

    #[error("forward rule {prefix:?}: {source}")]
    ForwardRule { prefix: String, source: RuleError },
}

/// Check every semantic invariant, collecting all violations.
pub fn validate_config(config: &DevServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if !config.spa.base_path.starts_with('/') {
        errors.push(ValidationError::BaseNotRooted(config.spa.base_path.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    for rule in &config.forward {
        if let Err(source) = ForwardRule::from_config(rule) {
            errors.push(ValidationError::ForwardRule {
                prefix: rule.match_prefix.clone(),
                source,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
