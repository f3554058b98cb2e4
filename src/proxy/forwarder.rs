//! Request forwarding to the upstream origin.
//!
//! The forwarder owns the compiled rule list and a TLS-capable client.
//! Matching requests are rewritten once and streamed upstream; the upstream
//! response streams back verbatim — status, headers, and body. Error
//! statuses from the upstream are not an error here: they pass through like
//! any other response. Only a connection-level failure surfaces as
//! [`ForwardError::Unreachable`].

use axum::body::Body;
use axum::http::{header, HeaderName, Request, Response};

use crate::config::ForwardRuleConfig;
use crate::proxy::rule::{ForwardRule, RuleError};

/// Error raised when the upstream could not be reached at all.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("upstream {url} unreachable: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Development-time request forwarder.
#[derive(Debug)]
pub struct Forwarder {
    rules: Vec<ForwardRule>,
    client: reqwest::Client,
}

impl Forwarder {
    /// Compile configured rules into a forwarder.
    pub fn from_config(rules: &[ForwardRuleConfig]) -> Result<Self, RuleError> {
        let rules = rules
            .iter()
            .map(ForwardRule::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rules))
    }

    pub fn new(rules: Vec<ForwardRule>) -> Self {
        // Redirects pass through to the caller untouched, like any other
        // upstream status.
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("HTTP client initialization failed");
        Self { rules, client }
    }

    /// First rule whose prefix matches `path`, in declaration order.
    pub fn match_rule(&self, path: &str) -> Option<&ForwardRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    pub fn rules(&self) -> &[ForwardRule] {
        &self.rules
    }

    /// Deliver `request` to the rule's upstream and return the response
    /// unmodified. No retry, no caching, no synthesized fallback.
    pub async fn forward(
        &self,
        rule: &ForwardRule,
        request: Request<Body>,
    ) -> Result<Response<Body>, ForwardError> {
        let (parts, body) = request.into_parts();
        let url = rule.upstream_url(parts.uri.path(), parts.uri.query());

        // With change_origin the client derives Host from the upstream URL,
        // presenting the target's own identity. Otherwise the original Host
        // is carried over.
        let mut headers = parts.headers.clone();
        headers.remove(header::HOST);
        if !rule.change_origin() {
            if let Some(host) = parts.headers.get(header::HOST) {
                headers.insert(header::HOST, host.clone());
            }
        }

        tracing::debug!(
            path = %parts.uri.path(),
            upstream = %url,
            change_origin = rule.change_origin(),
            "Forwarding request"
        );

        let upstream = self
            .client
            .request(parts.method, url.clone())
            .headers(headers)
            .body(reqwest::Body::wrap_stream(body.into_data_stream()))
            .send()
            .await
            .map_err(|source| ForwardError::Unreachable {
                url: url.to_string(),
                source,
            })?;

        let status = upstream.status();
        let upstream_headers = upstream.headers().clone();

        let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
        *response.status_mut() = status;
        for (name, value) in upstream_headers.iter() {
            if !is_hop_by_hop(name) {
                response.headers_mut().append(name.clone(), value.clone());
            }
        }
        Ok(response)
    }
}

/// Hop-by-hop headers are connection-scoped and must not be relayed.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_rule_is_first_match() {
        let forwarder = Forwarder::from_config(&[
            ForwardRuleConfig {
                match_prefix: "/api/v2".into(),
                target_origin: "http://127.0.0.1:9001".into(),
                change_origin: false,
            },
            ForwardRuleConfig {
                match_prefix: "/api".into(),
                target_origin: "http://127.0.0.1:9002".into(),
                change_origin: true,
            },
        ])
        .unwrap();

        let rule = forwarder.match_rule("/api/v2/messages").unwrap();
        assert_eq!(rule.match_prefix(), "/api/v2");

        let rule = forwarder.match_rule("/api/messages").unwrap();
        assert_eq!(rule.match_prefix(), "/api");

        assert!(forwarder.match_rule("/chat").is_none());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = Forwarder::from_config(&[ForwardRuleConfig {
            match_prefix: String::new(),
            target_origin: "http://127.0.0.1:9001".into(),
            change_origin: false,
        }])
        .unwrap_err();
        assert_eq!(err, RuleError::EmptyPrefix);
    }

    #[test]
    fn test_hop_by_hop_classification() {
        assert!(is_hop_by_hop(&header::CONNECTION));
        assert!(is_hop_by_hop(&header::TRANSFER_ENCODING));
        assert!(!is_hop_by_hop(&header::CONTENT_TYPE));
        assert!(!is_hop_by_hop(&header::CONTENT_LENGTH));
    }
}
