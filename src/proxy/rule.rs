//! Forward rule: prefix match and pure path rewrite.

use url::Url;

use crate::config::ForwardRuleConfig;

/// Error rejected when compiling a forward rule from config.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("match prefix must not be empty")]
    EmptyPrefix,

    #[error("match prefix {0:?} must begin with '/'")]
    PrefixNotRooted(String),

    #[error("target origin {origin:?} is not a valid URL: {reason}")]
    InvalidTarget { origin: String, reason: String },

    #[error("target origin {0:?} must use http or https")]
    TargetNotHttp(String),

    #[error("target origin {0:?} has no host")]
    TargetMissingHost(String),
}

/// A rule that intercepts outbound requests under a path prefix and rewrites
/// them onto an upstream origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardRule {
    match_prefix: String,
    target: Url,
    change_origin: bool,
}

impl ForwardRule {
    pub fn new(
        match_prefix: impl Into<String>,
        target: Url,
        change_origin: bool,
    ) -> Result<Self, RuleError> {
        let match_prefix = match_prefix.into();
        if match_prefix.is_empty() {
            return Err(RuleError::EmptyPrefix);
        }
        if !match_prefix.starts_with('/') {
            return Err(RuleError::PrefixNotRooted(match_prefix));
        }
        match target.scheme() {
            "http" | "https" => {}
            _ => return Err(RuleError::TargetNotHttp(target.to_string())),
        }
        if target.host_str().is_none() {
            return Err(RuleError::TargetMissingHost(target.to_string()));
        }

        Ok(Self {
            match_prefix,
            target,
            change_origin,
        })
    }

    /// Compile a configured rule, parsing its target origin.
    pub fn from_config(config: &ForwardRuleConfig) -> Result<Self, RuleError> {
        let target = Url::parse(&config.target_origin).map_err(|e| RuleError::InvalidTarget {
            origin: config.target_origin.clone(),
            reason: e.to_string(),
        })?;
        Self::new(config.match_prefix.clone(), target, config.change_origin)
    }

    /// Whether this rule intercepts the given request path.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.match_prefix)
    }

    /// Strip the match prefix from `path`.
    ///
    /// Pure string transformation, defined only for paths that match this
    /// rule. The forwarder applies it exactly once per request.
    pub fn rewrite<'a>(&self, path: &'a str) -> &'a str {
        path.strip_prefix(&self.match_prefix).unwrap_or(path)
    }

    /// Final upstream URL: target origin + rewritten path, with the original
    /// query string carried over verbatim.
    pub fn upstream_url(&self, path: &str, query: Option<&str>) -> Url {
        let remainder = self.rewrite(path);
        let base = match self.target.path() {
            "/" => "",
            p => p,
        };
        let mut url = self.target.clone();
        url.set_path(&format!("{base}{remainder}"));
        url.set_query(query);
        url
    }

    /// Host identity presented upstream when `change_origin` is set:
    /// the target's own host, with its port when explicit.
    pub fn host_identity(&self) -> String {
        let host = self.target.host_str().unwrap_or_default();
        match self.target.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    pub fn match_prefix(&self) -> &str {
        &self.match_prefix
    }

    pub fn target(&self) -> &Url {
        &self.target
    }

    pub fn change_origin(&self) -> bool {
        self.change_origin
    }
}
