//! Single-page-app serving.
//!
//! Every path the forwarder does not intercept comes back to the app's
//! entry document, so deep links like `/chat` reach the client router
//! instead of a 404. When an app root directory is configured, requests
//! that look like asset fetches (path with a file extension) are served
//! from disk first.

use std::path::{Path, PathBuf};

use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::config::SpaConfig;

/// Entry shell used when no app root is configured. The client bundle is
/// expected to mount into `#app`.
const ENTRY_SHELL: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>chat</title>
  </head>
  <body>
    <div id="app"></div>
    <script type="module" src="/src/main.js"></script>
  </body>
</html>
"#;

/// Immutable SPA serving state, built from config at startup.
#[derive(Debug, Clone)]
pub struct SpaState {
    root: Option<PathBuf>,
    index: String,
}

impl SpaState {
    pub fn from_config(config: &SpaConfig) -> Self {
        Self {
            root: config.root.clone(),
            index: config.index.clone(),
        }
    }

    /// Respond to an unmatched GET/HEAD request.
    pub async fn respond(&self, path: &str) -> Response {
        if let Some(file) = self.asset_candidate(path) {
            if let Ok(bytes) = tokio::fs::read(&file).await {
                return ([(header::CONTENT_TYPE, content_type_for(&file))], bytes).into_response();
            }
        }
        self.entry_response().await
    }

    /// The entry document, re-read per request so edits show up without a
    /// server restart.
    async fn entry_response(&self) -> Response {
        let html = match &self.root {
            Some(root) => tokio::fs::read_to_string(root.join(&self.index))
                .await
                .unwrap_or_else(|_| ENTRY_SHELL.to_string()),
            None => ENTRY_SHELL.to_string(),
        };
        (
            [
                (header::CONTENT_TYPE, "text/html; charset=utf-8"),
                (header::CACHE_CONTROL, "no-store"),
            ],
            html,
        )
            .into_response()
    }

    /// A concrete file under the app root. Only paths carrying a file
    /// extension are treated as asset requests; anything else falls through
    /// to the entry document. Parent-directory segments never escape root.
    fn asset_candidate(&self, path: &str) -> Option<PathBuf> {
        let root = self.root.as_ref()?;
        let rel = path.trim_start_matches('/');
        if rel.is_empty() || rel.split('/').any(|segment| segment == "..") {
            return None;
        }
        if Path::new(rel).extension().is_none() {
            return None;
        }
        Some(root.join(rel))
    }
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript",
        Some("css") => "text/css",
        Some("json") | Some("map") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        Some("wasm") => "application/wasm",
        _ => "application/octet-stream",
    }
}
