//! Navigation resolver: drives the route table from navigation events.
//!
//! The resolver is the client-side state machine. It starts `Idle`, and each
//! `navigate` moves it to `Resolved` with exactly one mounted view. History
//! is recorded per successful navigation so back/forward replay prior
//! resolutions without a reload. A failed navigation leaves both the state
//! and the mounted view untouched.

use std::sync::Arc;

use crate::routing::table::{ResolveError, RouteEntry, RouteTable};
use crate::routing::view::{View, ViewRegistry};

/// Resolver state. `Resolved` is re-entered on every successful navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationState {
    Idle,
    Resolved { route: RouteEntry },
}

/// Client-side navigation resolver with browser-style history.
pub struct Resolver {
    table: Arc<RouteTable>,
    views: Arc<ViewRegistry>,
    /// Normalized base path: empty for root, otherwise "/base" without a
    /// trailing slash. Incoming paths are matched relative to it.
    base: String,
    /// Visited full paths (including the base). `cursor` points at the
    /// current entry; entries after it are the forward stack.
    history: Vec<String>,
    cursor: Option<usize>,
    state: NavigationState,
    active: Option<Box<dyn View>>,
}

impl Resolver {
    /// Resolver rooted at `/`.
    pub fn new(table: Arc<RouteTable>, views: Arc<ViewRegistry>) -> Self {
        Self::with_base(table, views, "/")
    }

    /// Resolver mounted under an application base path.
    pub fn with_base(table: Arc<RouteTable>, views: Arc<ViewRegistry>, base: &str) -> Self {
        Self {
            table,
            views,
            base: normalize_base(base),
            history: Vec::new(),
            cursor: None,
            state: NavigationState::Idle,
            active: None,
        }
    }

    /// Resolve `path` and mount its view.
    ///
    /// On success the navigation is recorded in history, except when `path`
    /// is already current: re-resolving the current path remounts the view
    /// but records no duplicate entry. On error nothing changes.
    pub fn navigate(&mut self, path: &str) -> Result<RouteEntry, ResolveError> {
        let route = self.resolve_and_mount(path)?;

        let already_current = matches!(self.cursor, Some(i) if self.history[i] == path);
        if !already_current {
            if let Some(i) = self.cursor {
                // A new navigation discards the forward stack.
                self.history.truncate(i + 1);
            }
            self.history.push(path.to_string());
            self.cursor = Some(self.history.len() - 1);
        }

        Ok(route)
    }

    /// Replay the previous history entry. `Ok(None)` when already at the
    /// oldest entry (or never navigated).
    pub fn back(&mut self) -> Result<Option<RouteEntry>, ResolveError> {
        let Some(i) = self.cursor else {
            return Ok(None);
        };
        if i == 0 {
            return Ok(None);
        }

        let target = self.history[i - 1].clone();
        let route = self.resolve_and_mount(&target)?;
        self.cursor = Some(i - 1);
        Ok(Some(route))
    }

    /// Replay the next history entry. `Ok(None)` when there is none.
    pub fn forward(&mut self) -> Result<Option<RouteEntry>, ResolveError> {
        let Some(i) = self.cursor else {
            return Ok(None);
        };
        if i + 1 >= self.history.len() {
            return Ok(None);
        }

        let target = self.history[i + 1].clone();
        let route = self.resolve_and_mount(&target)?;
        self.cursor = Some(i + 1);
        Ok(Some(route))
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// The currently mounted view, if any.
    pub fn active_view(&self) -> Option<&dyn View> {
        self.active.as_deref()
    }

    /// Full path of the current history entry.
    pub fn current_path(&self) -> Option<&str> {
        self.cursor.map(|i| self.history[i].as_str())
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Match and mount without touching history. The single place where a
    /// view is constructed, so construction failures cannot leave a
    /// half-updated resolver.
    fn resolve_and_mount(&mut self, path: &str) -> Result<RouteEntry, ResolveError> {
        let not_found = || ResolveError::RouteNotFound {
            path: path.to_string(),
        };

        let rel = self.app_path(path).ok_or_else(not_found)?;
        let route = self.table.resolve(rel).ok_or_else(not_found)?.clone();

        let view = self
            .views
            .construct(&route.view)
            .map_err(|source| ResolveError::ViewConstruction {
                route: route.name.clone(),
                view: route.view.clone(),
                source,
            })?;

        self.active = Some(view);
        self.state = NavigationState::Resolved {
            route: route.clone(),
        };
        Ok(route)
    }

    /// Strip the base from an incoming path. `None` means the path lies
    /// outside the application base and cannot match any route.
    fn app_path<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.base.is_empty() {
            return Some(path);
        }
        match path.strip_prefix(&self.base) {
            Some("") => Some("/"),
            Some(rest) if rest.starts_with('/') => Some(rest),
            _ => None,
        }
    }
}

fn normalize_base(base: &str) -> String {
    let trimmed = base.trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
