//! The route table: path → named view, frozen at startup.

use serde::{Deserialize, Serialize};

use crate::config::RouteConfig;
use crate::routing::view::{ViewError, ViewRegistry};

/// A single rule mapping a URL path to a named view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteEntry {
    /// URL path, matched exactly and case-sensitively.
    pub path: String,

    /// Unique logical identifier, used for reverse lookup and logging.
    pub name: String,

    /// Component name rendered when this route is active.
    pub view: String,
}

impl From<RouteConfig> for RouteEntry {
    fn from(config: RouteConfig) -> Self {
        Self {
            path: config.path,
            name: config.name,
            view: config.view,
        }
    }
}

/// Error rejected at table construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("duplicate route path {0:?}")]
    DuplicatePath(String),

    #[error("duplicate route name {0:?}")]
    DuplicateName(String),

    #[error("route {route:?} references unknown view {view:?}")]
    UnknownView { route: String, view: String },
}

/// Error raised by route resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no route matches path {path:?}")]
    RouteNotFound { path: String },

    #[error("view {view:?} for route {route:?} failed to initialize: {source}")]
    ViewConstruction {
        route: String,
        view: String,
        #[source]
        source: ViewError,
    },
}

/// Ordered, immutable list of route entries.
///
/// Validated once at construction: duplicate paths, duplicate names, and
/// views missing from the registry are all rejected together. After that
/// the table never changes, so it is shared via `Arc` without locks.
#[derive(Debug, Clone, Serialize)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build a table from configured entries, verifying every invariant.
    pub fn from_config(
        configs: Vec<RouteConfig>,
        views: &ViewRegistry,
    ) -> Result<Self, Vec<TableError>> {
        Self::new(configs.into_iter().map(RouteEntry::from).collect(), views)
    }

    /// Build a table, verifying every invariant.
    ///
    /// Returns every violation found, not just the first.
    pub fn new(entries: Vec<RouteEntry>, views: &ViewRegistry) -> Result<Self, Vec<TableError>> {
        let mut errors = Vec::new();
        let mut seen_paths = std::collections::HashSet::new();
        let mut seen_names = std::collections::HashSet::new();

        for entry in &entries {
            if !seen_paths.insert(entry.path.as_str()) {
                errors.push(TableError::DuplicatePath(entry.path.clone()));
            }
            if !seen_names.insert(entry.name.as_str()) {
                errors.push(TableError::DuplicateName(entry.name.clone()));
            }
            if !views.contains(&entry.view) {
                errors.push(TableError::UnknownView {
                    route: entry.name.clone(),
                    view: entry.view.clone(),
                });
            }
        }

        if errors.is_empty() {
            Ok(Self { entries })
        } else {
            Err(errors)
        }
    }

    /// Look up the entry for `path`.
    ///
    /// First match wins in declaration order; matching is exact and
    /// case-sensitive, anchored on the full path so `/` never matches
    /// `/chat`. `None` means no entry matched.
    pub fn resolve(&self, path: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.path == path)
    }

    /// Reverse lookup by route name.
    pub fn entry_named(&self, name: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::default_registry;

    fn chat_entries() -> Vec<RouteEntry> {
        vec![
            RouteEntry {
                path: "/".into(),
                name: "chat".into(),
                view: "ChatBot".into(),
            },
            RouteEntry {
                path: "/chat".into(),
                name: "chat with clarifai".into(),
                view: "ChatClarifai".into(),
            },
        ]
    }

    #[test]
    fn test_exact_match_is_anchored() {
        let table = RouteTable::new(chat_entries(), &default_registry()).unwrap();

        assert_eq!(table.resolve("/").unwrap().name, "chat");
        assert_eq!(table.resolve("/chat").unwrap().name, "chat with clarifai");

        // Neither prefix nor case variants match.
        assert!(table.resolve("/cha").is_none());
        assert!(table.resolve("/chat/").is_none());
        assert!(table.resolve("/Chat").is_none());
        assert!(table.resolve("").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let mut entries = chat_entries();
        entries.push(RouteEntry {
            path: "/about".into(),
            name: "about".into(),
            view: "ChatBot".into(),
        });
        let table = RouteTable::new(entries, &default_registry()).unwrap();

        assert_eq!(table.resolve("/about").unwrap().name, "about");
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let mut entries = chat_entries();
        entries.push(RouteEntry {
            path: "/chat".into(),
            name: "other".into(),
            view: "ChatBot".into(),
        });

        let errors = RouteTable::new(entries, &default_registry()).unwrap_err();
        assert_eq!(errors, vec![TableError::DuplicatePath("/chat".into())]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut entries = chat_entries();
        entries.push(RouteEntry {
            path: "/other".into(),
            name: "chat".into(),
            view: "ChatBot".into(),
        });

        let errors = RouteTable::new(entries, &default_registry()).unwrap_err();
        assert_eq!(errors, vec![TableError::DuplicateName("chat".into())]);
    }

    #[test]
    fn test_unknown_view_rejected() {
        let entries = vec![RouteEntry {
            path: "/".into(),
            name: "chat".into(),
            view: "Nope".into(),
        }];

        let errors = RouteTable::new(entries, &default_registry()).unwrap_err();
        assert_eq!(
            errors,
            vec![TableError::UnknownView {
                route: "chat".into(),
                view: "Nope".into(),
            }]
        );
    }

    #[test]
    fn test_all_errors_reported_together() {
        let mut entries = chat_entries();
        entries.push(RouteEntry {
            path: "/".into(),
            name: "chat".into(),
            view: "Nope".into(),
        });

        let errors = RouteTable::new(entries, &default_registry()).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_reverse_lookup_by_name() {
        let table = RouteTable::new(chat_entries(), &default_registry()).unwrap();
        assert_eq!(table.entry_named("chat").unwrap().path, "/");
        assert!(table.entry_named("missing").is_none());
    }
}
