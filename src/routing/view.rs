//! View components and their registry.
//!
//! A view is the unit of presentation a route activates. The registry maps
//! component names to factories so the route table can verify at startup
//! that every entry resolves to a constructible component.

use std::collections::HashMap;

/// A renderable UI component activated by route resolution.
pub trait View: Send + Sync {
    /// Component name, e.g. `"ChatBot"`.
    fn component(&self) -> &str;

    /// Markup mounted into the application's single view slot.
    fn render(&self) -> String;
}

/// Error raised when a view factory fails to construct its component.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ViewError {
    message: String,
}

impl ViewError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

type ViewFactory = Box<dyn Fn() -> Result<Box<dyn View>, ViewError> + Send + Sync>;

/// Registry of view factories, keyed by component name.
///
/// Populated once at startup and immutable afterwards. Construction of a
/// registered component may still fail at navigation time; that failure
/// surfaces as a [`ViewError`] and is never swallowed.
#[derive(Default)]
pub struct ViewRegistry {
    factories: HashMap<String, ViewFactory>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for a component name. A later registration under
    /// the same name replaces the earlier one.
    pub fn register<F>(&mut self, component: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Box<dyn View>, ViewError> + Send + Sync + 'static,
    {
        self.factories.insert(component.into(), Box::new(factory));
    }

    /// Whether a component name resolves to a registered factory.
    pub fn contains(&self, component: &str) -> bool {
        self.factories.contains_key(component)
    }

    /// Construct the component registered under `component`.
    pub fn construct(&self, component: &str) -> Result<Box<dyn View>, ViewError> {
        match self.factories.get(component) {
            Some(factory) => factory(),
            None => Err(ViewError::new(format!(
                "component {component:?} is not registered"
            ))),
        }
    }
}

impl std::fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewRegistry")
            .field("components", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stub;

    impl View for Stub {
        fn component(&self) -> &str {
            "Stub"
        }

        fn render(&self) -> String {
            "<main data-view=\"Stub\"></main>".to_string()
        }
    }

    #[test]
    fn test_construct_registered_component() {
        let mut registry = ViewRegistry::new();
        registry.register("Stub", || Ok(Box::new(Stub) as Box<dyn View>));

        assert!(registry.contains("Stub"));
        let view = registry.construct("Stub").unwrap();
        assert_eq!(view.component(), "Stub");
    }

    #[test]
    fn test_unknown_component_errors() {
        let registry = ViewRegistry::new();
        assert!(!registry.contains("Missing"));
        assert!(registry.construct("Missing").is_err());
    }

    #[test]
    fn test_factory_failure_propagates() {
        let mut registry = ViewRegistry::new();
        registry.register("Broken", || Err(ViewError::new("init failed")));

        let err = registry.construct("Broken").err().unwrap();
        assert_eq!(err.to_string(), "init failed");
    }
}
