//! Built-in chat view components.
//!
//! Conversation rendering and message state live outside this crate; these
//! components only provide the mount points the route table references, so
//! startup validation has something constructible to resolve against.

use crate::routing::view::{View, ViewRegistry};

/// Chat view backed by the default assistant endpoint.
pub struct ChatBot;

impl View for ChatBot {
    fn component(&self) -> &str {
        "ChatBot"
    }

    fn render(&self) -> String {
        r#"<main class="chat" data-view="ChatBot"></main>"#.to_string()
    }
}

/// Chat view backed by the Clarifai-flavored client.
pub struct ChatClarifai;

impl View for ChatClarifai {
    fn component(&self) -> &str {
        "ChatClarifai"
    }

    fn render(&self) -> String {
        r#"<main class="chat" data-view="ChatClarifai"></main>"#.to_string()
    }
}

/// Registry with both chat components, matching the default route table.
pub fn default_registry() -> ViewRegistry {
    let mut views = ViewRegistry::new();
    views.register("ChatBot", || Ok(Box::new(ChatBot) as Box<dyn View>));
    views.register("ChatClarifai", || Ok(Box::new(ChatClarifai) as Box<dyn View>));
    views
}
