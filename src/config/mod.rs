//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → DevServerConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no runtime reload
//! - All fields have defaults; the zero-config default reproduces the
//!   stock chat app surface (two routes, one /api forward rule)
//! - Validation separates syntactic (serde) from semantic checks and
//!   reports every violation, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    DevServerConfig, ForwardRuleConfig, ListenerConfig, ObservabilityConfig, RouteConfig,
    SpaConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
